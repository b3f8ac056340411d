//! Command-line parsing for the simulator binary.
//!
//! ```text
//! scheduling-simulator [FILE] [-c N] [-q N] [-p fcfs|srt|rr|all]... [--plain]
//! ```

use crate::scheduler::{Policy, SchedulerConfig, Ticks};
use std::{ffi::OsString, fmt, path::PathBuf};

pub const DEFAULT_PROCESS_FILE: &str = "processes.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub file: PathBuf,
    pub config: SchedulerConfig,
    pub policies: Vec<Policy>,
    /// Print results instead of opening the terminal UI.
    pub plain: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CliError {}

fn parse_policy(value: &str) -> Result<Vec<Policy>, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "fcfs" => Ok(vec![Policy::FirstComeFirstServed]),
        "srt" => Ok(vec![Policy::ShortestRemainingTime]),
        "rr" | "round-robin" => Ok(vec![Policy::RoundRobin]),
        "all" => Ok(Policy::ALL.to_vec()),
        _ => Err(CliError(format!(
            "unknown policy '{value}' (expected fcfs, srt, rr or all)"
        ))),
    }
}

/// Parses the arguments that follow the executable name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut file = None;
    let mut config = SchedulerConfig::default();
    let mut policies: Vec<Policy> = Vec::new();
    let mut plain = false;

    while let Some(arg) = args.next() {
        let arg = arg.to_string_lossy().into_owned();
        let mut value = |flag: &str| -> Result<String, CliError> {
            args.next()
                .map(|value| value.to_string_lossy().into_owned())
                .ok_or_else(|| CliError(format!("{flag} requires a value")))
        };
        let ticks = |flag: &str, value: String| -> Result<Ticks, CliError> {
            value
                .parse()
                .map_err(|_| CliError(format!("{flag} expects an integer, got '{value}'")))
        };

        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-c" | "--context-switch" => {
                config.context_switch = ticks(&arg, value(&arg)?)?;
            }
            "-q" | "--quantum" => {
                config.time_quantum = ticks(&arg, value(&arg)?)?;
            }
            "-p" | "--policy" => {
                for policy in parse_policy(&value(&arg)?)? {
                    if !policies.contains(&policy) {
                        policies.push(policy);
                    }
                }
            }
            "--plain" => plain = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError(format!("unknown flag '{flag}'")));
            }
            other if file.is_some() => {
                return Err(CliError(format!("unexpected argument '{other}'")));
            }
            other => file = Some(PathBuf::from(other)),
        }
    }

    if policies.is_empty() {
        policies = Policy::ALL.to_vec();
    }

    Ok(Command::Run(CliArgs {
        file: file.unwrap_or_else(|| PathBuf::from(DEFAULT_PROCESS_FILE)),
        config,
        policies,
        plain,
    }))
}

pub fn print_usage(exe: &str) {
    eprintln!("usage: {exe} [FILE] [OPTIONS]");
    eprintln!();
    eprintln!("Simulates FCFS, SRT and round robin scheduling over the processes in FILE");
    eprintln!("(default: {DEFAULT_PROCESS_FILE}), one `pid arrival burst` triple per line.");
    eprintln!();
    eprintln!("options:");
    eprintln!("  -c, --context-switch N  cost charged after each completion (default 1)");
    eprintln!("  -q, --quantum N         round robin time quantum (default 4)");
    eprintln!("  -p, --policy NAME       fcfs, srt, rr or all; repeatable (default all)");
    eprintln!("      --plain             print results instead of opening the viewer");
    eprintln!("  -h, --help              show this message");
    eprintln!();
    eprintln!("Log output is controlled with RUST_LOG, e.g. RUST_LOG=debug.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CliError> {
        parse_args(args.iter().map(OsString::from))
    }

    fn run_args(args: &[&str]) -> CliArgs {
        match parse(args) {
            Ok(Command::Run(args)) => args,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let args = run_args(&[]);
        assert_eq!(args.file, PathBuf::from(DEFAULT_PROCESS_FILE));
        assert_eq!(args.config, SchedulerConfig::default());
        assert_eq!(args.policies, Policy::ALL.to_vec());
        assert!(!args.plain);
    }

    #[test]
    fn flags_and_file() {
        let args = run_args(&[
            "jobs.txt", "-c", "0", "--quantum", "2", "-p", "srt", "-p", "RR", "--plain",
        ]);
        assert_eq!(args.file, PathBuf::from("jobs.txt"));
        assert_eq!(args.config, SchedulerConfig::new(0, 2));
        assert_eq!(
            args.policies,
            vec![Policy::ShortestRemainingTime, Policy::RoundRobin]
        );
        assert!(args.plain);
    }

    #[test]
    fn duplicate_policies_collapse() {
        let args = run_args(&["-p", "fcfs", "-p", "all"]);
        assert_eq!(args.policies, Policy::ALL.to_vec());
    }

    #[test]
    fn help() {
        assert_eq!(parse(&["-c", "1", "--help"]), Ok(Command::Help));
    }

    #[test]
    fn errors() {
        assert!(parse(&["-q"]).is_err());
        assert!(parse(&["-q", "four"]).is_err());
        assert!(parse(&["-p", "lottery"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn negative_values_are_left_to_validation() {
        let args = run_args(&["-c", "-1"]);
        assert_eq!(args.config.context_switch, -1);
        assert!(args.config.validate().is_err());
    }
}
