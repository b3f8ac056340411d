use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use scheduling_simulator::{
    cli::{self, Command},
    loader, report,
    scheduler::{self, ScheduleViewer},
};
use std::{env, error::Error, io, process};

const CHART_WIDTH: usize = 72;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args_os();
    let exe = args
        .next()
        .map(|exe| exe.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scheduling-simulator".to_owned());

    let args = match cli::parse_args(args) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            cli::print_usage(&exe);
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            cli::print_usage(&exe);
            process::exit(2);
        }
    };

    let definitions = loader::read_processes(&args.file)?;
    let schedules = scheduler::simulate_all(&args.policies, &definitions, &args.config)?;

    if args.plain {
        for schedule in &schedules {
            println!("{}:", schedule.policy);
            print!("{}", report::format_results(schedule));
            println!();
            print!("{}", report::format_gantt(schedule, CHART_WIDTH));
            println!();
        }
        return Ok(());
    }

    execute!(io::stdout(), Clear(ClearType::All))?;

    let mut viewer = ScheduleViewer::new(schedules, args.config)?;
    while viewer.run()? {}
    drop(viewer);

    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}
