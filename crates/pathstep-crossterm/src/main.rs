use std::process::ExitCode;

use pathstep_crossterm::{Config, ConfigError, CrosstermDriver, USAGE, Visualizer, run};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(ConfigError::HelpRequested) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("pathstep: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut driver = CrosstermDriver::new().with_mouse(config.mouse);
    let mut vis = Visualizer::new(config);
    if let Err(e) = run(&mut vis, &mut driver) {
        eprintln!("pathstep: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
