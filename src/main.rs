//! Главный исполняемый файл db-cli

use db_cli::cli::{init_logging, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::init();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    match cli.execute(&config) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
