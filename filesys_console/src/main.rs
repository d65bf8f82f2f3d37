//! Interactive filesystem console
//!
//! Usage: `filesys [config.json]`. Set `RUST_LOG=debug` to trace operations.

use filesys_console::{bootstrap, run_session};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let config_path = std::env::args().nth(1);
    let mut handler = match bootstrap(config_path.as_deref()) {
        Ok(handler) => handler,
        Err(e) => {
            log::error!("startup failed: {}", e);
            eprintln!("filesys: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    match run_session(&mut handler, stdin.lock(), io::stdout(), prompt) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("filesys: {}", e);
            ExitCode::FAILURE
        }
    }
}
