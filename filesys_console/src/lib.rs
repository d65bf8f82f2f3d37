//! # Filesystem Console
//!
//! A thin text front end over the filesystem service: one line in, one
//! operation out. It is NOT a shell and NOT intended for POSIX compatibility.

pub mod commands;

use commands::CommandHandler;
use services_filesys::{FileSystemConfig, FileSystemService, FsResult};
use std::io::{BufRead, Write};

/// Bootstrap function
///
/// Builds the service from an optional config file and wraps it in a
/// command handler acting as the admin user.
pub fn bootstrap(config_path: Option<&str>) -> FsResult<CommandHandler> {
    let config = match config_path {
        Some(path) => FileSystemConfig::load(path)?,
        None => FileSystemConfig::default(),
    };
    let service = FileSystemService::with_config(config)?;
    Ok(CommandHandler::with_service(service))
}

/// Runs commands from `input` until it ends or `exit` is read
///
/// Results go to `output`, failures are written there too, prefixed with
/// `error:`. Returns the number of commands that failed.
pub fn run_session<R: BufRead, W: Write>(
    handler: &mut CommandHandler,
    input: R,
    mut output: W,
    prompt: bool,
) -> std::io::Result<usize> {
    let mut failures = 0;
    if prompt {
        write!(output, "{}@filesys$ ", handler.user)?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        match handler.execute(&line) {
            Ok(text) if text.is_empty() || text.ends_with('\n') => write!(output, "{}", text)?,
            Ok(text) => writeln!(output, "{}", text)?,
            Err(message) => {
                failures += 1;
                log::debug!("command failed: {}", message);
                writeln!(output, "error: {}", message)?;
            }
        }
        if prompt {
            write!(output, "{}@filesys$ ", handler.user)?;
        }
        output.flush()?;
    }
    Ok(failures)
}
