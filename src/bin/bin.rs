use anyhow::Result;
use log::debug;
use std::{
    env,
    ffi::OsString,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use structopt::StructOpt;

/// Count log levels and list the most frequent error messages in a log file
#[derive(StructOpt)]
struct Options {
    #[structopt(parse(from_os_str))]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    // Load from .env file if it is present
    dotenv::dotenv().ok();
    // Initialize logging
    env_logger::init();
    // Get command line arguments; anything but a single log file is a usage error
    let mut args: Vec<OsString> = env::args_os().collect();
    if args.len() != 2 {
        debug!("expected 1 argument, got {}", args.len().saturating_sub(1));
        println!("Usage: {} <log_file>", program_name());
        return ExitCode::FAILURE;
    }
    // Everything after "--" is positional, so paths like "-app.log" or "--help" are taken as-is
    args.insert(1, OsString::from("--"));
    let options = match Options::from_iter_safe(args) {
        Ok(options) => options,
        Err(error) => {
            debug!("argument error: {}", error.message);
            println!("Usage: {} <log_file>", program_name());
            return ExitCode::FAILURE;
        }
    };
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // stdout may be the thing that failed, so don't panic writing this
            let _ = writeln!(io::stdout(), "Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<()> {
    let report = logreport::analyze_file(&options.log_file)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(report.render().as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn program_name() -> String {
    env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}
