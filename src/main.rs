//! Entry point of the `sk` binary.
use anyhow::Result;
use clap::Parser;

use skillkit::cli::{Cli, Command};
use skillkit::commands;
use skillkit::logging::{Logger, init_subscriber};
use skillkit::navigation::terminal::restore_cursor;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let command = args.command_name();
    init_subscriber(args.verbose, command);
    let log = Logger::new(command);

    ctrlc::set_handler(|| {
        restore_cursor();
        std::process::exit(130);
    })?;

    let global = &args.global;
    match args.command {
        None => commands::interactive::run(global, &log),
        Some(Command::Use(opts)) => commands::use_module::run(global, &opts, &log),
        Some(Command::List) => commands::list::run(global, &log),
        Some(Command::Platforms) => commands::platforms::run(global, &log),
        Some(Command::Info { module }) => commands::info::run(global, &module, &log),
        Some(Command::Remove { module, platform }) => {
            commands::remove::run(global, &module, platform.as_deref(), &log)
        }
        Some(Command::Sync { dry_run }) => commands::sync::run(global, dry_run, &log),
        Some(Command::Status) => commands::status::run(global, &log),
        Some(Command::Init) => commands::init::run(global, &log),
        Some(Command::Completions { shell }) => {
            commands::completions::run(shell);
            Ok(())
        }
        Some(Command::Version) => commands::version::run(),
    }
}
