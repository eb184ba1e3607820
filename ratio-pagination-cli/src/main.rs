use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod cmd_page;
mod cmd_validate;
mod util;

fn init_logger(verbose: u8) {
    // RUST_LOG wins; otherwise info, raised by -v.
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logger(cli.verbose);
    let config = util::load_config(cli.config.as_deref())?;

    match cli.cmd {
        cli::Cmd::Table {
            page,
            next,
            previous,
        } => cmd_page::exec_table(config, page, next, previous),

        cli::Cmd::Infinite { page, next } => cmd_page::exec_infinite(config, page, next),

        cli::Cmd::Validate { page } => cmd_validate::exec(config, page),
    }
}
