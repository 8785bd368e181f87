use clap::Parser;
use color_eyre::Result;
use std::io::{self, Write};

mod cli;
mod commands;
mod error;
mod model;
mod system;

use cli::{Cli, Mode};
use commands::{ConnectionSource, ProcessSource, SystemTables, is_proc_running, proc_port};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_from(cli::normalize_legacy_flags(std::env::args_os()));
    log::debug!("{cli:?}");

    run(&cli, &SystemTables, &mut io::stdout().lock())
}

/// Runs the requested lookup and writes plain-text results to `out`.
fn run<T>(cli: &Cli, tables: &T, out: &mut impl Write) -> Result<()>
where
    T: ProcessSource + ConnectionSource,
{
    match cli.mode() {
        Mode::Port => {
            for port in proc_port(tables, tables, &cli.name, &cli.addr)? {
                writeln!(out, "{port}")?;
            }
        }
        Mode::Running => {
            let running = is_proc_running(tables, &cli.name)?;
            writeln!(out, "{}", if running { "True" } else { "False" })?;
        }
    }
    out.flush()?;
    Ok(())
}
