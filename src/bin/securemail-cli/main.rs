mod args;
mod output;
#[cfg(feature = "with-server")]
mod serve;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use securemail_lib::{CheckerConfig, validate_email};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use output::Row;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = CheckerConfig::new(cli.timeout, cli.verbose).context("invalid --timeout")?;

    let emails: Vec<String> = if cli.stdin {
        let mut emails = Vec::new();
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if !line.trim().is_empty() {
                emails.push(line);
            }
        }
        emails
    } else {
        match &cli.cmd {
            Some(Commands::Validate { email }) => vec![email.clone()],
            #[cfg(feature = "with-server")]
            Some(Commands::Serve { bind, port }) => return serve::run(bind, *port),
            None => {
                Cli::clap_command().print_help()?;
                println!();
                return Ok(());
            }
        }
    };

    let rows: Vec<Row> = emails
        .into_iter()
        .map(|original| Row {
            result: validate_email(&original, &config),
            original,
        })
        .collect();

    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalides, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
