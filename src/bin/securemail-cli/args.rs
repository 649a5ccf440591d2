use clap::{Parser, Subcommand, ValueEnum};
use securemail_lib::DEFAULT_TIMEOUT_SECS;
#[cfg(feature = "with-server")]
use securemail_lib::server::DEFAULT_PORT;

#[derive(Parser)]
#[command(
    name = "securemail-cli",
    version,
    about = "Vérifie format, MX, DNSSEC et STARTTLS pour une adresse e-mail"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// format de sortie
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// timeout de connexion SMTP (secondes)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// diagnostics des sondes sur stderr + détail des vérifications
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Ndjson,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide une adresse
    Validate { email: String },
    /// lance l'API HTTP (feature `with-server`)
    #[cfg(feature = "with-server")]
    Serve {
        /// adresse d'écoute
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_parsed_before_any_work() {
        let cli = Cli::try_parse_from(["securemail-cli", "validate", "a@b.c", "--format", "ndjson"])
            .expect("valid args");
        assert_eq!(cli.format, OutputFormat::Ndjson);

        let cli = Cli::try_parse_from(["securemail-cli", "validate", "a@b.c"]).expect("valid args");
        assert_eq!(cli.format, OutputFormat::Human);

        let err = Cli::try_parse_from(["securemail-cli", "--format", "xml", "validate", "a@b.c"])
            .err()
            .expect("unknown format rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
