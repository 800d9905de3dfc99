use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use mamalift_cli::config::{self, MamaliftConfig};
use mamalift_cli::terminal::Terminal;
use mamalift_cli::wizard::{RegistrationOutcome, run_registration};
use mamalift_instruments::instruments::epds::EPDS_ID;
use mamalift_instruments::scoring::classify;
use mamalift_instruments::{Instrument, get_instrument};
use mamalift_registration::session::RegistrationSession;

#[derive(Parser, Debug)]
#[command(name = "mamalift")]
#[command(author, version, about = "Postpartum depression screening and program registration")]
struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen and register interactively (the default)
    Register,
    /// Classify a completed screening and print the result as JSON
    Score {
        /// 1-based option number for each question, in order
        #[arg(num_args = 10, value_name = "OPTION", required = true)]
        answers: Vec<usize>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    let instrument: Arc<dyn Instrument> = Arc::from(get_instrument(EPDS_ID)?);

    match cli.command.unwrap_or(Command::Register) {
        Command::Register => {
            let config = config::load_config_from(&config_path)?;
            let rules = config.rules_for(instrument.as_ref())?;
            let mut session = RegistrationSession::new(instrument, rules)?;
            let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
            match run_registration(&mut session, &mut terminal)? {
                RegistrationOutcome::Registered(summary) => {
                    tracing::info!(session_id = %summary.session_id, "registered");
                }
                outcome => tracing::info!(?outcome, "registration ended"),
            }
        }
        Command::Score { answers } => {
            let config = config::load_config_from(&config_path)?;
            let rules = config.rules_for(instrument.as_ref())?;
            let responses = instrument
                .questions()
                .iter()
                .zip(&answers)
                .map(|(question, &option)| -> Result<_> {
                    let index = option
                        .checked_sub(1)
                        .ok_or_else(|| eyre::eyre!("option numbers start at 1"))?;
                    Ok(instrument.response_for(question.id, index)?)
                })
                .collect::<Result<Vec<_>>>()?;
            let classification = classify(&responses, &rules);
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                let config = MamaliftConfig {
                    created_at: Some(jiff::Timestamp::now()),
                    ..MamaliftConfig::default()
                };
                config::save_config_to(&config, &config_path)?;
                println!("{}", config_path.display());
            }
            ConfigAction::Show => {
                let config = config::load_config_from(&config_path)?;
                config.rules_for(instrument.as_ref())?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}
