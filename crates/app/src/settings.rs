//! Handles settings for the application.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file
//! (`settings.toml` or `--config`), `SPESE__*` environment variables
//! (e.g. `SPESE__SERVER__PORT=9000`), then command line overrides.
use clap::Parser;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "spese", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listening address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let builder = Config::builder()
            .add_source(File::with_name(path).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix("SPESE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.bind", args.bind)?
            .set_override_option("server.port", args.port.map(i64::from))?;

        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("app.seed_sample_data", true)?
            .set_default("server.port", 8080)?
            .set_default("server.database", "memory")?
            .build()?
            .try_deserialize()
    }
}
