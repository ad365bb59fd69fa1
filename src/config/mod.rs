pub mod schema_config;

pub use schema_config::{MessageConfig, SchemaConfig};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tech-signup")]
#[command(about = "Validate a sign-up draft and print the normalized record")]
pub struct CliConfig {
    /// JSON file with the raw field values (name, email, password, techs)
    #[arg(long)]
    pub draft: PathBuf,

    /// TOML file overriding schema limits and messages
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
