use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "plant-guide")]
#[command(about = "Categorize plant identification guides into readable sections")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base directory (default: ~/.plant-guide)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize an agricultural guide (reads stdin when no file is given)
    Format {
        /// Guide text file ("-" for stdin)
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Digest identification responses and show the plant name with its guide or prompt
    Identify {
        /// Plant.id response (JSON)
        #[arg(long)]
        plant_id: PathBuf,

        /// Pl@ntNet response (JSON)
        #[arg(long)]
        plantnet: Option<PathBuf>,

        /// Gemini response (JSON); when given, its guide is categorized
        #[arg(long)]
        gemini: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the guide prompt composed from identification responses
    Prompt {
        /// Plant.id response (JSON)
        #[arg(long)]
        plant_id: PathBuf,

        /// Pl@ntNet response (JSON)
        #[arg(long)]
        plantnet: Option<PathBuf>,
    },

    /// List categories and their trigger keywords
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., output.format, categories.care.keywords)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., output.format, categories.care.keywords)
        key: String,

        /// Value to set (e.g., "json" or "watering,pruning")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
