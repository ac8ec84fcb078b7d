use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "qsolve",
    version,
    about = "Get optimized solutions for your programming problems",
    propagate_version = true
)]
pub struct Cli {
    /// Problem description (one-shot)
    pub prompt: Vec<String>,

    #[command(flatten)]
    pub io: IoArgs,

    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct IoArgs {
    /// Read the problem description from a file
    #[arg(short = 'f', long = "file", global = true)]
    pub input_file: Option<String>,

    /// Write the extracted solution to a file
    #[arg(short = 'o', long = "output", global = true)]
    pub output_file: Option<String>,

    /// Write the chat history as JSON after answering
    #[arg(long = "export", global = true)]
    pub export_file: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RuntimeArgs {
    /// Override provider for this run
    #[arg(long = "provider", global = true)]
    pub provider: Option<String>,

    /// Override model for this run
    #[arg(long = "model", global = true)]
    pub model: Option<String>,

    /// Override solution language for this run
    #[arg(long = "language", global = true)]
    pub language: Option<String>,

    /// Explicit config file path
    #[arg(long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve one problem and exit
    Solve {
        /// Problem description
        prompt: Vec<String>,
    },

    /// Chat loop with history, stats and export
    Interactive,

    /// Config management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default config file (~/.quant_solver/config.toml)
    Init {
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
        /// Scope to create config: user or project (default: user)
        #[arg(long, value_parser = ["user", "project"])]
        scope: Option<String>,
    },
    Set { key: String, value: String },
    List,
}
