//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// mailpeek - preview email templates with synthetic data
#[derive(Parser, Debug)]
#[command(name = "mailpeek")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve template previews over HTTP
    Serve(ServeArgs),

    /// Render one template to stdout or a file
    Render(RenderArgs),

    /// List previewable templates and the names they define
    Ls(LsArgs),

    /// Compile the template set and render every template
    Check(CheckArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (default from config, 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (default from config, 8000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Open the template listing in a browser
    #[arg(long)]
    pub open: bool,

    /// Reuse the compiled template set until a source file changes
    #[arg(long, conflicts_with = "no_cache")]
    pub cache: bool,

    /// Recompile the template set on every request
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template identifier, e.g. `welcome` or `subscriber-optin-campaign.html`
    pub identifier: String,

    /// Write HTML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the synthetic render context as JSON and exit
    #[arg(long)]
    pub show_context: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,

    /// Include layout fragments
    #[arg(long)]
    pub all: bool,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Stop on first failure
    #[arg(long)]
    pub fail_fast: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
