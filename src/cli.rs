use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Gemini model to use (overrides the config file)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of the Gemini API (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to the config file [default: ~/.smartcareer/config.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
