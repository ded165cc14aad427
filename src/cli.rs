use clap::Parser;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Multi-phase gobuster orchestration: dir, dns, vhost and recursive scans", long_about = None)]
pub struct Cli {
    /// Path to configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target URL (overrides the config file)
    #[arg(long)]
    pub target: Option<String>,

    /// Output directory (overrides the config file)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Number of gobuster threads (overrides the config file)
    #[arg(short = 't', long)]
    pub threads: Option<u32>,

    /// Write a default configuration file and exit
    #[arg(long, default_value_t = false)]
    pub gen_config: bool,

    /// gobuster executable to invoke
    #[arg(long, default_value = "gobuster")]
    pub gobuster: String,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
