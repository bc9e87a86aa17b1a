use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "md-image-relay",
    version,
    about = "Turns Markdown images in a chat message into image attachments",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Per-image download timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum concurrent downloads per message.
    #[arg(long)]
    pub max_concurrent_fetches: Option<usize>,

    /// Parent directory for the staging area.
    #[arg(long, value_name = "PATH")]
    pub staging_dir: Option<PathBuf>,

    /// Message text to process. Read from stdin when omitted.
    #[arg(short, long, env = "MD_IMAGE_RELAY_MESSAGE")]
    pub message: Option<String>,

    /// Deliver outgoing messages into this directory instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Send the built-in example message and exit.
    #[arg(long)]
    pub self_test: bool,
}
