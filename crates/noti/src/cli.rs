use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_MANIFEST_NAME;
use crate::status::NotificationStatus;

const USAGE: &str = "noti <start|success|fail>";

/// noti – post build status to a Discord webhook
#[derive(Parser, Debug)]
#[command(
    name = "noti",
    author,
    version,
    about,
    long_about = None,
    override_usage = USAGE
)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project manifest to read the name and webhook from
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST_NAME)]
    pub manifest: PathBuf,

    /// Build status to report: start, success or fail
    #[arg(value_name = "STATUS")]
    pub status: NotificationStatus,
}

impl Cli {
    /// Parse `std::env::args`, exiting with code 1 on a missing or invalid status.
    /// `--help` and `--version` still exit 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) if err.use_stderr() => {
                eprint!("{}", render_error(&err));
                std::process::exit(1);
            }
            Err(err) => err.exit(),
        }
    }
}

/// Plain-text parse error, always carrying the usage line.
pub fn render_error(err: &clap::Error) -> String {
    let mut text = err.to_string();
    let usage = format!("Usage: {USAGE}");
    if !text.contains(&usage) {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push('\n');
        text.push_str(&usage);
        text.push('\n');
    }
    text
}
