//! noti – posts build status notifications to a Discord webhook.
//!
//! The binary resolves the project name and webhook from `package.json`
//! (falling back to environment variables), describes the latest commit via
//! `git`, formats a one-line message for the requested status and delivers it.

pub mod cli;
pub mod config;
pub mod env;
pub mod git;
pub mod logging;
pub mod run;
pub mod sink;
pub mod status;

/// Removes every `\n`/`\r` and trims surrounding whitespace.
pub fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], "").trim().to_string()
}
