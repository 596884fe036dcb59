use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ProjectConfig;
use crate::env::Env;
use crate::git::{resolve_commit_message, CommitDescriber};
use crate::sink::{Delivery, Notifier};
use crate::status::NotificationStatus;

/// One notification run: resolve, format, write the console line to `out`, deliver.
/// Only a failed console write is an error; delivery problems come back as [`Delivery`].
pub async fn run(
    status: NotificationStatus,
    manifest_path: &Path,
    env: &Env,
    describer: &dyn CommitDescriber,
    notifier: &Notifier,
    out: &mut dyn Write,
) -> Result<Delivery> {
    let config = ProjectConfig::resolve(manifest_path, env).await;
    let commit_message = resolve_commit_message(describer, env).await;
    info!(project = %config.name, %status, "resolved build context");

    let notification = status.format(&config.name, &commit_message);
    writeln!(out, "{}", notification.console)
        .and_then(|()| out.flush())
        .context("Writing console summary")?;

    Ok(notifier.notify(&config.webhook_url, &notification.display).await)
}
