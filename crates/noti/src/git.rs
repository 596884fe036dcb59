use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::env::{Env, COMMIT_MESSAGE_VAR};
use crate::single_line;

pub const NO_COMMIT_MESSAGE: &str = "No commit message";

#[async_trait]
pub trait CommitDescriber: Send + Sync {
    /// Raw subject line of the most recent commit.
    async fn describe_latest_commit(&self) -> Result<String>;
}

/// Describes commits by running `git log -1 --pretty=%s`.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    program: Option<PathBuf>,
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Use the `git` found on `PATH`, if any.
    pub fn locate() -> Self {
        Self {
            program: which::which("git").ok(),
            workdir: None,
        }
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
            workdir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }
}

#[async_trait]
impl CommitDescriber for GitCli {
    async fn describe_latest_commit(&self) -> Result<String> {
        let bin = self
            .program
            .as_ref()
            .context("git executable not found on PATH")?;

        let mut cmd = Command::new(bin);
        cmd.arg("log")
            .arg("-1")
            .arg("--pretty=%s")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Running {}", bin.display()))?;
        if !output.status.success() {
            anyhow::bail!(
                "git log exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Sanitized commit subject, falling back to the environment when `describer` fails.
pub async fn resolve_commit_message(describer: &dyn CommitDescriber, env: &Env) -> String {
    match describer.describe_latest_commit().await {
        Ok(subject) => {
            let line = single_line(&subject);
            if line.is_empty() {
                NO_COMMIT_MESSAGE.to_string()
            } else {
                line
            }
        }
        Err(err) => {
            debug!(error = %format!("{err:#}"), "commit lookup failed, using {COMMIT_MESSAGE_VAR}");
            single_line(env.commit_message.as_deref().unwrap_or(NO_COMMIT_MESSAGE))
        }
    }
}
