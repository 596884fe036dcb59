//! Environment variables consulted when the primary sources are unavailable.

pub const PROJECT_NAME_VAR: &str = "PROJECT_NAME";
pub const WEBHOOK_URL_VAR: &str = "DISCORD_BUILD_NOTI_URL";
pub const COMMIT_MESSAGE_VAR: &str = "CF_PAGES_COMMIT_MESSAGE";

/// Snapshot of the overrides, captured once at startup. Empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    pub project_name: Option<String>,
    pub webhook_url: Option<String>,
    pub commit_message: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            project_name: read(PROJECT_NAME_VAR),
            webhook_url: read(WEBHOOK_URL_VAR),
            commit_message: read(COMMIT_MESSAGE_VAR),
        }
    }
}
