use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::env::Env;
use crate::single_line;

pub const DEFAULT_MANIFEST_NAME: &str = "package.json";
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// The parts of `package.json` noti reads. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub config: Option<ManifestConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ManifestConfig {
    #[serde(default)]
    pub discord_build_noti_url: Option<Value>,
}

impl Manifest {
    /// Any well-formed JSON document is a manifest; shapes that don't match yield empty fields.
    pub fn from_value(document: Value) -> Self {
        object_as(document).unwrap_or_default()
    }
}

/// A mistyped field counts as absent instead of rejecting the whole manifest.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(object_as(Value::deserialize(deserializer)?))
}

// Only objects: serde would otherwise fill struct fields positionally from arrays.
fn object_as<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_object() {
        serde_json::from_value(value).ok()
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: String,
    /// Empty when no webhook is configured.
    pub webhook_url: String,
}

impl ProjectConfig {
    /// Resolve from the manifest at `manifest_path`, or entirely from `env`
    /// when the manifest cannot be read or parsed.
    pub async fn resolve(manifest_path: &Path, env: &Env) -> Self {
        match load_manifest(manifest_path).await {
            Ok(manifest) => Self::from_manifest(&manifest, env),
            Err(err) => {
                debug!(error = %format!("{err:#}"), "manifest unavailable, using environment");
                Self::from_env(env)
            }
        }
    }

    pub fn from_manifest(manifest: &Manifest, env: &Env) -> Self {
        let name = manifest
            .name
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());
        let webhook_url = manifest
            .config
            .as_ref()
            .and_then(|config| config.discord_build_noti_url.as_ref())
            .and_then(scalar_text)
            .or_else(|| env.webhook_url.clone())
            .unwrap_or_default();

        Self {
            name: single_line(&name),
            webhook_url: single_line(&webhook_url),
        }
    }

    pub fn from_env(env: &Env) -> Self {
        Self {
            name: single_line(env.project_name.as_deref().unwrap_or(UNKNOWN_PROJECT)),
            webhook_url: single_line(env.webhook_url.as_deref().unwrap_or_default()),
        }
    }
}

async fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Reading manifest {}", path.display()))?;
    let document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Parsing JSON manifest {}", path.display()))?;
    Ok(Manifest::from_value(document))
}

/// Text of a manifest field. Empty strings, `null`, `false` and containers count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
