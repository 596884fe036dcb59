use std::fmt;
use std::str::FromStr;

/// Build status reported by a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Start,
    Success,
    Fail,
}

/// Rendered text for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub icon: &'static str,
    pub status_text: &'static str,
    /// Markdown body posted to the webhook.
    pub display: String,
    /// Plain line printed to stdout.
    pub console: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status '{}', expected one of start, success, fail",
            self.0
        )
    }
}

impl std::error::Error for InvalidStatus {}

impl NotificationStatus {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Success => "success",
            Self::Fail => "fail",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Start => "🚢",
            Self::Success => "✨",
            Self::Fail => "🚨",
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            Self::Start => "Build Started",
            Self::Success => "Build Succeeded",
            Self::Fail => "Build Failed",
        }
    }

    pub fn format(self, name: &str, commit_message: &str) -> Notification {
        let icon = self.icon();
        let status_text = self.status_text();
        Notification {
            icon,
            status_text,
            display: format!("{icon} **{name}** - {commit_message} - {status_text}"),
            console: format!("{icon} {name} - {commit_message} - {status_text}"),
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "success" => Ok(Self::Success),
            "fail" => Ok(Self::Fail),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
