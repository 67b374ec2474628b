use serde::{Deserialize, Serialize};

/// Success payload returned by mutating endpoints. The server sends either
/// a `message` or a `status` string; both are printed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiMessage {
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.status.as_deref())
            .unwrap_or("Operation completed successfully")
    }
}

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionList {
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppList {
    pub apps: Vec<AppInfo>,
}

/// Which artifacts a pull addresses. Each variant maps to a distinct
/// server route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullTarget {
    /// Latest frozen version of every app.
    AllLatest,
    /// A specific frozen version of every app.
    AllAt { version: String },
    /// Latest frozen version of one app.
    AppLatest { app: String },
    /// A specific frozen version of one app.
    AppAt { app: String, version: String },
}

impl PullTarget {
    pub fn from_args(app: Option<String>, version: Option<String>) -> Self {
        match (app, version) {
            (None, None) => PullTarget::AllLatest,
            (None, Some(version)) => PullTarget::AllAt { version },
            (Some(app), None) => PullTarget::AppLatest { app },
            (Some(app), Some(version)) => PullTarget::AppAt { app, version },
        }
    }

    /// Route path on the Perseus server for this target.
    pub fn route(&self) -> String {
        match self {
            PullTarget::AllLatest => "/api/v1/pull".to_string(),
            PullTarget::AllAt { version } => {
                format!("/api/v1/pull/{}", urlencoding::encode(version))
            }
            PullTarget::AppLatest { app } => {
                format!("/api/v1/pull/latest/{}", urlencoding::encode(app))
            }
            PullTarget::AppAt { app, version } => format!(
                "/api/v1/pull/{}/{}",
                urlencoding::encode(version),
                urlencoding::encode(app)
            ),
        }
    }

    /// App name for single-app targets; `None` means a bundle of all apps.
    pub fn app(&self) -> Option<&str> {
        match self {
            PullTarget::AppLatest { app } | PullTarget::AppAt { app, .. } => Some(app),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PullTarget::AllLatest => "latest version of all apps".to_string(),
            PullTarget::AllAt { version } => format!("version {} of all apps", version),
            PullTarget::AppLatest { app } => format!("latest version of {}", app),
            PullTarget::AppAt { app, version } => format!("{} {}", app, version),
        }
    }
}
