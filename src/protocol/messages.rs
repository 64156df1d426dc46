//! REST response types for the chat service JSON API.

use serde::{Deserialize, Serialize};

/// Reply from the non-streaming chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Session the exchange belongs to.
    pub session_id: String,
    /// Complete assistant response.
    pub message: String,
    /// Server timestamp (seconds since the epoch).
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Reply from session creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Identifier of the new session.
    pub session_id: String,
    /// Creation time (seconds since the epoch).
    #[serde(default)]
    pub created_at: Option<f64>,
    /// Server-side working directory for the session, when reported.
    #[serde(default)]
    pub working_directory: Option<String>,
}

/// Details of an existing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDetails {
    pub session_id: String,
    /// Optional user-facing name.
    #[serde(default)]
    pub name: Option<String>,
    /// Creation time (seconds since the epoch).
    #[serde(default)]
    pub created_at: f64,
    /// Last activity time (seconds since the epoch).
    #[serde(default)]
    pub last_activity: f64,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub file_count: Option<u64>,
}

impl SessionDetails {
    /// Name to display: the assigned name, or a truncated session ID.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => {
                let short: String = self.session_id.chars().take(8).collect();
                format!("session {short}")
            }
        }
    }
}

/// One file stored in a session's workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    /// MIME type, when the server reports one.
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    /// Last modification time (seconds since the epoch).
    #[serde(default)]
    pub last_modified: f64,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

/// Reply from a file upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUploadReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply from the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` or `"unhealthy"`.
    pub status: String,
    #[serde(default)]
    pub active_sessions: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
    /// Server timestamp (seconds since the epoch).
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl HealthStatus {
    /// Check if the service reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
