//! Database models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A portal customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email, unique when present.
    pub email: Option<String>,
    /// Login credential.
    pub password: String,
    /// True until the customer changes their password.
    #[serde(default = "default_true")]
    pub first_login: bool,
    /// Dashboard theme color.
    #[serde(default)]
    pub theme_color: Option<String>,
    /// Whether this customer can administer the portal.
    #[serde(default)]
    pub is_admin: bool,
    /// Company name shown in the portal.
    #[serde(default)]
    pub company: Option<String>,
    /// Company logo location.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Primary branding color.
    #[serde(default)]
    pub primary_color: Option<String>,
    /// Secondary branding color.
    #[serde(default)]
    pub secondary_color: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A contact message left by or for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub customer_id: i64,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message body.
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Per-customer dashboard feature toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramSettings {
    pub id: i64,
    pub customer_id: i64,
    #[serde(default = "default_true")]
    pub pv_analyse: bool,
    #[serde(default = "default_true")]
    pub ppa_cost_analysis: bool,
    #[serde(default = "default_true")]
    pub lastgang_dashboard: bool,
    #[serde(default = "default_true")]
    pub energy_heatmap: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A downloadable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub name: String,
    /// Storage path of the file.
    pub file_path: String,
    /// File type (e.g., "pdf").
    pub file_type: String,
    /// Size in bytes.
    pub file_size: i64,
    #[serde(default)]
    pub category: Option<String>,
    /// Owning customer; `None` for documents not tied to a customer.
    #[serde(default)]
    pub customer_id: Option<i64>,
    /// Visible to every customer.
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub download_count: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A customer project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub customer_id: i64,
    /// Lifecycle status, "active" by default.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A structured payload attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub id: i64,
    pub project_id: i64,
    /// Payload kind (e.g., "load_profile").
    pub data_type: String,
    /// Opaque JSON payload.
    pub data_value: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields for inserting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    pub name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub category: Option<String>,
    pub customer_id: Option<i64>,
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

fn default_status() -> String {
    "active".to_string()
}
