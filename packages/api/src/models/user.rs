//! # User records
//!
//! - [`UserInfo`]: the account returned by the auth service after sign-up. The
//!   auth service response carries many more fields than the client needs, so this
//!   type ignores unknown fields; it is the only record that does.
//! - [`UserSummary`]: a `profiles` search hit (id and display name only).
//!
//! [`UserSummary::display_name`] falls back to a neutral label so search results
//! never render an empty row.

use serde::{Deserialize, Serialize};

/// Account created by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Search result from the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UserSummary {
    pub id: String,
    pub display_name: Option<String>,
}

impl UserSummary {
    pub const COLUMNS: &'static str = "id,display_name";

    /// Get display name, falling back to a neutral label.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unnamed user")
    }
}
