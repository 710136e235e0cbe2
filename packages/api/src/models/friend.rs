//! # Friend requests
//!
//! [`FriendRequestRow`] is the raw `friend_requests` row; it contains the names of
//! both parties. [`FriendRequestDisplay`] is what the friends screen renders for a
//! given viewer. For requests the viewer sent, the projection never includes the
//! addressee's identity; only incoming requests show who is asking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FriendRequestRow {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub requester_name: Option<String>,
    pub addressee_name: Option<String>,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequestRow {
    pub const COLUMNS: &'static str =
        "id,requester_id,addressee_id,requester_name,addressee_name,status,created_at";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDirection {
    Incoming,
    Outgoing,
}

/// Read-only view of a request for one viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendRequestDisplay {
    pub id: String,
    pub direction: RequestDirection,
    pub title: String,
    /// The other party, only known for incoming requests.
    pub counterpart_id: Option<String>,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequestDisplay {
    /// Project a row for `viewer_id`. Rows that do not involve the viewer yield `None`.
    pub fn project(row: &FriendRequestRow, viewer_id: &str) -> Option<Self> {
        let (direction, title, counterpart_id) = if row.addressee_id == viewer_id {
            let name = row
                .requester_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or("Someone");
            (
                RequestDirection::Incoming,
                format!("{} wants to be friends", name),
                Some(row.requester_id.clone()),
            )
        } else if row.requester_id == viewer_id {
            (RequestDirection::Outgoing, "Request sent".to_string(), None)
        } else {
            return None;
        };
        Some(Self {
            id: row.id.clone(),
            direction,
            title,
            counterpart_id,
            status: row.status,
            created_at: row.created_at,
        })
    }

    /// Project every row, dropping the ones that do not involve the viewer.
    pub fn project_all(rows: &[FriendRequestRow], viewer_id: &str) -> Vec<Self> {
        rows.iter()
            .filter_map(|row| {
                let shown = Self::project(row, viewer_id);
                if shown.is_none() {
                    tracing::warn!(request = %row.id, "friend request does not involve viewer");
                }
                shown
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(requester: &str, addressee: &str) -> FriendRequestRow {
        FriendRequestRow {
            id: "fr-1".to_string(),
            requester_id: requester.to_string(),
            addressee_id: addressee.to_string(),
            requester_name: Some("Alex".to_string()),
            addressee_name: Some("Jordan".to_string()),
            status: FriendRequestStatus::Pending,
            created_at: "2026-10-01T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_incoming_shows_requester() {
        let shown = FriendRequestDisplay::project(&row("alex", "me"), "me").unwrap();
        assert_eq!(shown.direction, RequestDirection::Incoming);
        assert_eq!(shown.title, "Alex wants to be friends");
        assert_eq!(shown.counterpart_id.as_deref(), Some("alex"));
    }

    #[test]
    fn test_outgoing_hides_addressee() {
        let shown = FriendRequestDisplay::project(&row("me", "jordan"), "me").unwrap();
        assert_eq!(shown.direction, RequestDirection::Outgoing);
        assert_eq!(shown.title, "Request sent");
        assert_eq!(shown.counterpart_id, None);
        assert!(!format!("{:?}", shown).contains("Jordan"));
        assert!(!format!("{:?}", shown).contains("jordan"));
    }

    #[test]
    fn test_missing_requester_name() {
        let mut r = row("alex", "me");
        r.requester_name = Some("  ".to_string());
        let shown = FriendRequestDisplay::project(&r, "me").unwrap();
        assert_eq!(shown.title, "Someone wants to be friends");
    }

    #[test]
    fn test_unrelated_rows_are_dropped() {
        let rows = vec![row("alex", "me"), row("alex", "jordan"), row("me", "sam")];
        let shown = FriendRequestDisplay::project_all(&rows, "me");
        assert_eq!(shown.len(), 2);
    }
}
