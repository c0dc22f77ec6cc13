use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A two-party collaboration. Its `id` doubles as the itinerary key and the
/// join code handed to the partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleSpace {
    pub id: String,
    pub creator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CoupleSpace {
    pub fn new(id: &str, creator_id: &str, created_at: DateTime<Utc>) -> Self {
        CoupleSpace {
            id: id.to_string(),
            creator_id: creator_id.to_string(),
            partner_id: None,
            created_at,
        }
    }

    /// Both collaborators have joined.
    pub fn is_active(&self) -> bool {
        !self.creator_id.is_empty() && self.partner_id.is_some()
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.creator_id == user_id || self.partner_id.as_deref() == Some(user_id)
    }
}
