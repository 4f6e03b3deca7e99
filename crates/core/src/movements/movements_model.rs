use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A free-text audit entry attached to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub owner_id: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub owner_id: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl NewMovement {
    pub fn new(
        owner_id: impl Into<String>,
        description: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            description: description.into(),
            created_at,
        }
    }
}
