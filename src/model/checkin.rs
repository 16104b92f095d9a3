use serde::{Deserialize, Serialize};

use crate::{Entity, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Checkin {
    pub id: String,
    pub user_id: String,
    pub place_id: String,
    /// 1 to 5; enforced by the handlers, not the store.
    pub rating: u8,
    pub note: Option<String>,
    pub photos: Vec<String>,
    pub likes: u64,
    pub comments: u64,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}
