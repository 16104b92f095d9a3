use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Entity, Record};

/// A confirmed flight, hotel or activity booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub reference: String,
    pub status: String,
    pub details: Value,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}
