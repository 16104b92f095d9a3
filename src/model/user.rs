use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Coordinates;
use crate::{Entity, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub visited_places: u64,
    pub checkins: u64,
    pub cities: u64,
    pub followers: u64,
    pub following: u64,
    pub likes: u64,
    pub rated_places: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub badges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

impl User {
    /// The short author block embedded next to posts, check-ins and comments.
    pub fn card(&self) -> Value {
        json!({
            "username": self.username,
            "avatar": self.avatar,
            "full_name": self.full_name,
        })
    }
}
