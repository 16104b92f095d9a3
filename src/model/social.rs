use serde::{Deserialize, Serialize};

use crate::{Entity, Record};

/// A comment on a reel or a wall post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub content: String,
    pub likes: u64,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}

/// A post on a user's wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub media: Vec<String>,
    pub likes: u64,
    pub comments: u64,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}
