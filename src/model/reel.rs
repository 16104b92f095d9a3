use serde::{Deserialize, Serialize};

use crate::{Entity, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Reel {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "videoUrl")]
    pub video_url: String,
    pub thumbnail: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
    pub creator_id: String,
    pub duration: u64,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}
