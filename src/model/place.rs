use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{Entity, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub city: String,
    pub country: String,
    pub rating: f64,
    pub cover_photo: String,
    pub media: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub summary: String,
    pub checkins_count: u64,
    pub saved_count: u64,
    pub category: String,
    #[serde(flatten)]
    pub extra: Record,
}

impl Place {
    /// The short place block embedded next to check-ins.
    pub fn card(&self) -> Value {
        json!({
            "name": self.name,
            "city": self.city,
            "cover_photo": self.cover_photo,
        })
    }
}
