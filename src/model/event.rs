use serde::{Deserialize, Serialize};

use crate::{Entity, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub price: f64,
    pub currency: String,
    pub attendees: u64,
    pub max_attendees: u64,
    pub cover_photo: String,
    pub organizer_id: String,
    pub category: String,
    #[serde(flatten)]
    pub extra: Record,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            location: String::new(),
            date: String::new(),
            price: 0.0,
            currency: "USD".into(),
            attendees: 0,
            max_attendees: 999,
            cover_photo: String::new(),
            organizer_id: String::new(),
            category: String::new(),
            extra: Record::new(),
        }
    }
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.attendees >= self.max_attendees
    }
}
