use serde::{Deserialize, Serialize};

use crate::{Entity, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripActivity {
    pub time: String,
    pub activity: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    pub day: u32,
    pub title: String,
    pub activities: Vec<TripActivity>,
}

/// A user's planned trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[serde(default)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<TripDay>,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Record,
}
