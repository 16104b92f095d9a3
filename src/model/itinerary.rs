use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Entity, Record};

/// A curated itinerary. Day plans are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Entity)]
#[entity(collection = "itineraries")]
#[serde(default)]
pub struct Itinerary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub duration: String,
    #[serde(rename = "dateRange")]
    pub date_range: String,
    #[serde(rename = "heroImage")]
    pub hero_image: String,
    /// Numbers or display strings such as `"1,450"`.
    pub rating: Value,
    pub price: Value,
    pub currency: String,
    pub days: Vec<Value>,
    #[serde(flatten)]
    pub extra: Record,
}

/// Headline fields shown in the list view.
const SUMMARY_FIELDS: [&str; 9] = [
    "id", "title", "location", "duration", "dateRange", "heroImage", "rating", "price", "currency",
];

impl Itinerary {
    /// The list-view shape of a stored itinerary: headline fields copied
    /// as stored, `days` emptied, everything else dropped.
    pub fn summarize(record: &Record) -> Record {
        let mut summary: Record = SUMMARY_FIELDS
            .iter()
            .filter_map(|field| {
                record
                    .get(*field)
                    .map(|value| (field.to_string(), value.clone()))
            })
            .collect();
        summary.insert("days".into(), Value::Array(Vec::new()));
        summary
    }
}
