//! Frontend Models
//!
//! Rows shown in the demo list.

use serde::{Deserialize, Serialize};

const STARTER_ENTRIES: &str = include_str!("../assets/items.json");

/// One list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Entries bundled with the page
pub fn starter_entries() -> Result<Vec<Entry>, serde_json::Error> {
    serde_json::from_str(STARTER_ENTRIES)
}
