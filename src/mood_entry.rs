use chrono::Local;
use serde::{Deserialize, Serialize};

// Ordered worst-to-best; zero-based position on this list is the ordinal
// value used for averaging.
pub const MOOD_SCALE: [&str; 5] = ["😞", "😐", "😊", "😄", "🚀"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub name: String,
    pub mood: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMood {
    pub name: String,
    pub mood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl NewMood {
    pub fn new(name: impl Into<String>, mood: impl Into<String>) -> Self {
        NewMood {
            name: name.into(),
            mood: mood.into(),
            timestamp: None,
        }
    }
}

pub fn mood_label(mood: &str) -> &'static str {
    match mood {
        "😞" => "Awful",
        "😐" => "Meh",
        "😊" => "Good",
        "😄" => "Great",
        "🚀" => "Fantastic",
        _ => "",
    }
}

pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
