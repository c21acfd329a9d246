use serde::{Deserialize, Serialize};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_LANGUAGE: &str = "en";

/// (code, display name) pairs offered in the language selectors.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("ta", "Tamil"),
    ("en", "English"),
    ("hi", "Hindi"),
    ("te", "Telugu"),
    ("ml", "Malayalam"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub category: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub language: String,
    pub thumbnail: String,
    /// Human-readable duration as shown on cards, e.g. "4m13s".
    pub duration: String,
    pub duration_sec: u64,
    pub url: String,
    pub view_count: u64,
}

/// A favorited video with the owning channel's category snapshotted at
/// favorite time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(flatten)]
    pub video: Video,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

pub fn default_categories() -> Vec<String> {
    [
        "Coding",
        "Engineering",
        "Maths",
        "Science",
        "Education",
        UNCATEGORIZED,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel {
            id: "UCrx-FlNM6BWOJvu3re6HH7w".to_string(),
            name: "4G Silver Academy தமிழ்".to_string(),
            category: "Engineering".to_string(),
            language: "ta".to_string(),
        },
        Channel {
            id: "UCwr-evhuzGZgDFrq_1pLt_A".to_string(),
            name: "Error Makes Clever".to_string(),
            category: "Coding".to_string(),
            language: "ta".to_string(),
        },
        Channel {
            id: "UC4SVo0Ue36XCfOyb5Lh1viQ".to_string(),
            name: "Bro Code".to_string(),
            category: "Coding".to_string(),
            language: "en".to_string(),
        },
        Channel {
            id: "UC8GD4akofUsOzgNpaiAisdQ".to_string(),
            name: "Mathematics kala".to_string(),
            category: "Maths".to_string(),
            language: "ta".to_string(),
        },
    ]
}
