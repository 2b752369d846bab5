use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// Data files use both `"id": 3` and `"id": "3"`
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl From<IdRepr> for String {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Text(text) => text,
            IdRepr::Number(number) => number.to_string(),
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdRepr::deserialize(deserializer).map(String::from)
}

fn de_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let ids = Vec::<IdRepr>::deserialize(deserializer)?;
    Ok(ids.into_iter().map(String::from).collect())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub channel_avatar: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: f64, // in seconds
    pub upload_date: Option<String>, // ISO-8601
    pub views: u64,
    pub video_url: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
}

impl Video {
    /// Names of optional fields that are absent, shown as a warning on the watch page.
    pub fn missing_optional_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.channel_name.trim().is_empty() {
            missing.push("channel");
        }
        if self.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
            missing.push("description");
        }
        if self.upload_date.is_none() {
            missing.push("upload date");
        }
        missing
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Playlist {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub status: String,
    pub last_time_update: Option<String>,
    #[serde(deserialize_with = "de_ids")]
    pub video_ids: Vec<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub is_dynamic: bool,
}

/// Entry of the static channel list shown in the sidebar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Channel {
    pub name: String,
    pub avatar: Option<String>,
    pub is_live: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub video_id: String,
    pub watched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub entry: HistoryEntry,
    pub video: Video,
}

/// Comments live only for the current session; nothing here is written back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub author: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub timestamp: Option<String>,
    pub likes: u64,
    pub dislikes: u64,
    pub is_pinned: bool,
    pub replies: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_accepts_numeric_id_and_missing_fields() {
        let video: Video =
            serde_json::from_str(r#"{"id": 7, "title": "Base tour", "views": 253000}"#).unwrap();
        assert_eq!(video.id, "7");
        assert_eq!(video.views, 253000);
        assert!(video.video_url.is_none());
        assert_eq!(
            video.missing_optional_fields(),
            vec!["channel", "description", "upload date"]
        );
    }

    #[test]
    fn playlist_reads_camel_case_fields() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"id":"liked-videos","title":"Liked videos","status":"Private",
                "lastTimeUpdate":"2025-01-20T10:30:00Z","videoIds":[1,"2",2],
                "thumbnail":null,"isDynamic":true}"#,
        )
        .unwrap();
        assert_eq!(playlist.video_ids, vec!["1", "2", "2"]);
        assert!(playlist.is_dynamic);
        assert!(playlist.thumbnail.is_none());
    }

    #[test]
    fn history_entry_uses_storage_field_names() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"videoId":"v1","watchedAt":"2025-03-01T08:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.video_id, "v1");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"videoId\":\"v1\""));
        assert!(json.contains("\"watchedAt\""));
    }
}
