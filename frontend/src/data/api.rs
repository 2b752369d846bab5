//! Readers for the static JSON files served next to the app.
//!
//! Nothing here retries. Every public loader turns a failure into `None` or
//! an empty list after logging it; callers treat that as "not found".

use crate::data::utils::{data_url, resolve_playlist};
use crate::error::LoadError;
use crate::models::{Channel, Comment, Playlist, Video};
use futures::future::join_all;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, LoadError> {
    let url = data_url(path);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    parse_json(&text)
}

pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Logs the error and maps it to `None`.
pub fn found<T>(path: &str, result: Result<T, LoadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Error fetching {path}: {e}");
            None
        }
    }
}

fn video_path(video_id: &str) -> String {
    format!("/data/videos/{}.json", urlencoding::encode(video_id))
}

fn playlist_path(playlist_id: &str) -> String {
    format!("/data/playlists/{}.json", urlencoding::encode(playlist_id))
}

pub async fn load_video_by_id(video_id: String) -> Option<Video> {
    let path = video_path(&video_id);
    found(&path, fetch_json::<Video>(&path).await)
}

/// All videos listed in the video index, in index order. Records that fail
/// to load are skipped.
pub async fn load_all_videos() -> Vec<Video> {
    let path = "/data/videos/index.json";
    let Some(ids) = found(path, fetch_json::<Vec<serde_json::Value>>(path).await) else {
        return Vec::new();
    };

    let ids: Vec<String> = ids
        .into_iter()
        .filter_map(|id| match id {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Number(number) => Some(number.to_string()),
            other => {
                log::warn!("Skipping malformed video index entry: {other}");
                None
            }
        })
        .collect();

    load_videos(&ids).await
}

pub async fn load_videos(ids: &[String]) -> Vec<Video> {
    join_all(ids.iter().cloned().map(load_video_by_id))
        .await
        .into_iter()
        .flatten()
        .collect()
}

pub async fn load_recommendations() -> Vec<Video> {
    let path = "/data/videos.json";
    found(path, fetch_json(path).await).unwrap_or_default()
}

pub async fn load_playlist_index() -> Option<Vec<String>> {
    let path = "/data/playlists/index.json";
    found(path, fetch_json(path).await)
}

/// A playlist with its id list resolved against the liked set.
pub async fn load_playlist(playlist_id: &str, liked: &[String]) -> Option<Playlist> {
    let path = playlist_path(playlist_id);
    found(&path, fetch_json::<Playlist>(&path).await).map(|playlist| resolve_playlist(playlist, liked))
}

pub async fn load_playlists(liked: &[String]) -> Option<Vec<Playlist>> {
    let index = load_playlist_index().await?;
    let playlists = join_all(index.iter().map(|id| load_playlist(id, liked))).await;
    Some(playlists.into_iter().flatten().collect())
}

pub async fn load_channel_list() -> Vec<Channel> {
    let path = "/data/subscriptions.json";
    found(path, fetch_json(path).await).unwrap_or_default()
}

/// Comments are optional data; a missing file just means no comments.
pub async fn load_comments(video_id: &str) -> Vec<Comment> {
    let path = format!("/data/comments/{}.json", urlencoding::encode(video_id));
    match fetch_json(&path).await {
        Ok(comments) => comments,
        Err(e) => {
            log::debug!("No comments for '{video_id}': {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = parse_json::<Video>("{\"id\": ");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn failures_become_not_found() {
        assert_eq!(found::<Video>("/data/videos/404.json", Err(LoadError::Status(404))), None);
        assert_eq!(
            found::<Video>("/data/videos/x.json", Err(LoadError::Network("offline".into()))),
            None
        );
        assert_eq!(found("/data/x.json", Ok(3)), Some(3));
    }

    #[test]
    fn record_paths_encode_ids() {
        assert_eq!(video_path("12"), "/data/videos/12.json");
        assert_eq!(video_path("a b/c"), "/data/videos/a%20b%2Fc.json");
        assert_eq!(playlist_path("liked-videos"), "/data/playlists/liked-videos.json");
    }
}
