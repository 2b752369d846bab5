use crate::config::LIKED_PLAYLIST_ID;
use crate::env_variable_utils::BASE_PATH;
use crate::models::{Playlist, Video};
use std::collections::HashSet;

pub fn data_url(path: &str) -> String {
    join_data_url(&BASE_PATH, path)
}

pub fn join_data_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Thumbnails and avatars may be absolute URLs, data URIs or paths under
/// the app's base path.
pub fn asset_url(path: &str) -> String {
    if path.contains("://") || path.starts_with("data:") {
        path.to_string()
    } else {
        data_url(path)
    }
}

/// Removes repeated ids, keeping the first occurrence.
pub fn unique_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// The dynamic liked-videos playlist takes its ids from the liked set.
pub fn resolve_playlist(mut playlist: Playlist, liked: &[String]) -> Playlist {
    if playlist.is_dynamic && playlist.id == LIKED_PLAYLIST_ID {
        playlist.video_ids = liked.to_vec();
    }
    playlist.video_ids = unique_ids(playlist.video_ids);
    playlist
}

/// Relabels the feed with subscribed channel names, cycling through them.
pub fn assign_subscribed_channels(videos: Vec<Video>, channels: &[String]) -> Vec<Video> {
    if channels.is_empty() {
        return Vec::new();
    }
    videos
        .into_iter()
        .enumerate()
        .map(|(index, video)| Video {
            id: format!("sub-{}-{}", video.id, index),
            channel_name: channels[index % channels.len()].clone(),
            ..video
        })
        .collect()
}

/// Case-insensitive match on title and channel name. A blank query keeps all.
pub fn filter_videos(videos: &[Video], query: &str) -> Vec<Video> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return videos.to_vec();
    }
    videos
        .iter()
        .filter(|video| {
            video.title.to_lowercase().contains(&query)
                || video.channel_name.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Feed identifiers may carry a paging suffix (`7-page-2-3`, `sub-7-0`);
/// this recovers the id of the underlying record.
pub fn source_video_id(feed_id: &str) -> &str {
    let id = feed_id.strip_prefix("sub-").map_or(feed_id, |rest| {
        rest.rsplit_once('-').map_or(rest, |(id, _)| id)
    });
    id.split("-page-").next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, channel: &str) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            channel_name: channel.to_string(),
            ..Video::default()
        }
    }

    #[test]
    fn joins_base_and_path() {
        assert_eq!(join_data_url("", "/data/videos.json"), "/data/videos.json");
        assert_eq!(join_data_url("/app", "/data/videos.json"), "/app/data/videos.json");
        assert_eq!(join_data_url("/app", "data/x.json"), "/app/data/x.json");
    }

    #[test]
    fn external_assets_are_left_alone() {
        assert_eq!(asset_url("https://i.ytimg.com/vi/x/hq.jpg"), "https://i.ytimg.com/vi/x/hq.jpg");
        assert_eq!(asset_url("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn liked_playlist_uses_liked_set() {
        let playlist = Playlist {
            id: LIKED_PLAYLIST_ID.to_string(),
            video_ids: vec!["old".to_string()],
            is_dynamic: true,
            ..Playlist::default()
        };
        let liked = vec!["3".to_string(), "1".to_string(), "3".to_string()];
        let resolved = resolve_playlist(playlist, &liked);
        assert_eq!(resolved.video_ids, vec!["3", "1"]);
    }

    #[test]
    fn static_playlist_is_only_deduplicated() {
        let playlist = Playlist {
            id: "mix".to_string(),
            video_ids: vec!["2".into(), "5".into(), "2".into()],
            ..Playlist::default()
        };
        let resolved = resolve_playlist(playlist, &["9".to_string()]);
        assert_eq!(resolved.video_ids, vec!["2", "5"]);
    }

    #[test]
    fn subscribed_channels_are_assigned_in_turn() {
        let videos = vec![video("1", "a", "x"), video("2", "b", "x"), video("3", "c", "x")];
        let channels = vec!["Channel A".to_string(), "Channel B".to_string()];
        let relabelled = assign_subscribed_channels(videos, &channels);

        let names: Vec<_> = relabelled.iter().map(|v| v.channel_name.as_str()).collect();
        assert_eq!(names, vec!["Channel A", "Channel B", "Channel A"]);
        assert_eq!(relabelled[2].id, "sub-3-2");
        assert!(assign_subscribed_channels(vec![video("1", "a", "x")], &[]).is_empty());
    }

    #[test]
    fn filters_by_title_or_channel() {
        let videos = vec![
            video("1", "Minecraft combat", "Wermbu"),
            video("2", "Rust in 100 seconds", "Fireship"),
        ];
        assert_eq!(filter_videos(&videos, "  ").len(), 2);
        assert_eq!(filter_videos(&videos, "FIRE")[0].id, "2");
        assert_eq!(filter_videos(&videos, "combat")[0].id, "1");
        assert!(filter_videos(&videos, "cooking").is_empty());
    }

    #[test]
    fn recovers_source_ids() {
        assert_eq!(source_video_id("7"), "7");
        assert_eq!(source_video_id("7-page-2-3"), "7");
        assert_eq!(source_video_id("sub-7-4"), "7");
        assert_eq!(source_video_id("sub-7-page-1-0-12"), "7");
    }
}
