use super::{read_json, write_json, BrowserStore, KeyValueStore, HISTORY_PAUSED_KEY, WATCH_HISTORY_KEY};
use crate::models::{HistoryEntry, HistoryItem, Video};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use futures::future::join_all;
use std::future::Future;

pub const HISTORY_LIMIT: usize = 1000;

/// Watch history, stored oldest first.
///
/// One entry per video: watching it again moves the entry to the end. At
/// most [`HISTORY_LIMIT`] entries are kept, the oldest ones are dropped.
pub struct WatchHistory<S: KeyValueStore = BrowserStore> {
    store: S,
}

impl WatchHistory<BrowserStore> {
    pub fn browser() -> Self {
        Self::new(BrowserStore)
    }
}

impl<S: KeyValueStore> WatchHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        read_json(&self.store, WATCH_HISTORY_KEY)
    }

    pub fn add(&self, video_id: &str) {
        self.add_at(video_id, Utc::now());
    }

    pub fn add_at(&self, video_id: &str, watched_at: DateTime<Utc>) {
        if self.is_paused() {
            log::debug!("History paused, not recording '{video_id}'");
            return;
        }

        let mut history = self.entries();
        history.retain(|entry| entry.video_id != video_id);
        history.push(HistoryEntry {
            video_id: video_id.to_string(),
            watched_at,
        });
        if history.len() > HISTORY_LIMIT {
            let overflow = history.len() - HISTORY_LIMIT;
            history.drain(..overflow);
        }

        if let Err(e) = write_json(&self.store, WATCH_HISTORY_KEY, &history) {
            log::error!("Error adding to watch history: {e}");
        }
    }

    pub fn recent_first(&self) -> Vec<HistoryEntry> {
        let mut history = self.entries();
        history.reverse();
        history
    }

    /// Most recent first, each entry paired with its video. Entries whose
    /// video can't be fetched are left out of the result but stay stored.
    pub async fn with_details<F, Fut>(&self, fetch: F) -> Vec<HistoryItem>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Option<Video>>,
    {
        let entries = self.recent_first();
        let videos = join_all(entries.iter().map(|entry| fetch(entry.video_id.clone()))).await;

        entries
            .into_iter()
            .zip(videos)
            .filter_map(|(entry, video)| video.map(|video| HistoryItem { entry, video }))
            .collect()
    }

    pub fn remove(&self, video_id: &str, watched_at: &DateTime<Utc>) {
        let mut history = self.entries();
        history.retain(|entry| !(entry.video_id == video_id && entry.watched_at == *watched_at));
        if let Err(e) = write_json(&self.store, WATCH_HISTORY_KEY, &history) {
            log::error!("Error removing from watch history: {e}");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove_item(WATCH_HISTORY_KEY) {
            log::error!("Error clearing watch history: {e}");
        }
    }

    pub fn is_paused(&self) -> bool {
        read_json(&self.store, HISTORY_PAUSED_KEY)
    }

    pub fn set_paused(&self, paused: bool) {
        if let Err(e) = write_json(&self.store, HISTORY_PAUSED_KEY, &paused) {
            log::error!("Error saving history pause state: {e}");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryGroup {
    pub label: String,
    pub items: Vec<HistoryItem>,
}

/// Groups items by calendar day in the time zone of `now`, keeping the
/// order of the input.
pub fn group_by_day<Tz: TimeZone>(items: &[HistoryItem], now: &DateTime<Tz>) -> Vec<HistoryGroup> {
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    let mut groups: Vec<HistoryGroup> = Vec::new();

    for item in items {
        let day = item.entry.watched_at.with_timezone(&now.timezone()).date_naive();
        let label = if day == today {
            "Today".to_string()
        } else if day == yesterday {
            "Yesterday".to_string()
        } else if day.year() == today.year() {
            day.format("%B %-d").to_string()
        } else {
            day.format("%B %-d, %Y").to_string()
        };

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(HistoryGroup {
                label,
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use futures::executor::block_on;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn history() -> (WatchHistory<MemoryStore>, MemoryStore) {
        let memory = MemoryStore::new();
        (WatchHistory::new(memory.clone()), memory)
    }

    #[test]
    fn rewatching_keeps_one_entry_with_latest_time() {
        let (history, _) = history();
        history.add_at("v1", at(1));
        history.add_at("v1", at(2));
        history.add_at("v1", at(3));

        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].watched_at, at(3));
    }

    #[test]
    fn rewatching_moves_entry_to_most_recent() {
        let (history, _) = history();
        history.add_at("v1", at(1));
        history.add_at("v2", at(2));
        history.add_at("v1", at(3));

        let ids: Vec<_> = history.recent_first().into_iter().map(|e| e.video_id).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[test]
    fn cap_drops_oldest_entries() {
        let (history, _) = history();
        for i in 0..HISTORY_LIMIT {
            history.add_at(&format!("v{i}"), at(i as i64));
        }
        assert_eq!(history.entries().len(), HISTORY_LIMIT);

        history.add_at("newest", at(HISTORY_LIMIT as i64));

        let entries = history.entries();
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert!(entries.iter().all(|e| e.video_id != "v0"));
        assert_eq!(entries[0].video_id, "v1");
        assert_eq!(entries[HISTORY_LIMIT - 1].video_id, "newest");
    }

    #[test]
    fn paused_history_is_left_untouched() {
        let (history, memory) = history();
        history.add_at("v1", at(1));
        let before = memory.raw(WATCH_HISTORY_KEY);

        history.set_paused(true);
        history.add_at("v9", at(2));

        assert!(history.is_paused());
        assert_eq!(memory.raw(WATCH_HISTORY_KEY), before);

        history.set_paused(false);
        history.add_at("v9", at(3));
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn pause_flag_uses_plain_boolean_text() {
        let memory = MemoryStore::new().with_raw(HISTORY_PAUSED_KEY, "true");
        let history = WatchHistory::new(memory.clone());
        assert!(history.is_paused());
        history.set_paused(false);
        assert_eq!(memory.raw(HISTORY_PAUSED_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn remove_matches_id_and_time() {
        let (history, _) = history();
        history.add_at("v1", at(1));
        history.add_at("v2", at(2));

        history.remove("v1", &at(99));
        assert_eq!(history.entries().len(), 2);

        history.remove("v1", &at(1));
        let ids: Vec<_> = history.entries().into_iter().map(|e| e.video_id).collect();
        assert_eq!(ids, vec!["v2"]);
    }

    #[test]
    fn clear_does_not_touch_pause_flag() {
        let (history, memory) = history();
        history.add_at("v1", at(1));
        history.set_paused(true);
        history.clear();

        assert!(history.entries().is_empty());
        assert!(memory.raw(WATCH_HISTORY_KEY).is_none());
        assert!(history.is_paused());
    }

    #[test]
    fn corrupted_history_reads_as_empty() {
        let memory = MemoryStore::new().with_raw(WATCH_HISTORY_KEY, r#"[{"videoId":"v1"}]"#);
        let history = WatchHistory::new(memory);
        assert!(history.entries().is_empty());
        history.add_at("v2", at(1));
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn details_are_most_recent_first_and_skip_missing_videos() {
        let (history, _) = history();
        history.add_at("v1", at(1));
        history.add_at("gone", at(2));
        history.add_at("v3", at(3));

        let items = block_on(history.with_details(|id| async move {
            (id != "gone").then(|| Video {
                id: id.clone(),
                title: format!("Video {id}"),
                ..Video::default()
            })
        }));

        let ids: Vec<_> = items.iter().map(|item| item.video.id.as_str()).collect();
        assert_eq!(ids, vec!["v3", "v1"]);
        // Dropped from the result only
        assert_eq!(history.entries().len(), 3);
    }

    #[test]
    fn groups_by_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let item = |id: &str, watched_at: DateTime<Utc>| HistoryItem {
            entry: HistoryEntry {
                video_id: id.to_string(),
                watched_at,
            },
            video: Video::default(),
        };
        let items = vec![
            item("a", Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()),
            item("b", Utc.with_ymd_and_hms(2025, 3, 10, 1, 0, 0).unwrap()),
            item("c", Utc.with_ymd_and_hms(2025, 3, 9, 23, 0, 0).unwrap()),
            item("d", Utc.with_ymd_and_hms(2025, 2, 14, 8, 0, 0).unwrap()),
            item("e", Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap()),
        ];

        let groups = group_by_day(&items, &now);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "February 14", "December 31, 2024"]);
        assert_eq!(groups[0].items.len(), 2);
    }
}
