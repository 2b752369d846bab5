use super::notifier::ChangeNotifier;
use super::{
    read_json, write_json, BrowserStore, KeyValueStore, DISLIKED_VIDEOS_KEY, LIKED_VIDEOS_KEY,
    SUBSCRIBED_CHANNELS_KEY,
};
use crate::error::StorageError;
use std::rc::Rc;

/// Liked / disliked videos and subscribed channels.
///
/// Every operation re-reads the stored value right before writing. Two tabs
/// editing at once is last-writer-wins.
pub struct InteractionStore<S: KeyValueStore = BrowserStore> {
    store: S,
    notifier: Option<Rc<ChangeNotifier>>,
}

impl InteractionStore<BrowserStore> {
    pub fn browser(notifier: Rc<ChangeNotifier>) -> Self {
        Self::with_notifier(BrowserStore, notifier)
    }
}

impl<S: KeyValueStore> InteractionStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    pub fn with_notifier(store: S, notifier: Rc<ChangeNotifier>) -> Self {
        Self {
            store,
            notifier: Some(notifier),
        }
    }

    fn read_set(&self, key: &str) -> Vec<String> {
        read_json(&self.store, key)
    }

    /// Returns whether the id was newly inserted.
    fn insert(&self, key: &str, id: &str) -> Result<bool, StorageError> {
        let mut items = self.read_set(key);
        if items.iter().any(|item| item == id) {
            return Ok(false);
        }
        items.push(id.to_string());
        write_json(&self.store, key, &items)?;
        Ok(true)
    }

    /// Returns whether the id was present.
    fn delete(&self, key: &str, id: &str) -> Result<bool, StorageError> {
        let mut items = self.read_set(key);
        let before = items.len();
        items.retain(|item| item != id);
        if items.len() == before {
            return Ok(false);
        }
        write_json(&self.store, key, &items)?;
        Ok(true)
    }

    fn contains(&self, key: &str, id: &str) -> bool {
        self.read_set(key).iter().any(|item| item == id)
    }

    /// Clears the opposite set before inserting, so a failed write can never
    /// leave the id in both sets.
    fn add_exclusive(&self, key: &str, opposite: &str, id: &str) -> bool {
        let result = self
            .delete(opposite, id)
            .and_then(|_| self.insert(key, id));
        match result {
            Ok(_) => true,
            Err(e) => {
                log::error!("Error adding '{id}' to {key}: {e}");
                false
            }
        }
    }

    fn remove_logged(&self, key: &str, id: &str) -> bool {
        match self.delete(key, id) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Error removing '{id}' from {key}: {e}");
                false
            }
        }
    }

    // Liked videos

    pub fn liked_videos(&self) -> Vec<String> {
        self.read_set(LIKED_VIDEOS_KEY)
    }

    pub fn add_liked_video(&self, video_id: &str) -> bool {
        self.add_exclusive(LIKED_VIDEOS_KEY, DISLIKED_VIDEOS_KEY, video_id)
    }

    pub fn remove_liked_video(&self, video_id: &str) -> bool {
        self.remove_logged(LIKED_VIDEOS_KEY, video_id)
    }

    pub fn is_video_liked(&self, video_id: &str) -> bool {
        self.contains(LIKED_VIDEOS_KEY, video_id)
    }

    /// Returns whether the video is liked afterwards.
    pub fn toggle_like_video(&self, video_id: &str) -> bool {
        if self.is_video_liked(video_id) {
            self.remove_liked_video(video_id);
        } else {
            self.add_liked_video(video_id);
        }
        self.is_video_liked(video_id)
    }

    // Disliked videos

    pub fn disliked_videos(&self) -> Vec<String> {
        self.read_set(DISLIKED_VIDEOS_KEY)
    }

    pub fn add_disliked_video(&self, video_id: &str) -> bool {
        self.add_exclusive(DISLIKED_VIDEOS_KEY, LIKED_VIDEOS_KEY, video_id)
    }

    pub fn remove_disliked_video(&self, video_id: &str) -> bool {
        self.remove_logged(DISLIKED_VIDEOS_KEY, video_id)
    }

    pub fn is_video_disliked(&self, video_id: &str) -> bool {
        self.contains(DISLIKED_VIDEOS_KEY, video_id)
    }

    /// Returns whether the video is disliked afterwards.
    pub fn toggle_dislike_video(&self, video_id: &str) -> bool {
        if self.is_video_disliked(video_id) {
            self.remove_disliked_video(video_id);
        } else {
            self.add_disliked_video(video_id);
        }
        self.is_video_disliked(video_id)
    }

    // Subscribed channels

    pub fn subscribed_channels(&self) -> Vec<String> {
        self.read_set(SUBSCRIBED_CHANNELS_KEY)
    }

    pub fn add_subscribed_channel(&self, channel_name: &str) -> bool {
        match self.insert(SUBSCRIBED_CHANNELS_KEY, channel_name) {
            Ok(changed) => {
                if changed {
                    self.notify_subscription_change();
                }
                true
            }
            Err(e) => {
                log::error!("Error adding subscribed channel '{channel_name}': {e}");
                false
            }
        }
    }

    pub fn remove_subscribed_channel(&self, channel_name: &str) -> bool {
        match self.delete(SUBSCRIBED_CHANNELS_KEY, channel_name) {
            Ok(changed) => {
                if changed {
                    self.notify_subscription_change();
                }
                true
            }
            Err(e) => {
                log::error!("Error removing subscribed channel '{channel_name}': {e}");
                false
            }
        }
    }

    pub fn is_channel_subscribed(&self, channel_name: &str) -> bool {
        self.contains(SUBSCRIBED_CHANNELS_KEY, channel_name)
    }

    /// Returns whether the channel is subscribed afterwards.
    pub fn toggle_subscribe_channel(&self, channel_name: &str) -> bool {
        if self.is_channel_subscribed(channel_name) {
            self.remove_subscribed_channel(channel_name);
        } else {
            self.add_subscribed_channel(channel_name);
        }
        self.is_channel_subscribed(channel_name)
    }

    fn notify_subscription_change(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    fn store() -> InteractionStore<MemoryStore> {
        InteractionStore::new(MemoryStore::new())
    }

    #[test]
    fn like_then_dislike_moves_video_between_sets() {
        let interactions = store();

        assert!(interactions.toggle_like_video("v1"));
        assert!(interactions.is_video_liked("v1"));

        assert!(interactions.toggle_dislike_video("v1"));
        assert!(!interactions.is_video_liked("v1"));
        assert!(interactions.is_video_disliked("v1"));

        assert!(interactions.toggle_like_video("v1"));
        assert!(!interactions.is_video_disliked("v1"));
    }

    #[test]
    fn liked_and_disliked_stay_disjoint() {
        let interactions = store();
        let ids = ["a", "b", "c", "d"];
        for (step, id) in ids.iter().cycle().take(20).enumerate() {
            if step % 3 == 0 {
                interactions.toggle_dislike_video(id);
            } else {
                interactions.toggle_like_video(id);
            }
            let liked = interactions.liked_videos();
            let disliked = interactions.disliked_videos();
            assert!(liked.iter().all(|v| !disliked.contains(v)));
        }
    }

    #[test]
    fn adding_twice_does_not_duplicate() {
        let interactions = store();
        interactions.add_liked_video("v1");
        interactions.add_liked_video("v1");
        assert_eq!(interactions.liked_videos(), vec!["v1"]);
    }

    #[test]
    fn removing_absent_id_is_a_no_op() {
        let interactions = store();
        assert!(interactions.remove_liked_video("ghost"));
        assert!(interactions.remove_subscribed_channel("ghost"));
        assert!(interactions.liked_videos().is_empty());
    }

    #[test]
    fn subscription_toggle_is_idempotent_in_pairs() {
        let interactions = store();
        interactions.add_subscribed_channel("Channel B");
        let before = interactions.subscribed_channels();

        interactions.toggle_subscribe_channel("Channel A");
        interactions.toggle_subscribe_channel("Channel A");

        assert_eq!(interactions.subscribed_channels(), before);
    }

    #[test]
    fn odd_number_of_toggles_after_subscribe_leaves_subscribed() {
        let interactions = store();
        interactions.add_subscribed_channel("Channel A");
        interactions.toggle_subscribe_channel("Channel A");
        interactions.toggle_subscribe_channel("Channel A");
        assert!(interactions.is_channel_subscribed("Channel A"));
        assert_eq!(interactions.subscribed_channels(), vec!["Channel A"]);
    }

    #[test]
    fn subscription_changes_notify_listeners() {
        let notifier = ChangeNotifier::new();
        let interactions = InteractionStore::with_notifier(MemoryStore::new(), notifier.clone());
        let notified = Rc::new(Cell::new(0));
        let _subscription = {
            let notified = notified.clone();
            notifier.subscribe(move || notified.set(notified.get() + 1))
        };

        interactions.toggle_subscribe_channel("Channel A");
        interactions.add_subscribed_channel("Channel A");
        interactions.toggle_subscribe_channel("Channel A");
        interactions.toggle_like_video("v1");

        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn toggle_reads_changes_made_through_another_handle() {
        let shared = MemoryStore::new();
        let tab_a = InteractionStore::new(shared.clone());
        let tab_b = InteractionStore::new(shared);

        assert!(tab_a.toggle_like_video("v1"));
        // tab_b never saw the like, but toggling reads current storage
        assert!(!tab_b.toggle_like_video("v1"));
        assert!(!tab_a.is_video_liked("v1"));
    }

    #[test]
    fn corrupted_storage_reads_as_empty() {
        let memory = MemoryStore::new()
            .with_raw(LIKED_VIDEOS_KEY, "not json")
            .with_raw(DISLIKED_VIDEOS_KEY, "[1, 2")
            .with_raw(SUBSCRIBED_CHANNELS_KEY, "null");
        let interactions = InteractionStore::new(memory);

        assert!(interactions.liked_videos().is_empty());
        assert!(interactions.disliked_videos().is_empty());
        assert!(interactions.subscribed_channels().is_empty());
        assert!(!interactions.is_video_liked("v1"));
    }

    #[test]
    fn corrupted_value_is_replaced_on_next_write() {
        let memory = MemoryStore::new().with_raw(LIKED_VIDEOS_KEY, "{{{");
        let interactions = InteractionStore::new(memory.clone());
        assert!(interactions.add_liked_video("v1"));
        assert_eq!(memory.raw(LIKED_VIDEOS_KEY).as_deref(), Some(r#"["v1"]"#));
    }

    #[test]
    fn failed_opposite_write_keeps_sets_disjoint() {
        let memory = MemoryStore::new();
        let interactions = InteractionStore::new(memory.clone());
        assert!(interactions.add_disliked_video("v1"));
        memory.fail_writes_to(DISLIKED_VIDEOS_KEY);

        assert!(!interactions.toggle_like_video("v1"));
        assert!(interactions.liked_videos().is_empty());
        assert_eq!(interactions.disliked_videos(), vec!["v1"]);
    }

    #[test]
    fn failed_write_reports_false_and_keeps_state() {
        let memory = MemoryStore::new();
        let interactions = InteractionStore::new(memory.clone());
        memory.set_read_only(true);

        assert!(!interactions.add_liked_video("v1"));
        assert!(!interactions.toggle_like_video("v1"));
        assert!(interactions.liked_videos().is_empty());
    }
}
