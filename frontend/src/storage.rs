//! Browser-persisted user preferences.
//!
//! Everything the user customizes lives in local storage as JSON, keyed per
//! concern. Missing or corrupt entries fall back to defaults so a fresh or
//! broken profile never blocks the app.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{default_categories, default_channels, Channel, Favorite, Video, UNCATEGORIZED};

pub const CHANNELS_KEY: &str = "userChannels";
pub const CATEGORIES_KEY: &str = "userCategories";
pub const FAVORITES_KEY: &str = "favoriteVideos";
pub const HISTORY_KEY: &str = "searchHistory";
pub const TOKEN_KEY: &str = "token";

pub const HISTORY_LIMIT: usize = 5;

/// Minimal key-value surface over whatever backs persistence.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage` backing. Storage can be unavailable (private
/// browsing, disabled cookies); every miss reads as absent.
#[derive(Clone, Default)]
pub struct LocalStorageKv;

impl LocalStorageKv {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KvStore for LocalStorageKv {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to persist {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Clone, Default)]
pub struct PreferenceStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> PreferenceStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn load_or<T: DeserializeOwned>(&self, key: &str, fallback: impl FnOnce() -> T) -> T {
        self.kv
            .get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(fallback)
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.kv.set(key, &raw),
            Err(e) => log::warn!("Failed to encode {key}: {e}"),
        }
    }

    pub fn load_channels(&self) -> Vec<Channel> {
        self.load_or(CHANNELS_KEY, default_channels)
    }

    pub fn save_channels(&self, channels: &[Channel]) {
        self.save(CHANNELS_KEY, &channels);
    }

    pub fn load_categories(&self) -> Vec<String> {
        self.load_or(CATEGORIES_KEY, default_categories)
    }

    pub fn save_categories(&self, categories: &[String]) {
        self.save(CATEGORIES_KEY, &categories);
    }

    pub fn load_favorites(&self) -> Vec<Favorite> {
        self.load_or(FAVORITES_KEY, Vec::new)
    }

    pub fn save_favorites(&self, favorites: &[Favorite]) {
        self.save(FAVORITES_KEY, &favorites);
    }

    pub fn load_history(&self) -> Vec<String> {
        self.load_or(HISTORY_KEY, Vec::new)
    }

    pub fn save_history(&self, history: &[String]) {
        self.save(HISTORY_KEY, &history);
    }

    /// Deleting categories touches both the category list and every channel
    /// assigned to a deleted category; both keys are written together.
    pub fn persist_category_deletion(&self, categories: &[String], channels: &[Channel]) {
        self.save_categories(categories);
        self.save_channels(channels);
    }

    pub fn token(&self) -> Option<String> {
        self.kv.get(TOKEN_KEY)
    }

    pub fn save_token(&self, token: &str) {
        self.kv.set(TOKEN_KEY, token);
    }

    pub fn clear_token(&self) {
        self.kv.remove(TOKEN_KEY);
    }
}

/// Prepend a query, dropping any earlier copy of it, capped at
/// [`HISTORY_LIMIT`] entries.
pub fn push_history(history: &[String], query: &str) -> Vec<String> {
    let mut next: Vec<String> = history.iter().filter(|q| *q != query).cloned().collect();
    next.insert(0, query.to_string());
    next.truncate(HISTORY_LIMIT);
    next
}

/// Snapshot the video into the favorites list, stamped with the category of
/// the channel it came from. The channel is matched by display name because
/// that is what the video carries.
pub fn add_favorite(favorites: &[Favorite], video: &Video, channels: &[Channel]) -> Vec<Favorite> {
    if favorites.iter().any(|f| f.video.id == video.id) {
        return favorites.to_vec();
    }
    let category = channels
        .iter()
        .find(|c| c.name == video.channel)
        .map(|c| c.category.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    let mut next = favorites.to_vec();
    next.push(Favorite {
        video: video.clone(),
        category,
    });
    next
}

pub fn remove_favorite(favorites: &[Favorite], video_id: &str) -> Vec<Favorite> {
    favorites
        .iter()
        .filter(|f| f.video.id != video_id)
        .cloned()
        .collect()
}

/// Remove the named categories and move channels that used them back to
/// [`UNCATEGORIZED`].
pub fn delete_categories(
    categories: &[String],
    channels: &[Channel],
    to_delete: &[String],
) -> (Vec<String>, Vec<Channel>) {
    let kept: Vec<String> = categories
        .iter()
        .filter(|c| !to_delete.contains(c))
        .cloned()
        .collect();
    let reassigned: Vec<Channel> = channels
        .iter()
        .map(|ch| {
            let mut ch = ch.clone();
            if to_delete.contains(&ch.category) {
                ch.category = UNCATEGORIZED.to_string();
            }
            ch
        })
        .collect();
    (kept, reassigned)
}

pub fn assign_category(channels: &[Channel], channel_id: &str, category: &str) -> Vec<Channel> {
    channels
        .iter()
        .map(|ch| {
            let mut ch = ch.clone();
            if ch.id == channel_id {
                ch.category = category.to_string();
            }
            ch
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::models::DEFAULT_LANGUAGE;

    #[derive(Default)]
    struct MemoryKv {
        map: RefCell<HashMap<String, String>>,
    }

    impl KvStore for MemoryKv {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.map.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.map.borrow_mut().remove(key);
        }
    }

    fn video(id: &str, channel: &str) -> Video {
        Video {
            id: id.to_string(),
            title: format!("video {id}"),
            channel: channel.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            thumbnail: String::new(),
            duration: "3m".to_string(),
            duration_sec: 180,
            url: format!("https://www.youtube.com/watch?v={id}"),
            view_count: 10,
        }
    }

    fn channel(id: &str, name: &str, category: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            language: "en".to_string(),
        }
    }

    #[test]
    fn history_dedupes_and_caps_at_five() {
        let mut history = Vec::new();
        for query in ["a", "b", "c", "d", "e", "f"] {
            history = push_history(&history, query);
        }
        assert_eq!(history, vec!["f", "e", "d", "c", "b"]);

        history = push_history(&history, "d");
        assert_eq!(history, vec!["d", "f", "e", "c", "b"]);
    }

    #[test]
    fn favorite_keeps_category_snapshot() {
        let channels = vec![channel("c1", "FreeCodeCamp", "Coding")];
        let favorites = add_favorite(&[], &video("v1", "FreeCodeCamp"), &channels);
        assert_eq!(favorites[0].category, "Coding");

        // The snapshot survives later re-assignment of the channel.
        let moved = assign_category(&channels, "c1", "Maths");
        assert_eq!(moved[0].category, "Maths");
        assert_eq!(favorites[0].category, "Coding");
    }

    #[test]
    fn favorite_from_unknown_channel_is_uncategorized() {
        let favorites = add_favorite(&[], &video("v1", "Somebody Else"), &[]);
        assert_eq!(favorites[0].category, UNCATEGORIZED);
    }

    #[test]
    fn favorite_is_not_duplicated() {
        let v = video("v1", "FreeCodeCamp");
        let favorites = add_favorite(&[], &v, &[]);
        let again = add_favorite(&favorites, &v, &[]);
        assert_eq!(again.len(), 1);

        let cleared = remove_favorite(&again, "v1");
        assert!(cleared.is_empty());
    }

    #[test]
    fn deleting_categories_reassigns_channels() {
        let categories = vec!["Coding".to_string(), "Maths".to_string()];
        let channels = vec![
            channel("c1", "FreeCodeCamp", "Coding"),
            channel("c2", "3Blue1Brown", "Maths"),
        ];

        let (kept, reassigned) = delete_categories(&categories, &channels, &["Maths".to_string()]);
        assert_eq!(kept, vec!["Coding"]);
        assert_eq!(reassigned[0].category, "Coding");
        assert_eq!(reassigned[1].category, UNCATEGORIZED);
    }

    #[test]
    fn corrupt_storage_falls_back_to_defaults() {
        let kv = MemoryKv::default();
        kv.set(CHANNELS_KEY, "not json");
        let store = PreferenceStore::new(kv);
        assert_eq!(store.load_channels(), default_channels());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn preferences_round_trip_through_the_store() {
        let store = PreferenceStore::new(MemoryKv::default());
        let channels = vec![channel("c1", "FreeCodeCamp", "Coding")];
        store.save_channels(&channels);
        store.save_history(&["rust".to_string()]);
        store.save_token("jwt");

        assert_eq!(store.load_channels(), channels);
        assert_eq!(store.load_history(), vec!["rust"]);
        assert_eq!(store.token().as_deref(), Some("jwt"));

        store.clear_token();
        assert_eq!(store.token(), None);
    }
}
