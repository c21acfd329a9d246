//! Application state and its reducer.
//!
//! Every mutation goes through [`AppState::reduce`]. Async work carries the
//! generation number it was started under; responses from a superseded
//! request are dropped instead of clobbering newer results.

use std::rc::Rc;

use yew::Reducible;

use crate::models::{
    default_categories, default_channels, Channel, Favorite, UserProfile, Video, DEFAULT_LANGUAGE,
};
use crate::search::{CursorMap, MoreOutcome, SearchError, SearchOutcome};
use crate::storage::{
    add_favorite, assign_category, delete_categories, push_history, remove_favorite,
};
use crate::youtube::YouTubeError;

pub const NO_RESULTS_MESSAGE: &str =
    "No videos found for your search. Try different keywords or select more channels.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Favorites,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub user: Option<UserProfile>,
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    pub favorites: Vec<Favorite>,
    pub history: Vec<String>,

    pub query: String,
    pub language: String,
    pub results: Vec<Video>,
    pub cursors: CursorMap,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    pub quota_exhausted: bool,

    pub playing_video: Option<Video>,
    pub view: View,
    pub fav_category_filter: Option<String>,

    /// Bumped on every new search; in-flight responses stamped with an older
    /// value are stale.
    pub generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: None,
            channels: default_channels(),
            categories: default_categories(),
            favorites: Vec::new(),
            history: Vec::new(),
            query: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            results: Vec::new(),
            cursors: CursorMap::new(),
            has_more: false,
            loading: false,
            loading_more: false,
            error: None,
            quota_exhausted: false,
            playing_video: None,
            view: View::Search,
            fav_category_filter: None,
            generation: 0,
        }
    }
}

impl AppState {
    /// State as restored from persisted preferences on startup.
    pub fn restored(
        channels: Vec<Channel>,
        categories: Vec<String>,
        favorites: Vec<Favorite>,
        history: Vec<String>,
    ) -> Self {
        Self {
            channels,
            categories,
            favorites,
            history,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SessionVerified(UserProfile),
    LoggedOut,

    SearchStarted { query: String, language: String },
    SearchLoaded { generation: u64, outcome: SearchOutcome },
    SearchFailed { generation: u64, error: SearchError },
    MoreStarted,
    MoreLoaded { generation: u64, outcome: MoreOutcome },
    MoreFailed { generation: u64, error: SearchError },
    InitialLoaded { generation: u64, videos: Vec<Video> },

    ChannelAdded(Channel),
    ChannelRemoved(String),
    ChannelAssigned { channel_id: String, category: String },
    CategoryAdded(String),
    CategoriesDeleted(Vec<String>),

    FavoriteToggled(Video),
    HistoryDeleted(String),
    HistoryCleared,

    PlayVideo(Video),
    ClosePlayer,
    ViewChanged(View),
    FavFilterChanged(Option<String>),
    ErrorShown(String),
    ErrorCleared,
}

fn error_message(error: &SearchError) -> (String, bool) {
    let quota = matches!(error, SearchError::Platform(YouTubeError::QuotaExceeded));
    (error.to_string(), quota)
}

impl Reducible for AppState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Msg) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::SessionVerified(profile) => next.user = Some(profile),
            Msg::LoggedOut => next.user = None,

            Msg::SearchStarted { query, language } => {
                next.generation += 1;
                next.query = query.clone();
                next.language = language;
                next.loading = true;
                next.loading_more = false;
                next.error = None;
                next.results.clear();
                next.cursors.clear();
                next.has_more = false;
                next.view = View::Search;
                if !query.trim().is_empty() {
                    next.history = push_history(&next.history, &query);
                }
            }
            Msg::SearchLoaded { generation, outcome } => {
                if generation != self.generation {
                    return self;
                }
                next.loading = false;
                next.has_more = outcome.cursors.values().any(|c| c.is_some());
                next.cursors = outcome.cursors;
                if outcome.videos.is_empty() {
                    next.error = Some(NO_RESULTS_MESSAGE.to_string());
                }
                next.results = outcome.videos;
            }
            Msg::SearchFailed { generation, error } => {
                if generation != self.generation {
                    return self;
                }
                let (message, quota) = error_message(&error);
                next.loading = false;
                next.error = Some(message);
                next.quota_exhausted |= quota;
            }
            Msg::MoreStarted => next.loading_more = true,
            Msg::MoreLoaded { generation, outcome } => {
                if generation != self.generation {
                    return self;
                }
                next.loading_more = false;
                next.results.extend(outcome.videos);
                next.cursors = outcome.cursors;
                next.has_more = outcome.has_more;
            }
            Msg::MoreFailed { generation, error } => {
                if generation != self.generation {
                    return self;
                }
                let (message, quota) = error_message(&error);
                next.loading_more = false;
                next.error = Some(message);
                next.quota_exhausted |= quota;
            }
            Msg::InitialLoaded { generation, videos } => {
                // A search issued while the feed was loading wins.
                if generation != self.generation || !self.results.is_empty() {
                    return self;
                }
                next.results = videos;
            }

            Msg::ChannelAdded(channel) => {
                if !next.channels.iter().any(|c| c.id == channel.id) {
                    next.channels.push(channel);
                }
            }
            Msg::ChannelRemoved(id) => next.channels.retain(|c| c.id != id),
            Msg::ChannelAssigned {
                channel_id,
                category,
            } => next.channels = assign_category(&next.channels, &channel_id, &category),
            Msg::CategoryAdded(category) => {
                let category = category.trim().to_string();
                if !category.is_empty() && !next.categories.contains(&category) {
                    next.categories.push(category);
                }
            }
            Msg::CategoriesDeleted(names) => {
                let (categories, channels) =
                    delete_categories(&next.categories, &next.channels, &names);
                next.categories = categories;
                next.channels = channels;
            }

            Msg::FavoriteToggled(video) => {
                if next.favorites.iter().any(|f| f.video.id == video.id) {
                    next.favorites = remove_favorite(&next.favorites, &video.id);
                } else {
                    next.favorites = add_favorite(&next.favorites, &video, &next.channels);
                }
            }
            Msg::HistoryDeleted(query) => next.history.retain(|q| *q != query),
            Msg::HistoryCleared => next.history.clear(),

            Msg::PlayVideo(video) => next.playing_video = Some(video),
            Msg::ClosePlayer => next.playing_video = None,
            Msg::ViewChanged(view) => next.view = view,
            Msg::FavFilterChanged(filter) => next.fav_category_filter = filter,
            Msg::ErrorShown(message) => next.error = Some(message),
            Msg::ErrorCleared => next.error = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED;

    fn video(id: &str) -> Video {
        Video {
            id: id.to_string(),
            title: format!("video {id}"),
            channel: "FreeCodeCamp".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            thumbnail: String::new(),
            duration: "5m".to_string(),
            duration_sec: 300,
            url: format!("https://www.youtube.com/watch?v={id}"),
            view_count: 1,
        }
    }

    fn reduce(state: Rc<AppState>, msg: Msg) -> Rc<AppState> {
        Reducible::reduce(state, msg)
    }

    fn started(state: Rc<AppState>, query: &str) -> Rc<AppState> {
        reduce(
            state,
            Msg::SearchStarted {
                query: query.to_string(),
                language: "en".to_string(),
            },
        )
    }

    #[test]
    fn search_results_replace_and_stop_loading() {
        let state = started(Rc::new(AppState::default()), "rust");
        assert!(state.loading);
        assert_eq!(state.history, vec!["rust"]);

        let outcome = SearchOutcome {
            videos: vec![video("a")],
            cursors: [("c1".to_string(), Some("tok".to_string()))].into(),
        };
        let state = reduce(
            state,
            Msg::SearchLoaded {
                generation: 1,
                outcome,
            },
        );
        assert!(!state.loading);
        assert!(state.has_more);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.error, None);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let state = started(Rc::new(AppState::default()), "first");
        let state = started(state, "second");
        assert_eq!(state.generation, 2);

        let stale = SearchOutcome {
            videos: vec![video("old")],
            cursors: CursorMap::new(),
        };
        let state = reduce(
            state,
            Msg::SearchLoaded {
                generation: 1,
                outcome: stale,
            },
        );
        assert!(state.loading);
        assert!(state.results.is_empty());

        let state = reduce(
            state,
            Msg::SearchFailed {
                generation: 1,
                error: SearchError::NoChannelsSelected,
            },
        );
        assert_eq!(state.error, None);
    }

    #[test]
    fn empty_results_surface_a_message() {
        let state = started(Rc::new(AppState::default()), "obscure");
        let state = reduce(
            state,
            Msg::SearchLoaded {
                generation: 1,
                outcome: SearchOutcome::default(),
            },
        );
        assert_eq!(state.error.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert!(!state.has_more);
    }

    #[test]
    fn quota_failure_flips_the_exhausted_flag() {
        let state = started(Rc::new(AppState::default()), "rust");
        let state = reduce(
            state,
            Msg::SearchFailed {
                generation: 1,
                error: SearchError::Platform(YouTubeError::QuotaExceeded),
            },
        );
        assert!(state.quota_exhausted);
        assert_eq!(
            state.error.as_deref(),
            Some("Today's API limit is over. Please try again tomorrow.")
        );
    }

    #[test]
    fn load_more_appends_and_tracks_cursors() {
        let state = started(Rc::new(AppState::default()), "rust");
        let state = reduce(
            state,
            Msg::SearchLoaded {
                generation: 1,
                outcome: SearchOutcome {
                    videos: vec![video("a")],
                    cursors: [("c1".to_string(), Some("tok".to_string()))].into(),
                },
            },
        );
        let state = reduce(state, Msg::MoreStarted);
        let state = reduce(
            state,
            Msg::MoreLoaded {
                generation: 1,
                outcome: MoreOutcome {
                    videos: vec![video("b")],
                    cursors: [("c1".to_string(), None)].into(),
                    has_more: false,
                },
            },
        );
        let got: Vec<&str> = state.results.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(got, vec!["a", "b"]);
        assert!(!state.has_more);
        assert!(!state.loading_more);
    }

    #[test]
    fn initial_feed_never_overwrites_search_results() {
        let state = Rc::new(AppState::default());
        let state = reduce(
            state,
            Msg::InitialLoaded {
                generation: 0,
                videos: vec![video("feed")],
            },
        );
        assert_eq!(state.results[0].id, "feed");

        let state = started(state, "rust");
        let state = reduce(
            state,
            Msg::InitialLoaded {
                generation: 0,
                videos: vec![video("late-feed")],
            },
        );
        assert!(state.results.is_empty());
    }

    #[test]
    fn history_edits_apply() {
        let mut state = Rc::new(AppState::default());
        for q in ["a", "b", "a"] {
            state = started(state, q);
        }
        assert_eq!(state.history, vec!["a", "b"]);

        state = reduce(state, Msg::HistoryDeleted("b".to_string()));
        assert_eq!(state.history, vec!["a"]);
        state = reduce(state, Msg::HistoryCleared);
        assert!(state.history.is_empty());
    }

    #[test]
    fn category_deletion_reassigns_channels() {
        let state = Rc::new(AppState::default());
        let engineering: Vec<String> = vec!["Engineering".to_string()];
        let state = reduce(state, Msg::CategoriesDeleted(engineering));
        assert!(!state.categories.iter().any(|c| c == "Engineering"));
        assert!(state
            .channels
            .iter()
            .filter(|c| c.name.starts_with("4G Silver"))
            .all(|c| c.category == UNCATEGORIZED));
    }

    #[test]
    fn favorite_toggles_on_and_off() {
        let state = Rc::new(AppState::default());
        let v = video("v1");
        let state = reduce(state, Msg::FavoriteToggled(v.clone()));
        assert_eq!(state.favorites.len(), 1);
        let state = reduce(state, Msg::FavoriteToggled(v));
        assert!(state.favorites.is_empty());
    }
}
