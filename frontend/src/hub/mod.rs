pub mod favorites;
pub mod modals;
pub mod search_bar;
pub mod sidebar;
pub mod video_card;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::api::verify_token;
use crate::env_variable_utils::get_youtube_api_key;
use crate::hub::favorites::FavoritesView;
use crate::hub::modals::{AddChannelModal, ManageChannelsModal};
use crate::hub::search_bar::{SearchArgs, SearchBar};
use crate::hub::sidebar::Sidebar;
use crate::hub::video_card::{PlayerModal, VideoGrid};
use crate::models::Video;
use crate::router::Route;
use crate::search::{load_initial, load_more, run_search, SearchError};
use crate::state::{AppState, Msg, View};
use crate::storage::{LocalStorageKv, PreferenceStore};
use crate::youtube::YouTubeClient;

fn store() -> PreferenceStore<LocalStorageKv> {
    PreferenceStore::new(LocalStorageKv)
}

/// Pull `token` / `error` out of the OAuth redirect query and strip them
/// from the address bar so a stored bookmark never carries a credential.
fn absorb_oauth_redirect(dispatch: &UseReducerHandle<AppState>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(href) = window.location().href() else {
        return;
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return;
    };
    let params = url.search_params();

    let token = params.get("token");
    let oauth_error = params.get("error");
    if token.is_none() && oauth_error.is_none() {
        return;
    }

    if let Some(token) = token {
        store().save_token(&token);
    }
    if oauth_error.is_some() {
        dispatch.dispatch(Msg::ErrorShown(
            "Google sign-in failed. Please try again.".to_string(),
        ));
    }

    params.delete("token");
    params.delete("error");
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url.href()));
    }
}

#[function_component(StudyHubApp)]
pub fn study_hub_app() -> Html {
    let navigator = use_navigator().expect("router context");
    let state = use_reducer(|| {
        let store = store();
        AppState::restored(
            store.load_channels(),
            store.load_categories(),
            store.load_favorites(),
            store.load_history(),
        )
    });
    let sidebar_collapsed = use_state(|| false);
    let show_add_channel = use_state(|| false);
    let show_manage = use_state(|| false);

    // Session bootstrap and the pre-search feed, once per mount.
    {
        let navigator = navigator.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            absorb_oauth_redirect(&state);

            match store().token() {
                Some(token) => {
                    let navigator = navigator.clone();
                    let state = state.clone();
                    spawn_local(async move {
                        match verify_token(&token).await {
                            Ok(profile) => state.dispatch(Msg::SessionVerified(profile)),
                            Err(_) => {
                                store().clear_token();
                                navigator.push(&Route::Home);
                            }
                        }
                    });
                }
                None => navigator.push(&Route::Home),
            }

            let channels = state.channels.clone();
            let state = state.clone();
            spawn_local(async move {
                let client = YouTubeClient::new(get_youtube_api_key());
                let videos = load_initial(&client, &channels).await;
                state.dispatch(Msg::InitialLoaded {
                    generation: 0,
                    videos,
                });
            });
            || ()
        });
    }

    // Preferences follow every change.
    {
        let deps = (
            state.channels.clone(),
            state.categories.clone(),
            state.favorites.clone(),
            state.history.clone(),
        );
        use_effect_with(deps, move |(channels, categories, favorites, history)| {
            let store = store();
            store.persist_category_deletion(categories, channels);
            store.save_favorites(favorites);
            store.save_history(history);
            || ()
        });
    }

    let on_search = {
        let state = state.clone();
        Callback::from(move |args: SearchArgs| {
            if args.channel_ids.is_empty() {
                state.dispatch(Msg::ErrorShown(
                    SearchError::NoChannelsSelected.to_string(),
                ));
                return;
            }
            let generation = state.generation + 1;
            state.dispatch(Msg::SearchStarted {
                query: args.query.clone(),
                language: args.language.clone(),
            });
            let state = state.clone();
            spawn_local(async move {
                let client = YouTubeClient::new(get_youtube_api_key());
                match run_search(&client, &args.query, &args.language, &args.channel_ids).await {
                    Ok(outcome) => state.dispatch(Msg::SearchLoaded {
                        generation,
                        outcome,
                    }),
                    Err(error) => state.dispatch(Msg::SearchFailed { generation, error }),
                }
            });
        })
    };

    let on_load_more = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            if state.loading_more || !state.has_more {
                return;
            }
            let generation = state.generation;
            let query = state.query.clone();
            let language = state.language.clone();
            let channel_ids: Vec<String> = state.cursors.keys().cloned().collect();
            let cursors = state.cursors.clone();
            state.dispatch(Msg::MoreStarted);
            let state = state.clone();
            spawn_local(async move {
                let client = YouTubeClient::new(get_youtube_api_key());
                match load_more(&client, &query, &language, &channel_ids, &cursors).await {
                    Ok(outcome) => state.dispatch(Msg::MoreLoaded {
                        generation,
                        outcome,
                    }),
                    Err(error) => state.dispatch(Msg::MoreFailed { generation, error }),
                }
            });
        })
    };

    let on_logout = {
        let navigator = navigator.clone();
        let state = state.clone();
        Callback::from(move |_| {
            store().clear_token();
            state.dispatch(Msg::LoggedOut);
            navigator.push(&Route::Home);
        })
    };

    let dispatch_msg = |msg_of: fn(Video) -> Msg| {
        let state = state.clone();
        Callback::from(move |video: Video| state.dispatch(msg_of(video)))
    };
    let on_play = dispatch_msg(Msg::PlayVideo);
    let on_toggle_favorite = dispatch_msg(Msg::FavoriteToggled);

    let favorite_ids: Vec<String> = state.favorites.iter().map(|f| f.video.id.clone()).collect();
    let search_disabled = state.loading || state.quota_exhausted;

    let main = match state.view {
        View::Search => html! {
            <>
                <SearchBar
                    channels={state.channels.clone()}
                    categories={state.categories.clone()}
                    history={state.history.clone()}
                    disabled={search_disabled}
                    on_search={on_search}
                    on_delete_history={{
                        let state = state.clone();
                        Callback::from(move |q: String| state.dispatch(Msg::HistoryDeleted(q)))
                    }}
                    on_clear_history={{
                        let state = state.clone();
                        Callback::from(move |_| state.dispatch(Msg::HistoryCleared))
                    }}
                />
                {
                    if state.loading {
                        html! { <p class="text-gray-400 text-center py-8">{"Searching..."}</p> }
                    } else {
                        html! {
                            <>
                                <VideoGrid
                                    videos={state.results.clone()}
                                    favorite_ids={favorite_ids.clone()}
                                    on_play={on_play.clone()}
                                    on_toggle_favorite={on_toggle_favorite.clone()}
                                />
                                {
                                    if state.has_more {
                                        html! {
                                            <div class="text-center mt-6">
                                                <button
                                                    class="bg-blue-600 text-white rounded px-6 py-2 hover:bg-blue-700 disabled:opacity-50"
                                                    disabled={state.loading_more}
                                                    onclick={on_load_more}
                                                >
                                                    { if state.loading_more { "Loading..." } else { "Load more" } }
                                                </button>
                                            </div>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                            </>
                        }
                    }
                }
            </>
        },
        View::Favorites => html! {
            <FavoritesView
                favorites={state.favorites.clone()}
                filter={state.fav_category_filter.clone()}
                on_filter={{
                    let state = state.clone();
                    Callback::from(move |f: Option<String>| state.dispatch(Msg::FavFilterChanged(f)))
                }}
                on_play={on_play.clone()}
                on_toggle_favorite={on_toggle_favorite.clone()}
            />
        },
    };

    html! {
        <div class="flex bg-gray-100 min-h-screen">
            <Sidebar
                user={state.user.clone()}
                collapsed={*sidebar_collapsed}
                view={state.view}
                on_toggle={{
                    let sidebar_collapsed = sidebar_collapsed.clone();
                    Callback::from(move |_| sidebar_collapsed.set(!*sidebar_collapsed))
                }}
                on_view_change={{
                    let state = state.clone();
                    Callback::from(move |view: View| state.dispatch(Msg::ViewChanged(view)))
                }}
                on_open_add={{
                    let show_add_channel = show_add_channel.clone();
                    Callback::from(move |_| show_add_channel.set(true))
                }}
                on_open_manage={{
                    let show_manage = show_manage.clone();
                    Callback::from(move |_| show_manage.set(true))
                }}
                {on_logout}
            />

            <main class="flex-1 p-6">
                {
                    if state.quota_exhausted {
                        html! {
                            <div class="bg-yellow-100 border border-yellow-400 text-yellow-800 rounded px-4 py-2 mb-4">
                                {"Today's API limit is over. Please try again tomorrow."}
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                {
                    if let Some(message) = &state.error {
                        html! {
                            <div class="bg-red-100 border border-red-400 text-red-700 rounded px-4 py-2 mb-4 flex justify-between items-center">
                                <span>{ message.clone() }</span>
                                <button class="ml-4 font-bold" onclick={{
                                    let state = state.clone();
                                    Callback::from(move |_| state.dispatch(Msg::ErrorCleared))
                                }}>{"✕"}</button>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                { main }
            </main>

            {
                if let Some(video) = &state.playing_video {
                    html! {
                        <PlayerModal
                            video={video.clone()}
                            on_close={{
                                let state = state.clone();
                                Callback::from(move |_| state.dispatch(Msg::ClosePlayer))
                            }}
                        />
                    }
                } else {
                    html! {}
                }
            }
            {
                if *show_add_channel {
                    html! {
                        <AddChannelModal
                            channels={state.channels.clone()}
                            categories={state.categories.clone()}
                            on_add={{
                                let state = state.clone();
                                Callback::from(move |c| state.dispatch(Msg::ChannelAdded(c)))
                            }}
                            on_close={{
                                let show_add_channel = show_add_channel.clone();
                                Callback::from(move |_| show_add_channel.set(false))
                            }}
                        />
                    }
                } else {
                    html! {}
                }
            }
            {
                if *show_manage {
                    html! {
                        <ManageChannelsModal
                            channels={state.channels.clone()}
                            categories={state.categories.clone()}
                            on_remove={{
                                let state = state.clone();
                                Callback::from(move |id| state.dispatch(Msg::ChannelRemoved(id)))
                            }}
                            on_assign={{
                                let state = state.clone();
                                Callback::from(move |(channel_id, category)| {
                                    state.dispatch(Msg::ChannelAssigned { channel_id, category })
                                })
                            }}
                            on_add_category={{
                                let state = state.clone();
                                Callback::from(move |name| state.dispatch(Msg::CategoryAdded(name)))
                            }}
                            on_delete_categories={{
                                let state = state.clone();
                                Callback::from(move |names| state.dispatch(Msg::CategoriesDeleted(names)))
                            }}
                            on_close={{
                                let show_manage = show_manage.clone();
                                Callback::from(move |_| show_manage.set(false))
                            }}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
