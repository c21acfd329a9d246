use yew::prelude::*;

use crate::hub::video_card::VideoGrid;
use crate::models::{Favorite, Video};

#[derive(Properties, PartialEq)]
pub struct FavoritesViewProps {
    pub favorites: Vec<Favorite>,
    pub filter: Option<String>,
    pub on_filter: Callback<Option<String>>,
    pub on_play: Callback<Video>,
    pub on_toggle_favorite: Callback<Video>,
}

#[function_component(FavoritesView)]
pub fn favorites_view(props: &FavoritesViewProps) -> Html {
    // Chips come from the snapshotted categories actually in use.
    let mut categories: Vec<String> = props
        .favorites
        .iter()
        .map(|f| f.category.clone())
        .collect();
    categories.sort();
    categories.dedup();

    let shown: Vec<Video> = props
        .favorites
        .iter()
        .filter(|f| props.filter.as_ref().is_none_or(|c| f.category == *c))
        .map(|f| f.video.clone())
        .collect();
    let favorite_ids: Vec<String> = shown.iter().map(|v| v.id.clone()).collect();

    let chip = |label: String, value: Option<String>, active: bool| {
        let on_filter = props.on_filter.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_filter.emit(value.clone()));
        html! {
            <button
                class={classes!(
                    "px-3", "py-1", "rounded-full", "text-sm",
                    if active { "bg-blue-600 text-white" } else { "bg-gray-200 text-gray-700" }
                )}
                {onclick}
            >
                { label }
            </button>
        }
    };

    html! {
        <div>
            <div class="flex flex-wrap gap-2 mb-4">
                { chip("All".to_string(), None, props.filter.is_none()) }
                {
                    categories.iter().map(|c| {
                        let active = props.filter.as_deref() == Some(c.as_str());
                        chip(c.clone(), Some(c.clone()), active)
                    }).collect::<Html>()
                }
            </div>
            {
                if shown.is_empty() {
                    html! {
                        <p class="text-gray-500 text-center py-8">{"No favorite videos yet."}</p>
                    }
                } else {
                    html! {
                        <VideoGrid
                            videos={shown}
                            {favorite_ids}
                            on_play={props.on_play.clone()}
                            on_toggle_favorite={props.on_toggle_favorite.clone()}
                        />
                    }
                }
            }
        </div>
    }
}
