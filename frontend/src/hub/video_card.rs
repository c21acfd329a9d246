use yew::prelude::*;

use crate::models::Video;
use crate::utils::format_view_count;

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: Video,
    pub is_favorite: bool,
    pub on_play: Callback<Video>,
    pub on_toggle_favorite: Callback<Video>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let on_play = {
        let video = props.video.clone();
        let on_play = props.on_play.clone();
        Callback::from(move |_: MouseEvent| on_play.emit(video.clone()))
    };
    let on_favorite = {
        let video = props.video.clone();
        let on_toggle = props.on_toggle_favorite.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_toggle.emit(video.clone());
        })
    };

    html! {
        <div class="bg-white rounded-lg shadow hover:shadow-lg cursor-pointer overflow-hidden"
             onclick={on_play}>
            <div class="relative">
                <img class="w-full aspect-video object-cover" src={props.video.thumbnail.clone()}
                     alt={props.video.title.clone()} />
                <span class="absolute bottom-1 right-1 bg-black bg-opacity-75 text-white text-xs px-1 rounded">
                    { props.video.duration.clone() }
                </span>
            </div>
            <div class="p-3">
                <div class="flex justify-between items-start gap-2">
                    <h3 class="text-sm font-semibold text-gray-800 line-clamp-2">
                        { props.video.title.clone() }
                    </h3>
                    <button class={classes!(
                            "text-xl",
                            if props.is_favorite { "text-yellow-500" } else { "text-gray-300" }
                        )}
                        title={ if props.is_favorite { "Remove from favorites" } else { "Add to favorites" } }
                        onclick={on_favorite}>
                        {"★"}
                    </button>
                </div>
                <p class="text-xs text-gray-500 mt-1">{ props.video.channel.clone() }</p>
                <p class="text-xs text-gray-400">
                    { format!("{} views", format_view_count(props.video.view_count)) }
                </p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub videos: Vec<Video>,
    pub favorite_ids: Vec<String>,
    pub on_play: Callback<Video>,
    pub on_toggle_favorite: Callback<Video>,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
            {
                props.videos.iter().map(|video| {
                    let is_favorite = props.favorite_ids.iter().any(|id| id == &video.id);
                    html! {
                        <VideoCard
                            key={video.id.clone()}
                            video={video.clone()}
                            {is_favorite}
                            on_play={props.on_play.clone()}
                            on_toggle_favorite={props.on_toggle_favorite.clone()}
                        />
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PlayerModalProps {
    pub video: Video,
    pub on_close: Callback<()>,
}

#[function_component(PlayerModal)]
pub fn player_modal(props: &PlayerModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let embed = format!("https://www.youtube.com/embed/{}?autoplay=1", props.video.id);

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-75 flex items-center justify-center z-50 p-4"
             onclick={on_close.clone()}>
            <div class="bg-black rounded-lg w-full max-w-4xl"
                 onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="flex justify-between items-center px-3 py-2">
                    <span class="text-white text-sm truncate">{ props.video.title.clone() }</span>
                    <button class="text-white text-xl px-2" onclick={on_close}>{"✕"}</button>
                </div>
                <iframe
                    class="w-full aspect-video"
                    src={embed}
                    title={props.video.title.clone()}
                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                    allowfullscreen=true
                />
            </div>
        </div>
    }
}
