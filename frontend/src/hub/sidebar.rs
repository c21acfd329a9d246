use yew::prelude::*;

use crate::models::UserProfile;
use crate::state::View;
use crate::utils::profile_initials;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub user: Option<UserProfile>,
    pub collapsed: bool,
    pub view: View,
    pub on_toggle: Callback<()>,
    pub on_view_change: Callback<View>,
    pub on_open_add: Callback<()>,
    pub on_open_manage: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let view_button = |label: &str, value: View| {
        let on_view_change = props.on_view_change.clone();
        let active = props.view == value;
        let onclick = Callback::from(move |_: MouseEvent| on_view_change.emit(value));
        html! {
            <button
                class={classes!(
                    "w-full", "text-left", "rounded", "px-3", "py-2", "text-sm",
                    if active { "bg-blue-600 text-white" } else { "text-gray-200 hover:bg-gray-700" }
                )}
                {onclick}
            >
                { label.to_string() }
            </button>
        }
    };

    if props.collapsed {
        return html! {
            <button class="fixed top-3 left-3 z-40 bg-gray-800 text-white rounded px-3 py-2"
                    onclick={on_toggle}>
                {"☰"}
            </button>
        };
    }

    html! {
        <aside class="w-60 bg-gray-800 min-h-screen flex flex-col p-4">
            <div class="flex justify-between items-center mb-6">
                <span class="text-white font-bold text-lg">{"StudyHub"}</span>
                <button class="text-gray-400 hover:text-white" onclick={on_toggle}>{"✕"}</button>
            </div>

            {
                if let Some(user) = &props.user {
                    html! {
                        <div class="flex items-center gap-3 mb-6">
                            {
                                if let Some(picture) = &user.profile_picture {
                                    html! {
                                        <img class="w-10 h-10 rounded-full" src={picture.clone()}
                                             alt={user.username.clone()} />
                                    }
                                } else {
                                    html! {
                                        <span class="w-10 h-10 rounded-full bg-blue-600 text-white flex items-center justify-center font-bold">
                                            { profile_initials(user) }
                                        </span>
                                    }
                                }
                            }
                            <div class="min-w-0">
                                <p class="text-white text-sm truncate">{ user.username.clone() }</p>
                                <p class="text-gray-400 text-xs truncate">{ user.email.clone() }</p>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <nav class="flex flex-col gap-1 mb-6">
                { view_button("Search", View::Search) }
                { view_button("Favorites", View::Favorites) }
            </nav>

            <div class="flex flex-col gap-1">
                <button class="w-full text-left rounded px-3 py-2 text-sm text-gray-200 hover:bg-gray-700"
                        onclick={emit(&props.on_open_add)}>
                    {"Add channel"}
                </button>
                <button class="w-full text-left rounded px-3 py-2 text-sm text-gray-200 hover:bg-gray-700"
                        onclick={emit(&props.on_open_manage)}>
                    {"Manage channels"}
                </button>
            </div>

            <button class="mt-auto w-full text-left rounded px-3 py-2 text-sm text-red-400 hover:bg-gray-700"
                    onclick={emit(&props.on_logout)}>
                {"Logout"}
            </button>
        </aside>
    }
}
