use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::env_variable_utils::get_youtube_api_key;
use crate::models::{Channel, DEFAULT_LANGUAGE, LANGUAGES, UNCATEGORIZED};
use crate::utils::normalize_channel_input;
use crate::youtube::YouTubeClient;

#[derive(Properties, PartialEq)]
pub struct AddChannelModalProps {
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    pub on_add: Callback<Channel>,
    pub on_close: Callback<()>,
}

/// Resolves a pasted URL, handle, or raw id against the platform and adds
/// the channel with the chosen category and language.
#[function_component(AddChannelModal)]
pub fn add_channel_modal(props: &AddChannelModalProps) -> Html {
    let input = use_state(String::new);
    let category = use_state(|| UNCATEGORIZED.to_string());
    let language = use_state(|| DEFAULT_LANGUAGE.to_string());
    let error_message = use_state(Option::<String>::default);
    let busy = use_state(|| false);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let el: HtmlInputElement = e.target_unchecked_into();
            input.set(el.value());
        })
    };

    let on_select = |target: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let el: HtmlSelectElement = e.target_unchecked_into();
            target.set(el.value());
        })
    };

    let on_submit = {
        let input = input.clone();
        let category = category.clone();
        let language = language.clone();
        let error_message = error_message.clone();
        let busy = busy.clone();
        let existing = props.channels.clone();
        let on_add = props.on_add.clone();
        let close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let raw = (*input).clone();
            if raw.trim().is_empty() {
                return;
            }
            let normalized = normalize_channel_input(&raw);
            let category = (*category).clone();
            let language = (*language).clone();
            let error_message = error_message.clone();
            let busy = busy.clone();
            let existing = existing.clone();
            let on_add = on_add.clone();
            let close = close.clone();

            busy.set(true);
            error_message.set(None);
            spawn_local(async move {
                let client = YouTubeClient::new(get_youtube_api_key());
                match client.lookup_channel(&normalized).await {
                    Ok(info) => {
                        if existing.iter().any(|c| c.id == info.id) {
                            error_message.set(Some("Channel is already in your list.".to_string()));
                        } else {
                            on_add.emit(Channel {
                                id: info.id,
                                name: info.name,
                                category,
                                language,
                            });
                            close.emit(());
                        }
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 p-4"
             onclick={on_close.clone()}>
            <div class="bg-white rounded-lg shadow-lg w-full max-w-md p-6"
                 onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-lg font-bold text-gray-800">{"Add Channel"}</h2>
                    <button class="text-gray-400 hover:text-gray-600" onclick={on_close}>{"✕"}</button>
                </div>

                {
                    if let Some(message) = &*error_message {
                        html! { <p class="text-red-600 text-sm mb-3">{ message }</p> }
                    } else {
                        html! {}
                    }
                }

                <form onsubmit={on_submit}>
                    <input
                        type="text"
                        class="w-full border rounded px-3 py-2 mb-3"
                        placeholder="Channel URL, @handle, or id"
                        value={(*input).clone()}
                        oninput={on_input}
                    />
                    <select class="w-full border rounded px-2 py-2 mb-3"
                            onchange={on_select(category.clone())}>
                        {
                            props.categories.iter().map(|c| html! {
                                <option value={c.clone()} selected={*category == *c}>{ c.clone() }</option>
                            }).collect::<Html>()
                        }
                    </select>
                    <select class="w-full border rounded px-2 py-2 mb-4"
                            onchange={on_select(language.clone())}>
                        {
                            LANGUAGES.iter().map(|(code, name)| html! {
                                <option value={*code} selected={*language == *code}>{ *name }</option>
                            }).collect::<Html>()
                        }
                    </select>
                    <button
                        type="submit"
                        disabled={*busy}
                        class="w-full bg-blue-600 text-white rounded py-2 hover:bg-blue-700 disabled:opacity-50"
                    >
                        { if *busy { "Looking up..." } else { "Add channel" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ManageTab {
    Channels,
    Assign,
    Categories,
}

#[derive(Properties, PartialEq)]
pub struct ManageChannelsModalProps {
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    pub on_remove: Callback<String>,
    pub on_assign: Callback<(String, String)>,
    pub on_add_category: Callback<String>,
    pub on_delete_categories: Callback<Vec<String>>,
    pub on_close: Callback<()>,
}

#[function_component(ManageChannelsModal)]
pub fn manage_channels_modal(props: &ManageChannelsModalProps) -> Html {
    let tab = use_state(|| ManageTab::Channels);
    let new_category = use_state(String::new);
    let marked: UseStateHandle<Vec<String>> = use_state(Vec::new);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let tab_button = |label: &str, value: ManageTab| {
        let tab = tab.clone();
        let active = *tab == value;
        let onclick = Callback::from(move |_: MouseEvent| tab.set(value));
        html! {
            <button
                class={classes!(
                    "px-3", "py-1", "rounded", "text-sm",
                    if active { "bg-blue-600 text-white" } else { "bg-gray-200 text-gray-700" }
                )}
                {onclick}
            >
                { label.to_string() }
            </button>
        }
    };

    let body = match *tab {
        ManageTab::Channels => html! {
            <ul>
                {
                    props.channels.iter().map(|channel| {
                        let remove = {
                            let on_remove = props.on_remove.clone();
                            let id = channel.id.clone();
                            Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
                        };
                        html! {
                            <li class="flex justify-between items-center py-2 border-b">
                                <div>
                                    <p class="text-sm text-gray-800">{ channel.name.clone() }</p>
                                    <p class="text-xs text-gray-500">{ channel.category.clone() }</p>
                                </div>
                                <button class="text-red-500 text-sm hover:underline" onclick={remove}>
                                    {"Remove"}
                                </button>
                            </li>
                        }
                    }).collect::<Html>()
                }
            </ul>
        },
        ManageTab::Assign => html! {
            <ul>
                {
                    props.channels.iter().map(|channel| {
                        let assign = {
                            let on_assign = props.on_assign.clone();
                            let id = channel.id.clone();
                            Callback::from(move |e: Event| {
                                let el: HtmlSelectElement = e.target_unchecked_into();
                                on_assign.emit((id.clone(), el.value()));
                            })
                        };
                        html! {
                            <li class="flex justify-between items-center py-2 border-b gap-2">
                                <p class="text-sm text-gray-800 truncate">{ channel.name.clone() }</p>
                                <select class="border rounded px-2 py-1 text-sm" onchange={assign}>
                                    {
                                        props.categories.iter().map(|c| html! {
                                            <option value={c.clone()} selected={channel.category == *c}>
                                                { c.clone() }
                                            </option>
                                        }).collect::<Html>()
                                    }
                                </select>
                            </li>
                        }
                    }).collect::<Html>()
                }
            </ul>
        },
        ManageTab::Categories => {
            let on_new_input = {
                let new_category = new_category.clone();
                Callback::from(move |e: InputEvent| {
                    let el: HtmlInputElement = e.target_unchecked_into();
                    new_category.set(el.value());
                })
            };
            let on_add = {
                let new_category = new_category.clone();
                let on_add_category = props.on_add_category.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let name = (*new_category).clone();
                    if !name.trim().is_empty() {
                        on_add_category.emit(name);
                        new_category.set(String::new());
                    }
                })
            };
            let on_delete = {
                let marked = marked.clone();
                let on_delete_categories = props.on_delete_categories.clone();
                Callback::from(move |_: MouseEvent| {
                    if !marked.is_empty() {
                        on_delete_categories.emit((*marked).clone());
                        marked.set(Vec::new());
                    }
                })
            };

            html! {
                <div>
                    <form class="flex gap-2 mb-3" onsubmit={on_add}>
                        <input
                            type="text"
                            class="flex-1 border rounded px-3 py-1 text-sm"
                            placeholder="New category"
                            value={(*new_category).clone()}
                            oninput={on_new_input}
                        />
                        <button type="submit"
                                class="bg-blue-600 text-white rounded px-3 py-1 text-sm hover:bg-blue-700">
                            {"Add"}
                        </button>
                    </form>
                    <ul class="mb-3">
                        {
                            props.categories.iter().map(|category| {
                                // The fallback bucket cannot be deleted.
                                if category == UNCATEGORIZED {
                                    return html! {
                                        <li class="py-1 text-sm text-gray-400">{ category.clone() }</li>
                                    };
                                }
                                let checked = marked.contains(category);
                                let toggle = {
                                    let marked = marked.clone();
                                    let category = category.clone();
                                    Callback::from(move |_: Event| {
                                        let mut next = (*marked).clone();
                                        if next.contains(&category) {
                                            next.retain(|c| *c != category);
                                        } else {
                                            next.push(category.clone());
                                        }
                                        marked.set(next);
                                    })
                                };
                                html! {
                                    <li class="py-1">
                                        <label class="inline-flex items-center text-sm text-gray-700">
                                            <input type="checkbox" class="mr-2" {checked} onchange={toggle} />
                                            { category.clone() }
                                        </label>
                                    </li>
                                }
                            }).collect::<Html>()
                        }
                    </ul>
                    <button class="text-red-500 text-sm hover:underline disabled:opacity-50"
                            disabled={marked.is_empty()}
                            onclick={on_delete}>
                        {"Delete selected"}
                    </button>
                </div>
            }
        }
    };

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 p-4"
             onclick={on_close.clone()}>
            <div class="bg-white rounded-lg shadow-lg w-full max-w-lg p-6"
                 onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-lg font-bold text-gray-800">{"Manage Channels"}</h2>
                    <button class="text-gray-400 hover:text-gray-600" onclick={on_close}>{"✕"}</button>
                </div>
                <div class="flex gap-2 mb-4">
                    { tab_button("Channels", ManageTab::Channels) }
                    { tab_button("Assign categories", ManageTab::Assign) }
                    { tab_button("Categories", ManageTab::Categories) }
                </div>
                <div class="max-h-80 overflow-y-auto">
                    { body }
                </div>
            </div>
        </div>
    }
}
