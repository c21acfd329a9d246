use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::models::{Channel, DEFAULT_LANGUAGE, LANGUAGES};

/// Everything a search run needs, captured at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    pub query: String,
    pub language: String,
    pub channel_ids: Vec<String>,
}

pub const ALL_CATEGORIES: &str = "all";
pub const ALL_LANGUAGES: &str = "all";

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    pub history: Vec<String>,
    pub disabled: bool,
    pub on_search: Callback<SearchArgs>,
    pub on_delete_history: Callback<String>,
    pub on_clear_history: Callback<()>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let query = use_state(String::new);
    let language = use_state(|| DEFAULT_LANGUAGE.to_string());
    let category = use_state(|| ALL_CATEGORIES.to_string());
    let selected: UseStateHandle<Vec<String>> = use_state(Vec::new);
    let dropdown_open = use_state(|| false);
    let show_history = use_state(|| false);

    // The category filter narrows the fan-out at submit time; the checkbox
    // selection itself is kept as-is.
    let channels_to_search: Vec<String> = selected
        .iter()
        .filter(|id| {
            *category == ALL_CATEGORIES
                || props
                    .channels
                    .iter()
                    .any(|c| c.id == **id && c.category == *category)
        })
        .cloned()
        .collect();

    let submit = {
        let query = query.clone();
        let language = language.clone();
        let show_history = show_history.clone();
        let on_search = props.on_search.clone();
        let channels_to_search = channels_to_search.clone();
        move |q: String| {
            show_history.set(false);
            query.set(q.clone());
            on_search.emit(SearchArgs {
                query: q,
                language: (*language).clone(),
                channel_ids: channels_to_search.clone(),
            });
        }
    };

    let on_submit = {
        let query = query.clone();
        let submit = submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let q = (*query).clone();
            if !q.trim().is_empty() {
                submit(q);
            }
        })
    };

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let on_focus = {
        let show_history = show_history.clone();
        Callback::from(move |_: FocusEvent| show_history.set(true))
    };

    // Changing the language resets the channel selection; the old set was
    // picked for content in the old language.
    let on_language = {
        let language = language.clone();
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            language.set(select.value());
            selected.set(Vec::new());
        })
    };

    let on_category = {
        let category = category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category.set(select.value());
        })
    };

    let on_dropdown_toggle = {
        let dropdown_open = dropdown_open.clone();
        Callback::from(move |_: MouseEvent| dropdown_open.set(!*dropdown_open))
    };

    let visible_channels: Vec<&Channel> = props
        .channels
        .iter()
        .filter(|c| *category == ALL_CATEGORIES || c.category == *category)
        .collect();

    html! {
        <div class="relative mb-4">
            <form class="flex flex-wrap gap-2" onsubmit={on_submit}>
                <input
                    type="text"
                    class="flex-1 min-w-[200px] border rounded px-3 py-2"
                    placeholder="Search educational videos..."
                    value={(*query).clone()}
                    oninput={on_input}
                    onfocus={on_focus}
                />
                <div class="relative">
                    <button type="button"
                            class="border rounded px-3 py-2 bg-white hover:bg-gray-50"
                            onclick={on_dropdown_toggle}>
                        { format!("Select channels ({})", selected.len()) }
                    </button>
                    {
                        if *dropdown_open {
                            html! {
                                <div class="absolute left-0 top-full mt-1 w-64 bg-white border rounded shadow z-20 max-h-60 overflow-y-auto">
                                    {
                                        visible_channels.iter().map(|channel| {
                                            let checked = selected.contains(&channel.id);
                                            let toggle = {
                                                let selected = selected.clone();
                                                let id = channel.id.clone();
                                                Callback::from(move |_: MouseEvent| {
                                                    let mut next = (*selected).clone();
                                                    if next.contains(&id) {
                                                        next.retain(|c| *c != id);
                                                    } else {
                                                        next.push(id.clone());
                                                    }
                                                    selected.set(next);
                                                })
                                            };
                                            html! {
                                                <div class="flex items-center gap-2 px-3 py-1 hover:bg-gray-100 cursor-pointer"
                                                     onclick={toggle}>
                                                    <input type="checkbox" {checked} />
                                                    <span class="text-sm text-gray-700 truncate">{ channel.name.clone() }</span>
                                                    <span class="text-xs text-gray-400 ml-auto">{ channel.category.clone() }</span>
                                                </div>
                                            }
                                        }).collect::<Html>()
                                    }
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <select class="border rounded px-2 py-2" onchange={on_category}>
                    <option value={ALL_CATEGORIES} selected={*category == ALL_CATEGORIES}>
                        {"All categories"}
                    </option>
                    {
                        props.categories.iter().map(|c| html! {
                            <option value={c.clone()} selected={*category == *c}>{ c.clone() }</option>
                        }).collect::<Html>()
                    }
                </select>
                <select class="border rounded px-2 py-2" onchange={on_language}>
                    <option value={ALL_LANGUAGES} selected={*language == ALL_LANGUAGES}>
                        {"All languages"}
                    </option>
                    {
                        LANGUAGES.iter().map(|(code, name)| html! {
                            <option value={*code} selected={*language == *code}>{ *name }</option>
                        }).collect::<Html>()
                    }
                </select>
                <button
                    type="submit"
                    disabled={props.disabled}
                    class="bg-blue-600 text-white rounded px-4 py-2 hover:bg-blue-700 disabled:opacity-50"
                >
                    {"Search"}
                </button>
            </form>

            {
                if *show_history && !props.history.is_empty() {
                    let submit = submit.clone();
                    html! {
                        <div class="absolute left-0 right-0 top-full mt-1 bg-white border rounded shadow z-10">
                            {
                                props.history.iter().map(|entry| {
                                    let run = {
                                        let submit = submit.clone();
                                        let entry = entry.clone();
                                        Callback::from(move |_: MouseEvent| submit(entry.clone()))
                                    };
                                    let delete = {
                                        let on_delete = props.on_delete_history.clone();
                                        let entry = entry.clone();
                                        Callback::from(move |e: MouseEvent| {
                                            e.stop_propagation();
                                            on_delete.emit(entry.clone());
                                        })
                                    };
                                    html! {
                                        <div class="flex justify-between items-center px-3 py-1 hover:bg-gray-100 cursor-pointer"
                                             onclick={run}>
                                            <span class="text-sm text-gray-700">{ entry.clone() }</span>
                                            <button class="text-gray-400 hover:text-red-500 text-xs px-1"
                                                    onclick={delete}>{"✕"}</button>
                                        </div>
                                    }
                                }).collect::<Html>()
                            }
                            <div class="border-t px-3 py-1 text-right">
                                <button class="text-xs text-blue-600 hover:underline"
                                        onclick={{
                                            let on_clear = props.on_clear_history.clone();
                                            let show_history = show_history.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                on_clear.emit(());
                                                show_history.set(false);
                                            })
                                        }}>
                                    {"Clear history"}
                                </button>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
