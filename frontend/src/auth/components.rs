use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::api::{google_login_url, login, register};
use crate::router::Route;
use crate::storage::{LocalStorageKv, PreferenceStore};

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let navigator = use_navigator().expect("router context");
    let mode = use_state(|| Mode::Login);
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error_message = use_state(Option::<String>::default);
    let success_message = use_state(Option::<String>::default);
    let busy = use_state(|| false);

    // A stored token skips the login screen; /main re-verifies it anyway.
    {
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            let store = PreferenceStore::new(LocalStorageKv);
            if store.token().is_some() {
                navigator.push(&Route::Main);
            }
            || ()
        });
    }

    let on_input = |target: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            target.set(input.value());
        })
    };

    let on_toggle = {
        let mode = mode.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(match *mode {
                Mode::Login => Mode::Register,
                Mode::Register => Mode::Login,
            });
            error_message.set(None);
            success_message.set(None);
        })
    };

    let on_google = Callback::from(move |_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(&google_login_url());
        }
    });

    let on_submit = {
        let navigator = navigator.clone();
        let mode = mode.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let busy = busy.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let navigator = navigator.clone();
            let mode_state = mode.clone();
            let current_mode = *mode;
            let username = (*username).clone();
            let email = (*email).clone();
            let password_state = password.clone();
            let password_value = (*password).clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let busy = busy.clone();

            busy.set(true);
            error_message.set(None);
            success_message.set(None);

            spawn_local(async move {
                match current_mode {
                    Mode::Login => match login(&email, &password_value).await {
                        Ok(token) => {
                            PreferenceStore::new(LocalStorageKv).save_token(&token);
                            navigator.push(&Route::Main);
                        }
                        Err(message) => error_message.set(Some(message)),
                    },
                    Mode::Register => match register(&username, &email, &password_value).await {
                        Ok(message) => {
                            success_message.set(Some(message));
                            password_state.set(String::new());
                            mode_state.set(Mode::Login);
                        }
                        Err(message) => error_message.set(Some(message)),
                    },
                }
                busy.set(false);
            });
        })
    };

    let is_login = *mode == Mode::Login;

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 p-4">
            <div class="bg-white p-8 rounded-lg shadow-lg w-full max-w-md">
                <h1 class="text-3xl font-bold text-center text-gray-800 mb-2">{"StudyHub"}</h1>
                <p class="text-center text-gray-500 mb-6">
                    { if is_login { "Sign in to continue" } else { "Create your account" } }
                </p>

                {
                    if let Some(message) = &*error_message {
                        html! { <p class="text-red-600 text-center mb-4">{ message }</p> }
                    } else if let Some(message) = &*success_message {
                        html! { <p class="text-green-600 text-center mb-4">{ message }</p> }
                    } else {
                        html! {}
                    }
                }

                <form onsubmit={on_submit}>
                    {
                        if !is_login {
                            html! {
                                <input
                                    type="text"
                                    class="w-full border rounded px-3 py-2 mb-3"
                                    placeholder="Username"
                                    value={(*username).clone()}
                                    oninput={on_input(username.clone())}
                                />
                            }
                        } else {
                            html! {}
                        }
                    }
                    <input
                        type="email"
                        class="w-full border rounded px-3 py-2 mb-3"
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={on_input(email.clone())}
                    />
                    <input
                        type="password"
                        class="w-full border rounded px-3 py-2 mb-4"
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={on_input(password.clone())}
                    />
                    <button
                        type="submit"
                        disabled={*busy}
                        class="w-full bg-blue-600 text-white rounded py-2 hover:bg-blue-700 disabled:opacity-50"
                    >
                        { if is_login { "Login" } else { "Register" } }
                    </button>
                </form>

                <button
                    onclick={on_google}
                    class="w-full border rounded py-2 mt-3 text-gray-700 hover:bg-gray-100"
                >
                    {"Continue with Google"}
                </button>

                <p class="text-center text-sm text-gray-600 mt-4">
                    { if is_login { "Don't have an account? " } else { "Already have an account? " } }
                    <a class="text-blue-600 hover:underline cursor-pointer" onclick={on_toggle}>
                        { if is_login { "Register" } else { "Login" } }
                    </a>
                </p>
            </div>
        </div>
    }
}
