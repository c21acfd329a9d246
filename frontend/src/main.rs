mod auth;
mod env_variable_utils;
mod hub;
mod models;
mod router;
mod search;
mod state;
mod storage;
mod utils;
mod youtube;

use web_sys::console;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::env_variable_utils::{get_app_name, BACKEND_URL};
use crate::router::{switch, Route};

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();

    console::log_1(&format!("NAME: \"{}\", API: \"{}\"", get_app_name(), &*BACKEND_URL).into());
}
