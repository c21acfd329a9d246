use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::components::AuthPage;
use crate::hub::StudyHubApp;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/main")]
    Main,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <AuthPage /> },
        Route::Main => html! { <StudyHubApp /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-900">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Back to login"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}
