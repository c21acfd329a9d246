#[macro_use]
extern crate rocket;

mod api;
mod auth;
mod config;
mod db;
mod models;

use rocket::serde::json::Json;
use sqlx::SqlitePool;

use crate::models::MessageResponse;

pub struct AppState {
    pub db: SqlitePool,
    pub http: reqwest::Client,
}

#[catch(401)]
fn unauthorized() -> Json<MessageResponse> {
    Json(MessageResponse {
        msg: "No token".to_string(),
    })
}

#[launch]
async fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state()
        .await
        .expect("Failed to initialize application state");
    let cors = config::create_cors().expect("Failed to create CORS options");

    rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![api::auth::register, api::auth::login, api::auth::verify_token],
        )
        .mount(
            "/auth",
            routes![api::oauth::google_login, api::oauth::google_callback],
        )
        .register("/", catchers![unauthorized])
        .attach(cors)
}
