pub mod catchers;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod utils;

use std::sync::Arc;

use rocket::{Build, Rocket, catchers, figment::Figment, routes};

use crate::catchers::{bad_request, internal_error, not_found, unprocessable_entity};
use crate::routes::{cast_vote, create_poll, delete_poll, delete_poll_post, get_poll, list_polls, AppState};
use crate::store::PollStore;

pub use shared::{models::*, error::*};

/// Rocket instance configured from `Rocket.toml` and `ROCKET_*` variables.
pub fn build_rocket(store: Arc<dyn PollStore>) -> Rocket<Build> {
    rocket_from_figment(rocket::Config::figment(), store)
}

pub fn rocket_from_figment(figment: Figment, store: Arc<dyn PollStore>) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(AppState::new(store))
        .mount(
            "/api",
            routes![
                list_polls,
                get_poll,
                create_poll,
                delete_poll,
                delete_poll_post,
                cast_vote
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable_entity,
                internal_error
            ],
        )
}
