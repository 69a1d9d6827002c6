pub mod processor;
pub mod routes;
pub mod store;
pub mod cors;
pub mod error;
pub mod config;
pub mod catchers;
pub mod spa;

use std::path::PathBuf;
use rocket::{Build, Rocket, catchers, figment::Figment, routes};
use tracing::info;
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable_entity},
    config::{AppConfig, ConfigError},
    cors::CORS,
    processor::VoteProcessor,
    routes::*,
    spa::{spa_handler, StaticDir},
};

/// Assembles the application around an already-built processor.
pub fn rocket_with(figment: Figment, processor: VoteProcessor, static_dir: Option<PathBuf>) -> Rocket<Build> {
    let rocket = rocket::custom(figment)
        .attach(CORS)
        .manage(processor)
        .mount(
            "/api",
            routes![
                health,
                list_participants,
                list_modules,
                get_votes,
                submit_votes,
                reset_votes,
                get_results,
                get_chart_data,
                all_options
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
        );

    match static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            rocket.manage(StaticDir(dir)).mount("/", routes![spa_handler])
        }
        None => rocket,
    }
}

pub fn build_rocket(figment: Figment) -> Result<Rocket<Build>, ConfigError> {
    let config = AppConfig::from_figment(&figment)?;
    let catalog = config.load_catalog()?;
    let processor = VoteProcessor::new(catalog, config.build_store());
    Ok(rocket_with(figment, processor, config.static_dir))
}

#[cfg(test)]
mod tests;
