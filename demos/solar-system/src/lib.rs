use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod config;
pub mod error;
pub mod game;
pub mod hud;
pub mod scene_builder;
pub mod state;

use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
