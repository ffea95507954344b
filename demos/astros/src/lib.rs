use wasm_bindgen::prelude::*;
use astros_engine::*;

mod bodies;
mod game;
mod orbit;
mod picking;
use game::SolarScene;

astros_web::export_game!(SolarScene, "astros");
