mod app;
mod effects;
mod hint;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    app::mount();
}
