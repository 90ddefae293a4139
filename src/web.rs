//! Browser bindings
//!
//! A thin `wasm_bindgen` wrapper over `Storefront`. The page calls `frame()`
//! from `requestAnimationFrame` and renders the JSON snapshot it returns.

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::clock::{BrowserClock, Driver};
use crate::config::GameConfig;
use crate::storefront::Storefront;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Stack Shack starting...");
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct WebStore {
    store: Storefront,
    driver: Driver<BrowserClock>,
}

impl Default for WebStore {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebStore {
        WebStore {
            store: Storefront::default(),
            driver: Driver::new(BrowserClock),
        }
    }

    /// Build from a JSON game config and, optionally, a JSON menu
    pub fn with_config(config_json: &str, menu_json: Option<String>) -> Result<WebStore, JsValue> {
        let config =
            GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let catalog = match menu_json {
            Some(json) => {
                Catalog::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Catalog::default(),
        };
        Ok(WebStore {
            store: Storefront::new(catalog, config),
            driver: Driver::new(BrowserClock),
        })
    }

    /// Advance by the time since the last frame and return the snapshot
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let dt = self.driver.poll();
        self.store.update(dt);
        to_json(&self.store.snapshot())
    }

    /// Call when the tab becomes visible again
    pub fn resync(&mut self) {
        self.driver.resync();
    }

    pub fn menu(&self) -> Result<String, JsValue> {
        to_json(self.store.catalog())
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.store.snapshot())
    }

    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        to_json(&self.store.drain_events())
    }

    pub fn add_to_cart(&mut self, item_id: u32) -> bool {
        self.store.add_to_cart(item_id).is_some()
    }

    pub fn increment(&mut self, item_id: u32) {
        self.store.increment(item_id);
    }

    pub fn decrement(&mut self, item_id: u32) {
        self.store.decrement(item_id);
    }

    pub fn open_game(&mut self) {
        self.store.open_game();
    }

    pub fn start_game(&mut self) {
        self.store.start_game();
    }

    pub fn drop_item(&mut self) {
        self.store.drop_item();
    }

    pub fn restart_game(&mut self) {
        self.store.restart_game();
    }

    pub fn close_game(&mut self) {
        self.store.close_game();
    }
}
