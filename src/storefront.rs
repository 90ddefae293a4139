//! Application context: menu, cart, earned discount and the game overlay
//!
//! The host forwards clicks here and renders `snapshot()`. The stacking game
//! only exists while its overlay is open; when a session completes its reward
//! becomes the active discount and the overlay closes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, Price};
use crate::config::GameConfig;
use crate::sim::{GameEvent, GameSnapshot, GameState};

/// An earned discount percentage, clamped to the configured reward bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount(u8);

impl Discount {
    pub fn new(percent: u8, config: &GameConfig) -> Self {
        Discount(config.clamp_reward(percent as i64))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Notifications for the host (toasts, badges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    ItemAdded {
        item_id: u32,
        name: String,
        quantity: u32,
    },
    GameOpened,
    GameClosed,
    DiscountEarned {
        percent: u8,
    },
    /// Forwarded from the open game (stage starts, drops, reward computed)
    Game(GameEvent),
}

/// Render-ready view of the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub subtotal: Price,
    pub total: Price,
    pub discount: Option<u8>,
    pub game: Option<GameSnapshot>,
}

#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    config: GameConfig,
    cart: Cart,
    discount: Option<Discount>,
    /// Open game overlay, if any
    game: Option<GameState>,
    events: Vec<StoreEvent>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(Catalog::default(), GameConfig::default())
    }
}

impl Storefront {
    pub fn new(catalog: Catalog, config: GameConfig) -> Self {
        Self {
            catalog,
            config,
            cart: Cart::new(),
            discount: None,
            game: None,
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn discount(&self) -> Option<Discount> {
        self.discount
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    // === Cart ===

    /// Add one of a menu item. Returns None for ids not on the menu.
    pub fn add_to_cart(&mut self, item_id: u32) -> Option<StoreEvent> {
        let Some(item) = self.catalog.get(item_id) else {
            log::warn!("add_to_cart: no menu item {}", item_id);
            return None;
        };
        let quantity = self.cart.add_item(item.id, item.name.clone(), item.price);
        log::info!("{} added to cart (x{})", item.name, quantity);

        let event = StoreEvent::ItemAdded {
            item_id,
            name: item.name.clone(),
            quantity,
        };
        self.events.push(event.clone());
        Some(event)
    }

    pub fn increment(&mut self, item_id: u32) -> Option<u32> {
        self.cart.increment_line(item_id)
    }

    pub fn decrement(&mut self, item_id: u32) -> Option<u32> {
        self.cart.decrement_line(item_id)
    }

    pub fn item_count(&self) -> u32 {
        self.cart.total_item_count()
    }

    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    /// Cart total with the active discount applied
    pub fn total(&self) -> Price {
        self.cart.total_price(self.discount.map(|d| d.percent()))
    }

    // === Game overlay ===

    pub fn open_game(&mut self) {
        if self.game.is_none() {
            self.game = Some(GameState::new(self.config.clone()));
            self.events.push(StoreEvent::GameOpened);
        }
    }

    /// Open the overlay if needed and start a session
    pub fn start_game(&mut self) {
        self.open_game();
        if let Some(game) = self.game.as_mut() {
            game.start_session();
        }
    }

    pub fn drop_item(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.drop_item();
        }
    }

    /// Restart button: back to the intro without closing
    pub fn restart_game(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.reset_session();
        }
    }

    /// Close the overlay, abandoning any session in progress
    pub fn close_game(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.close_session();
            self.events.push(StoreEvent::GameClosed);
        }
    }

    /// Advance the open game by `dt_ms` and react to what it reports
    pub fn update(&mut self, dt_ms: u32) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        game.advance_time(dt_ms);

        for event in game.drain_events() {
            if let GameEvent::Completed { discount } = event {
                self.apply_reward(discount);
                self.close_game();
                break;
            }
            self.events.push(StoreEvent::Game(event));
        }
    }

    /// Make `percent` the active discount, replacing any earlier one
    pub fn apply_reward(&mut self, percent: u8) {
        let discount = Discount::new(percent, &self.config);
        if let Some(previous) = self.discount {
            log::info!("Discount {} replaces {}", discount, previous);
        } else {
            log::info!("Discount {} active", discount);
        }
        self.discount = Some(discount);
        self.events.push(StoreEvent::DiscountEarned {
            percent: discount.percent(),
        });
    }

    /// Empty the cart, forget the discount and close the game
    pub fn reset(&mut self) {
        self.close_game();
        self.cart.clear();
        self.discount = None;
        self.events.clear();
    }

    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            lines: self.cart.lines().to_vec(),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
            total: self.total(),
            discount: self.discount.map(|d| d.percent()),
            game: self.game.as_ref().map(GameState::snapshot),
        }
    }
}
