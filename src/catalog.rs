//! Restaurant menu and prices
//!
//! Prices are whole cents so totals never drift; they parse from and print
//! as dollar strings like `"$12.99"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, PriceError};

/// Amount of money in cents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units
    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(quantity as u64))
    }

    /// Take `percent` off, rounding half a cent up. Anything above 100 is free.
    pub fn discounted(&self, percent: u8) -> Price {
        let keep = 100 - percent.min(100) as u128;
        Price(((self.0 as u128 * keep + 50) / 100) as u64)
    }
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let malformed = || PriceError::Malformed(s.to_string());

        let (whole, frac) = match amount.split_once('.') {
            Some((w, f)) => (w, f),
            None => (amount, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(malformed());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        if frac.len() > 2 {
            return Err(PriceError::TooPrecise(s.to_string()));
        }

        let dollars: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceError::Overflow(s.to_string()))?
        };
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => frac.parse().map_err(|_| malformed())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Price)
            .ok_or_else(|| PriceError::Overflow(s.to_string()))
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> String {
        price.to_string()
    }
}

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Star rating out of 5
    pub rating: f32,
    #[serde(default)]
    pub popular: bool,
}

/// The full menu, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<MenuItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::house_menu()
    }
}

impl Catalog {
    /// Load a menu from a JSON array of items
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(CatalogError::DuplicateItem(item.id));
            }
        }
        log::info!("Loaded menu with {} items", items.len());
        Ok(Self { items })
    }

    pub fn get(&self, id: u32) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items flagged as popular, in menu order
    pub fn popular(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.popular)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The restaurant's standard menu
    pub fn house_menu() -> Self {
        let item = |id, name: &str, description: &str, cents, rating, popular| MenuItem {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: Price::from_cents(cents),
            rating,
            popular,
        };

        Self {
            items: vec![
                item(
                    1,
                    "The Stack Master",
                    "Our signature burger with all the fixings - bacon, cheese, lettuce, tomato, onions, and our secret sauce!",
                    1299,
                    4.9,
                    true,
                ),
                item(
                    2,
                    "The Complete Tower",
                    "All 8 ingredients stacked high - bottom bun, meat, cheese, lettuce, tomato, onions, bacon, and top bun!",
                    1599,
                    4.7,
                    true,
                ),
                item(
                    3,
                    "Cheese Explosion",
                    "Double cheese, double flavor! Perfect for cheese lovers.",
                    1099,
                    4.8,
                    false,
                ),
                item(
                    4,
                    "Bacon Bliss",
                    "Crispy bacon strips that'll make your taste buds dance!",
                    1199,
                    4.9,
                    true,
                ),
                item(
                    5,
                    "Fresh & Crispy",
                    "Garden fresh lettuce, juicy tomatoes, and sweet onions for the perfect crunch!",
                    999,
                    4.6,
                    false,
                ),
                item(
                    6,
                    "Garden Fresh",
                    "Fresh lettuce and crispy onions for the health-conscious burger lover.",
                    899,
                    4.5,
                    false,
                ),
                item(
                    7,
                    "Onion Ring Special",
                    "Sweet caramelized onions that add the perfect flavor punch!",
                    799,
                    4.4,
                    false,
                ),
                item(
                    8,
                    "Classic Foundation",
                    "Our perfectly toasted bun - the foundation of every great burger!",
                    699,
                    4.7,
                    false,
                ),
                item(
                    9,
                    "Build Your Own",
                    "Create your perfect burger with our interactive stacking game!",
                    1699,
                    5.0,
                    true,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prices() {
        assert_eq!("$12.99".parse::<Price>().unwrap().cents(), 1299);
        assert_eq!("10".parse::<Price>().unwrap().cents(), 1000);
        assert_eq!("$7.5".parse::<Price>().unwrap().cents(), 750);
        assert_eq!(" $0.05 ".parse::<Price>().unwrap().cents(), 5);
        assert_eq!(".99".parse::<Price>().unwrap().cents(), 99);
    }

    #[test]
    fn test_reject_bad_prices() {
        assert_eq!("".parse::<Price>(), Err(PriceError::Empty));
        assert!(matches!("$".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$.".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("-$1.00".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$-1.00".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$1.2.3".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$1.999".parse::<Price>(), Err(PriceError::TooPrecise(_))));
        assert!(matches!(
            "$999999999999999999999".parse::<Price>(),
            Err(PriceError::Overflow(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1299).to_string(), "$12.99");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::from_cents(2000).to_string(), "$20.00");
    }

    #[test]
    fn test_discounted_rounds_once() {
        assert_eq!(Price::from_cents(2000).discounted(20).cents(), 1600);
        // 12.99 * 0.67 = 8.7033
        assert_eq!(Price::from_cents(1299).discounted(33).cents(), 870);
        // 0.05 * 0.5 = 0.025 -> 0.03
        assert_eq!(Price::from_cents(5).discounted(50).cents(), 3);
        assert_eq!(Price::from_cents(1299).discounted(0).cents(), 1299);
        assert_eq!(Price::from_cents(1299).discounted(150), Price::ZERO);
    }

    #[test]
    fn test_house_menu() {
        let menu = Catalog::house_menu();
        assert_eq!(menu.len(), 9);
        assert_eq!(menu.get(1).unwrap().price.to_string(), "$12.99");
        assert_eq!(menu.get(9).unwrap().name, "Build Your Own");
        assert!(menu.get(10).is_none());
        assert_eq!(menu.popular().count(), 4);
    }

    #[test]
    fn test_menu_json() {
        let json = r#"[
            { "id": 1, "name": "Slider", "description": "Small", "price": "$4.50", "rating": 4.2 },
            { "id": 2, "name": "Double", "description": "Big", "price": "$9.00", "rating": 4.8, "popular": true }
        ]"#;
        let menu = Catalog::from_json(json).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.get(1).unwrap().price.cents(), 450);
        assert!(!menu.get(1).unwrap().popular);

        let round_trip = serde_json::to_string(&menu.items).unwrap();
        assert!(round_trip.contains("\"$4.50\""));
    }

    #[test]
    fn test_menu_json_rejects_duplicates_and_bad_prices() {
        let dup = r#"[
            { "id": 1, "name": "A", "description": "", "price": "$1", "rating": 1.0 },
            { "id": 1, "name": "B", "description": "", "price": "$2", "rating": 1.0 }
        ]"#;
        assert!(matches!(Catalog::from_json(dup), Err(CatalogError::DuplicateItem(1))));

        let bad = r#"[{ "id": 1, "name": "A", "description": "", "price": "cheap", "rating": 1.0 }]"#;
        assert!(matches!(Catalog::from_json(bad), Err(CatalogError::Json(_))));
    }
}
