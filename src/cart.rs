//! Shopping cart
//!
//! One line per item id, kept in the order items were first added. A line
//! never holds a zero quantity: decrementing the last unit removes it.

use serde::{Deserialize, Serialize};

use crate::catalog::Price;

/// A line item in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: u32,
    pub name: String,
    pub unit_price: Price,
    /// Always at least 1
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit, creating the line at the end if the item is new.
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, item_id: u32, name: impl Into<String>, unit_price: Price) -> u32 {
        if let Some(line) = self.line_mut(item_id) {
            line.quantity += 1;
            return line.quantity;
        }

        let name = name.into();
        log::debug!("Cart: new line {} ({})", item_id, name);
        self.lines.push(CartLine {
            item_id,
            name,
            unit_price,
            quantity: 1,
        });
        1
    }

    /// Add one unit to an existing line. Returns the new quantity, or None if absent.
    pub fn increment_line(&mut self, item_id: u32) -> Option<u32> {
        let line = self.line_mut(item_id)?;
        line.quantity += 1;
        Some(line.quantity)
    }

    /// Remove one unit from a line, dropping the line at zero.
    /// Returns the remaining quantity (0 if the line went away), or None if absent.
    pub fn decrement_line(&mut self, item_id: u32) -> Option<u32> {
        let idx = self.lines.iter().position(|l| l.item_id == item_id)?;
        if self.lines[idx].quantity > 1 {
            self.lines[idx].quantity -= 1;
            Some(self.lines[idx].quantity)
        } else {
            let line = self.lines.remove(idx);
            log::debug!("Cart: removed line {} ({})", line.item_id, line.name);
            Some(0)
        }
    }

    pub fn line(&self, item_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    fn line_mut(&mut self, item_id: u32) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.item_id == item_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all lines before any discount
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of all lines, with `discount_percent` taken off the final amount
    pub fn total_price(&self, discount_percent: Option<u8>) -> Price {
        let subtotal = self.subtotal();
        match discount_percent {
            Some(pct) => subtotal.discounted(pct),
            None => subtotal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn burger() -> Price {
        Price::from_cents(1000)
    }

    #[test]
    fn test_repeat_add_aggregates() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(1, "Burger", burger()), 1);
        assert_eq!(cart.add_item(1, "Burger", burger()), 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(1).unwrap().quantity, 2);
        assert_eq!(cart.total_price(None).cents(), 2000);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(3, "C", burger());
        cart.add_item(1, "A", burger());
        cart.add_item(3, "C", burger());
        cart.add_item(2, "B", burger());

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_decrement_removes_at_one() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", burger());
        cart.add_item(2, "Fries", Price::from_cents(399));

        assert_eq!(cart.decrement_line(1), Some(0));
        assert!(cart.line(1).is_none());
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.total_price(None).cents(), 399);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", burger());
        assert_eq!(cart.increment_line(1), Some(2));
        assert_eq!(cart.decrement_line(1), Some(1));
        assert_eq!(cart.line(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_missing_lines_are_noops() {
        let mut cart = Cart::new();
        assert_eq!(cart.increment_line(42), None);
        assert_eq!(cart.decrement_line(42), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_discounted_total() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", burger());
        cart.add_item(1, "Burger", burger());
        assert_eq!(cart.total_price(Some(20)).to_string(), "$16.00");
    }

    #[test]
    fn test_discount_rounds_final_amount_only() {
        let mut cart = Cart::new();
        // Three lines of $0.05 at 50% off: per-line rounding would give $0.09
        cart.add_item(1, "Mint", Price::from_cents(5));
        cart.add_item(2, "Gum", Price::from_cents(5));
        cart.add_item(3, "Toothpick", Price::from_cents(5));
        assert_eq!(cart.total_price(Some(50)).cents(), 8);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(1, "Burger", burger());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(Some(10)), Price::ZERO);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32),
        Inc(u32),
        Dec(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..5).prop_map(Op::Add),
            (0u32..5).prop_map(Op::Inc),
            (0u32..5).prop_map(Op::Dec),
        ]
    }

    proptest! {
        #[test]
        fn prop_quantities_never_zero(ops in prop::collection::vec(op(), 0..200)) {
            let mut cart = Cart::new();
            let mut expected = [0u32; 5];

            for op in ops {
                match op {
                    Op::Add(id) => {
                        cart.add_item(id, format!("item-{id}"), Price::from_cents(100 + id as u64));
                        expected[id as usize] += 1;
                    }
                    Op::Inc(id) => {
                        if cart.increment_line(id).is_some() {
                            expected[id as usize] += 1;
                        }
                    }
                    Op::Dec(id) => {
                        if cart.decrement_line(id).is_some() {
                            expected[id as usize] -= 1;
                        }
                    }
                }

                prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));
                prop_assert_eq!(cart.total_item_count(), expected.iter().sum::<u32>());
                for (id, &qty) in expected.iter().enumerate() {
                    let line_qty = cart.line(id as u32).map(|l| l.quantity).unwrap_or(0);
                    prop_assert_eq!(line_qty, qty);
                }
            }
        }
    }
}
