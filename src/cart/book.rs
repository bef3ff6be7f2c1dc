use super::CartError;
use crate::domain::CartLine;

/// Cart lines for every user, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CartBook {
    lines: Vec<CartLine>,
}

impl CartBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, user_id: &str, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        self.lines.push(CartLine {
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Drops every line the user holds for `product_id`.
    pub fn remove_product(&mut self, user_id: &str, product_id: &str) -> Result<usize, CartError> {
        let before = self.lines.len();
        self.lines
            .retain(|line| !(line.user_id == user_id && line.product_id == product_id));
        match before - self.lines.len() {
            0 => Err(CartError::NotInCart(product_id.to_string())),
            removed => Ok(removed),
        }
    }

    /// Owned snapshot of the user's lines; later changes to the book do not show up in it.
    pub fn lines_for(&self, user_id: &str) -> Vec<CartLine> {
        self.lines
            .iter()
            .filter(|line| line.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn clear(&mut self, user_id: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.user_id != user_id);
        before - self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_insertion_order_per_user() {
        let mut cart = CartBook::new();
        cart.add_line("user_1", "product_2", 1).unwrap();
        cart.add_line("user_2", "product_1", 4).unwrap();
        cart.add_line("user_1", "product_1", 2).unwrap();

        let products: Vec<String> = cart.lines_for("user_1").into_iter().map(|l| l.product_id).collect();
        assert_eq!(products, vec!["product_2", "product_1"]);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut cart = CartBook::new();
        assert_eq!(cart.add_line("user_1", "product_1", 0), Err(CartError::InvalidQuantity(0)));
        assert!(cart.lines_for("user_1").is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_later_additions() {
        let mut cart = CartBook::new();
        cart.add_line("user_1", "product_1", 1).unwrap();

        let snapshot = cart.lines_for("user_1");
        cart.add_line("user_1", "product_2", 1).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(cart.lines_for("user_1").len(), 2);
    }

    #[test]
    fn clear_only_touches_one_user() {
        let mut cart = CartBook::new();
        cart.add_line("user_1", "product_1", 1).unwrap();
        cart.add_line("user_1", "product_2", 1).unwrap();
        cart.add_line("user_2", "product_1", 1).unwrap();

        assert_eq!(cart.clear("user_1"), 2);
        assert!(cart.lines_for("user_1").is_empty());
        assert_eq!(cart.lines_for("user_2").len(), 1);
    }

    #[test]
    fn remove_product_adjusts_cart() {
        let mut cart = CartBook::new();
        cart.add_line("user_1", "product_1", 1).unwrap();
        cart.add_line("user_1", "product_1", 2).unwrap();

        assert_eq!(cart.remove_product("user_1", "product_1"), Ok(2));
        assert_eq!(
            cart.remove_product("user_1", "product_1"),
            Err(CartError::NotInCart("product_1".into()))
        );
    }
}
