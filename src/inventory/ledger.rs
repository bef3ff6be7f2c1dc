use tracing::{debug, warn};

use super::InventoryError;
use crate::domain::{ProductId, StockId, StockRecord};

/// Table of stock records, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    records: Vec<StockRecord>,
    next_id: u64,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, product_id: impl Into<ProductId>, quantity: u32, price: u64) -> StockId {
        self.next_id += 1;
        let id = format!("stock_{}", self.next_id);
        self.records.push(StockRecord {
            id: id.clone(),
            product_id: product_id.into(),
            quantity,
            price,
        });
        id
    }

    pub fn records_for(&self, product_id: &str) -> Vec<StockRecord> {
        self.records
            .iter()
            .filter(|record| record.product_id == product_id)
            .cloned()
            .collect()
    }

    /// Total units across every record of the product.
    pub fn available(&self, product_id: &str) -> u64 {
        self.records
            .iter()
            .filter(|record| record.product_id == product_id)
            .map(|record| u64::from(record.quantity))
            .sum()
    }

    /// Takes `requested` units from *each* record of the product.
    ///
    /// Every record must individually hold at least `requested`; the first one
    /// that does not is reported and nothing is decremented. A product without
    /// records passes untouched.
    pub fn check_and_decrement(&mut self, product_id: &str, requested: u32) -> Result<(), InventoryError> {
        if let Some(short) = self
            .records
            .iter()
            .find(|record| record.product_id == product_id && record.quantity < requested)
        {
            debug!(stock_id = %short.id, available = short.quantity, requested, "Stock record too low");
            return Err(InventoryError::InsufficientStock {
                product_id: product_id.to_string(),
                requested,
                available: short.quantity,
            });
        }

        let mut touched = 0usize;
        for record in self.records.iter_mut().filter(|record| record.product_id == product_id) {
            record.quantity -= requested;
            touched += 1;
        }

        if touched == 0 {
            warn!(product_id, "No stock records for product, nothing decremented");
        } else {
            debug!(product_id, requested, records = touched, "Stock decremented");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decrements_single_record() {
        let mut ledger = InventoryLedger::new();
        ledger.add_record("product_1", 10, 250);

        ledger.check_and_decrement("product_1", 3).unwrap();

        assert_eq!(ledger.available("product_1"), 7);
    }

    #[test]
    fn insufficient_record_is_left_alone() {
        let mut ledger = InventoryLedger::new();
        ledger.add_record("product_1", 2, 250);

        let err = ledger.check_and_decrement("product_1", 5).unwrap_err();

        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                product_id: "product_1".into(),
                requested: 5,
                available: 2,
            }
        );
        assert_eq!(ledger.records_for("product_1")[0].quantity, 2);
    }

    #[test]
    fn same_quantity_is_taken_from_every_record() {
        let mut ledger = InventoryLedger::new();
        ledger.add_record("product_1", 5, 100);
        ledger.add_record("product_2", 9, 100);
        ledger.add_record("product_1", 3, 120);

        ledger.check_and_decrement("product_1", 3).unwrap();

        let quantities: Vec<u32> = ledger.records_for("product_1").iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![2, 0]);
        assert_eq!(ledger.available("product_2"), 9);
    }

    #[test]
    fn one_short_record_fails_the_whole_call() {
        let mut ledger = InventoryLedger::new();
        ledger.add_record("product_1", 5, 100);
        ledger.add_record("product_1", 3, 120);

        let err = ledger.check_and_decrement("product_1", 4).unwrap_err();

        assert!(matches!(err, InventoryError::InsufficientStock { available: 3, .. }));
        assert_eq!(ledger.available("product_1"), 8);
    }

    #[test]
    fn product_without_records_passes() {
        let mut ledger = InventoryLedger::new();
        assert_eq!(ledger.check_and_decrement("ghost", 4), Ok(()));
        assert!(ledger.records_for("ghost").is_empty());
    }

    proptest! {
        #[test]
        fn never_goes_negative(
            stocks in prop::collection::vec(0u32..50, 1..5),
            requests in prop::collection::vec(1u32..20, 1..10),
        ) {
            let mut ledger = InventoryLedger::new();
            for quantity in &stocks {
                ledger.add_record("p", *quantity, 1);
            }

            for requested in requests {
                let before = ledger.records_for("p");
                match ledger.check_and_decrement("p", requested) {
                    Ok(()) => {
                        let after = ledger.records_for("p");
                        for (b, a) in before.iter().zip(after.iter()) {
                            prop_assert_eq!(a.quantity, b.quantity - requested);
                        }
                    }
                    Err(InventoryError::InsufficientStock { available, .. }) => {
                        prop_assert!(available < requested);
                        prop_assert_eq!(ledger.records_for("p"), before);
                    }
                }
            }
        }
    }
}
