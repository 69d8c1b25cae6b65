//! Leftover quantity calculation.

use procura_shared::types::ItemKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fulfillment::{OrderLine, ReconciliationContext};

/// Quantity of an order line still to be received, floored at zero.
#[must_use]
pub fn leftover(ordered_quantity: Decimal, total_received: Decimal) -> Decimal {
    (ordered_quantity - total_received).max(Decimal::ZERO)
}

/// Leftover figures for one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftoverLine {
    /// Item identity.
    pub item: ItemKey,
    /// Ordered quantity.
    pub ordered_quantity: Decimal,
    /// Everything received so far.
    pub total_received: Decimal,
    /// `max(0, ordered - received)`.
    pub leftover_quantity: Decimal,
}

/// Computes the leftover of every order line against `context`.
#[must_use]
pub fn leftovers(lines: &[OrderLine], context: &ReconciliationContext) -> Vec<LeftoverLine> {
    lines
        .iter()
        .map(|line| {
            let total_received = context.received(&line.item);
            LeftoverLine {
                item: line.item.clone(),
                ordered_quantity: line.ordered_quantity,
                total_received,
                leftover_quantity: leftover(line.ordered_quantity, total_received),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leftover() {
        assert_eq!(leftover(dec!(20), dec!(5)), dec!(15));
        assert_eq!(leftover(dec!(20), dec!(20)), dec!(0));
        assert_eq!(leftover(dec!(20), dec!(25)), dec!(0));
        assert_eq!(leftover(dec!(0), dec!(0)), dec!(0));
        assert_eq!(leftover(dec!(2.5), dec!(0.75)), dec!(1.75));
    }

    #[test]
    fn test_leftovers_per_line() {
        let line = |item: &str, ordered| OrderLine {
            item: ItemKey::new(item).unwrap(),
            item_name: None,
            ordered_quantity: ordered,
            unit_price: dec!(1),
            cost_code: None,
        };
        let mut ctx = ReconciliationContext::default();
        ctx.total_received_by_item
            .insert(ItemKey::new("a").unwrap(), dec!(4));

        let result = leftovers(&[line("A", dec!(10)), line("b", dec!(3))], &ctx);
        assert_eq!(result[0].total_received, dec!(4));
        assert_eq!(result[0].leftover_quantity, dec!(6));
        assert_eq!(result[1].total_received, dec!(0));
        assert_eq!(result[1].leftover_quantity, dec!(3));
    }
}
