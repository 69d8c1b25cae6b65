//! Over-receipt validation.
//!
//! Local to the note being saved: it compares each draft line against its
//! own ordered quantity and never consults other notes.

use procura_shared::types::ItemKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::OverReceivedError;
use crate::fulfillment::DraftReceiptLine;
use crate::fulfillment::types::item_label;

/// A draft line receiving more than was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverReceivedLine {
    /// Item identity.
    pub item: ItemKey,
    /// Display name, if known.
    pub item_name: Option<String>,
    /// Ordered quantity.
    pub ordered_quantity: Decimal,
    /// Received quantity on the draft.
    pub received_quantity: Decimal,
    /// `received - ordered`.
    pub over_received_quantity: Decimal,
}

impl OverReceivedLine {
    /// Name shown to the user.
    #[must_use]
    pub fn label(&self) -> &str {
        item_label(&self.item, self.item_name.as_deref())
    }
}

/// Lists every draft line whose received quantity exceeds its ordered quantity.
///
/// Lines ordered at zero are ad hoc additions with no baseline and are never flagged.
#[must_use]
pub fn validate_over_received(proposed: &[DraftReceiptLine]) -> Vec<OverReceivedLine> {
    proposed
        .iter()
        .filter(|line| {
            line.ordered_quantity > Decimal::ZERO && line.received_quantity > line.ordered_quantity
        })
        .map(|line| OverReceivedLine {
            item: line.item.clone(),
            item_name: line.item_name.clone(),
            ordered_quantity: line.ordered_quantity,
            received_quantity: line.received_quantity,
            over_received_quantity: line.received_quantity - line.ordered_quantity,
        })
        .collect()
}

/// Hard gate before saving a receipt note.
///
/// # Errors
///
/// Returns `OverReceivedError` listing every flagged line.
pub fn ensure_not_over_received(proposed: &[DraftReceiptLine]) -> Result<(), OverReceivedError> {
    let lines = validate_over_received(proposed);
    if lines.is_empty() {
        Ok(())
    } else {
        Err(OverReceivedError { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft(ordered: Decimal, received: Decimal) -> DraftReceiptLine {
        DraftReceiptLine {
            item: ItemKey::new("sku").unwrap(),
            item_name: None,
            ordered_quantity: ordered,
            received_quantity: received,
            unit_price: dec!(1),
        }
    }

    #[rstest]
    #[case(dec!(10), dec!(15), Some(dec!(5)))]
    #[case(dec!(10), dec!(10), None)]
    #[case(dec!(10), dec!(3), None)]
    #[case(dec!(0), dec!(0), None)]
    #[case(dec!(0), dec!(8), None)]
    #[case(dec!(1.5), dec!(1.75), Some(dec!(0.25)))]
    fn test_over_received(
        #[case] ordered: Decimal,
        #[case] received: Decimal,
        #[case] expected: Option<Decimal>,
    ) {
        let result = validate_over_received(&[draft(ordered, received)]);
        assert_eq!(
            result.first().map(|line| line.over_received_quantity),
            expected
        );
    }

    #[test]
    fn test_gate_collects_all_lines() {
        let lines = [
            draft(dec!(10), dec!(11)),
            draft(dec!(10), dec!(9)),
            draft(dec!(2), dec!(4)),
        ];
        let err = ensure_not_over_received(&lines).unwrap_err();
        assert_eq!(err.lines.len(), 2);
        assert!(ensure_not_over_received(&lines[1..2]).is_ok());
    }
}
