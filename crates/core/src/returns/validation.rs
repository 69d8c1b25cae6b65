//! Return-note validation.

use std::collections::BTreeMap;

use procura_shared::types::{ItemKey, NoteId};
use rust_decimal::Decimal;

use super::error::{ExcessReturnLine, ReturnNoteError};
use crate::fulfillment::types::item_label;
use crate::fulfillment::{DraftReturnLine, OrderRef, ReceiptRecord, ReturnRecord, aggregate};

/// Validates a return-note draft against the order's history.
///
/// For every item, the draft may send back at most what was received and not
/// already returned by other notes. The note being edited is excluded from
/// history. Draft lines for the same item are summed; zero-quantity lines are ignored.
///
/// # Errors
///
/// - `ReturnNoteError::Empty` if no line has a positive quantity
/// - `ReturnNoteError::ExceedsReturnable` listing every offending item
pub fn validate_return(
    order: &OrderRef,
    draft: &[DraftReturnLine],
    receipts: &[ReceiptRecord],
    returns: &[ReturnRecord],
    exclude_note: Option<NoteId>,
) -> Result<(), ReturnNoteError> {
    let mut requested: BTreeMap<&ItemKey, (Decimal, &str)> = BTreeMap::new();
    for line in draft.iter().filter(|l| l.return_quantity > Decimal::ZERO) {
        let entry = requested
            .entry(&line.item)
            .or_insert((Decimal::ZERO, item_label(&line.item, line.item_name.as_deref())));
        entry.0 += line.return_quantity;
    }

    if requested.is_empty() {
        return Err(ReturnNoteError::Empty);
    }

    let context = aggregate(order, receipts, returns, exclude_note);
    let excess: Vec<ExcessReturnLine> = requested
        .into_iter()
        .filter_map(|(item, (return_quantity, label))| {
            let returnable_quantity = context.returnable(item);
            (return_quantity > returnable_quantity).then(|| ExcessReturnLine {
                item: item.clone(),
                label: label.to_string(),
                returnable_quantity,
                return_quantity,
            })
        })
        .collect();

    if excess.is_empty() {
        Ok(())
    } else {
        Err(ReturnNoteError::ExceedsReturnable(excess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fulfillment::Lifecycle;
    use procura_shared::types::OrderId;
    use rust_decimal_macros::dec;

    fn key(s: &str) -> ItemKey {
        ItemKey::new(s).unwrap()
    }

    fn receipt(order: OrderRef, item: &str, qty: Decimal) -> ReceiptRecord {
        ReceiptRecord {
            note: Some(NoteId::new()),
            order,
            item: key(item),
            received_quantity: qty,
            lifecycle: Lifecycle::Active,
        }
    }

    fn ret(order: OrderRef, note: NoteId, item: &str, qty: Decimal) -> ReturnRecord {
        ReturnRecord {
            note: Some(note),
            order,
            item: key(item),
            return_quantity: qty,
            lifecycle: Lifecycle::Active,
        }
    }

    fn line(item: &str, qty: Decimal) -> DraftReturnLine {
        DraftReturnLine {
            item: key(item),
            item_name: None,
            return_quantity: qty,
        }
    }

    #[test]
    fn test_within_returnable_ok() {
        let order = OrderRef::purchase_order(OrderId::new());
        let receipts = [receipt(order, "a", dec!(10))];
        let returns = [ret(order, NoteId::new(), "a", dec!(4))];

        let draft = [line("a", dec!(6))];
        assert!(validate_return(&order, &draft, &receipts, &returns, None).is_ok());
    }

    #[test]
    fn test_exceeding_returnable_fails() {
        let order = OrderRef::purchase_order(OrderId::new());
        let receipts = [receipt(order, "a", dec!(10)), receipt(order, "b", dec!(1))];
        let returns = [ret(order, NoteId::new(), "a", dec!(4))];

        let err = validate_return(
            &order,
            &[line("a", dec!(4)), line("A", dec!(3)), line("b", dec!(1))],
            &receipts,
            &returns,
            None,
        )
        .unwrap_err();

        let ReturnNoteError::ExceedsReturnable(lines) = err else {
            panic!("expected ExceedsReturnable");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].returnable_quantity, dec!(6));
        assert_eq!(lines[0].return_quantity, dec!(7));
    }

    #[test]
    fn test_editing_note_excluded_from_history() {
        let order = OrderRef::purchase_order(OrderId::new());
        let editing = NoteId::new();
        let receipts = [receipt(order, "a", dec!(5))];
        let returns = [ret(order, editing, "a", dec!(5))];

        let draft = [line("a", dec!(5))];
        assert!(validate_return(&order, &draft, &receipts, &returns, Some(editing)).is_ok());
        assert!(validate_return(&order, &draft, &receipts, &returns, None).is_err());
    }

    #[test]
    fn test_empty_draft_rejected() {
        let order = OrderRef::purchase_order(OrderId::new());
        assert_eq!(
            validate_return(&order, &[line("a", dec!(0))], &[], &[], None),
            Err(ReturnNoteError::Empty)
        );
    }
}
