//! Reconciliation service.
//!
//! Glues the pure reconciliation functions to a `FulfillmentRepository`.
//! History is read fresh for every call; nothing computed for one note is
//! reused for another.

use procura_shared::ReconciliationConfig;
use procura_shared::types::{CorporationId, NoteId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::types::{ReceiptEvaluation, StatusRefresh};
use crate::allocation::{
    CostCodeLine, FinancialLine, HoldbackBreakdown, NoteCharges, NoteFinancials, NoteTaxes,
};
use crate::error::ReconciliationError;
use crate::fulfillment::{DraftReceiptLine, DraftReturnLine, OrderRef, aggregate};
use crate::repository::{FulfillmentRepository, RepositoryError};
use crate::returns::validate_return;
use crate::shortfall::{
    OverReceivedError, detect, leftovers, remaining_shortfall, validate_over_received,
};
use crate::status::{StatusWrite, derive_status, plan_status_write};

/// Reconciliation service over a repository.
pub struct ReconciliationService<R> {
    repository: R,
    config: ReconciliationConfig,
}

impl<R: FulfillmentRepository> ReconciliationService<R> {
    /// Creates a service.
    #[must_use]
    pub fn new(repository: R, config: ReconciliationConfig) -> Self {
        Self { repository, config }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The active configuration.
    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Evaluates a receipt-note draft.
    ///
    /// `exclude_note` is the note being edited, if it was saved before; its
    /// stored lines are left out of the history.
    ///
    /// # Errors
    ///
    /// Returns `Repository` if the order or its history cannot be read.
    pub fn evaluate_receipt(
        &self,
        order: &OrderRef,
        draft: &[DraftReceiptLine],
        exclude_note: Option<NoteId>,
    ) -> Result<ReceiptEvaluation, ReconciliationError> {
        let lines = self.repository.order_lines(order)?;
        let receipts = self.repository.receipt_history(order)?;
        let returns = self.repository.return_history(order)?;

        let context = aggregate(order, &receipts, &returns, exclude_note);
        let shortfall = detect(&lines, draft, &context);
        let remaining = remaining_shortfall(order, &shortfall, &returns);
        let over_received = validate_over_received(draft);

        let mut projected = context.clone();
        for line in draft {
            *projected
                .total_received_by_item
                .entry(line.item.clone())
                .or_insert(Decimal::ZERO) += line.received_quantity;
        }

        let mut evaluation = ReceiptEvaluation {
            order: *order,
            leftovers: leftovers(&lines, &context),
            context,
            shortfall,
            remaining_shortfall: remaining,
            over_received,
            projected_status: derive_status(&lines, &projected, false),
            projected_context: projected,
        };
        evaluation.round_quantities(self.config.quantity_scale);

        debug!(
            order = %order,
            shortfall = evaluation.shortfall.len(),
            remaining_shortfall = evaluation.remaining_shortfall.len(),
            over_received = evaluation.over_received.len(),
            "Evaluated receipt draft"
        );

        Ok(evaluation)
    }

    /// Evaluates a receipt-note draft and rejects it if any line is over-received.
    ///
    /// # Errors
    ///
    /// - `OverReceived` listing every offending line
    /// - `Repository` if the order or its history cannot be read
    pub fn check_receipt(
        &self,
        order: &OrderRef,
        draft: &[DraftReceiptLine],
        exclude_note: Option<NoteId>,
    ) -> Result<ReceiptEvaluation, ReconciliationError> {
        let evaluation = self.evaluate_receipt(order, draft, exclude_note)?;
        if evaluation.can_save() {
            return Ok(evaluation);
        }

        warn!(
            order = %order,
            lines = evaluation.over_received.len(),
            "Receipt draft rejected: over-received"
        );
        Err(OverReceivedError {
            lines: evaluation.over_received,
        }
        .into())
    }

    /// Validates a return-note draft against fresh history.
    ///
    /// # Errors
    ///
    /// - `ReturnNote` if the draft is empty or returns more than is returnable
    /// - `Repository` if the history cannot be read
    pub fn check_return(
        &self,
        order: &OrderRef,
        draft: &[DraftReturnLine],
        exclude_note: Option<NoteId>,
    ) -> Result<(), ReconciliationError> {
        let receipts = self.repository.receipt_history(order)?;
        let returns = self.repository.return_history(order)?;
        validate_return(order, draft, &receipts, &returns, exclude_note)?;
        Ok(())
    }

    /// Computes receipt-note totals with the configured proration.
    #[must_use]
    pub fn note_financials(
        &self,
        lines: &[FinancialLine],
        charges: &NoteCharges,
        taxes: &NoteTaxes,
    ) -> NoteFinancials {
        NoteFinancials::compute(
            lines,
            charges,
            taxes,
            self.config.proration,
            self.config.amount_scale,
        )
    }

    /// Computes a holdback breakdown with the configured proration.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseExceedsHoldback` or `NegativeAmount` for invalid amounts.
    pub fn holdback_breakdown(
        &self,
        lines: &[CostCodeLine],
        holdback_total: Decimal,
        release_amount: Decimal,
    ) -> Result<HoldbackBreakdown, ReconciliationError> {
        HoldbackBreakdown::compute_with(
            self.config.proration,
            self.config.amount_scale,
            lines,
            holdback_total,
            release_amount,
        )
    }

    /// Re-derives and stores the order status after a receipt note was committed.
    ///
    /// Best effort: failures are logged and reported as `StatusRefresh::Failed`,
    /// never returned as errors, so the save that triggered the refresh stands.
    pub fn refresh_status(
        &self,
        order: &OrderRef,
        note_corporation: CorporationId,
        explicit_partial: bool,
    ) -> StatusRefresh {
        match self.try_refresh_status(order, note_corporation, explicit_partial) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    component = "order_status",
                    order = %order,
                    error = %err,
                    "Order status refresh failed"
                );
                StatusRefresh::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_refresh_status(
        &self,
        order: &OrderRef,
        note_corporation: CorporationId,
        explicit_partial: bool,
    ) -> Result<StatusRefresh, RepositoryError> {
        let header = self.repository.order_header(order)?;
        if !header.status.accepts_receipts() {
            debug!(
                component = "order_status",
                order = %order,
                status = %header.status,
                "Order not open for receipts, status left as is"
            );
            return Ok(StatusRefresh::Unchanged {
                status: header.status,
            });
        }

        let lines = self.repository.order_lines(order)?;
        let receipts = self.repository.receipt_history(order)?;
        let returns = self.repository.return_history(order)?;
        let context = aggregate(order, &receipts, &returns, None);
        let derived = derive_status(&lines, &context, explicit_partial);

        match plan_status_write(header.status, derived, header.corporation, note_corporation) {
            StatusWrite::Write { from, to } => {
                self.repository.write_order_status(order, to)?;
                info!(
                    component = "order_status",
                    order = %order,
                    from = %from,
                    to = %to,
                    "Order status updated"
                );
                Ok(StatusRefresh::Updated { from, to })
            }
            StatusWrite::Unchanged { status } => Ok(StatusRefresh::Unchanged { status }),
            StatusWrite::CorporationMismatch {
                order_corporation,
                note_corporation,
            } => {
                warn!(
                    component = "order_status",
                    order = %order,
                    order_corporation = %order_corporation,
                    note_corporation = %note_corporation,
                    "Corporation mismatch, status not written"
                );
                Ok(StatusRefresh::CorporationMismatch {
                    order_corporation,
                    note_corporation,
                })
            }
        }
    }
}
