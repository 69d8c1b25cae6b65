//! Order fulfillment status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfillment status of a purchase or change order.
///
/// Only `Approved`, `PartiallyReceived` and `Completed` are produced by the
/// status deriver. The rest are set by the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderFulfillmentStatus {
    /// Approved, nothing received yet.
    #[serde(rename = "Approved")]
    Approved,
    /// Some lines still outstanding, or deliberately kept open.
    #[serde(rename = "Partially_Received")]
    PartiallyReceived,
    /// Every line fully received.
    #[serde(rename = "Completed")]
    Completed,
    /// Rejected during approval.
    #[serde(rename = "Rejected")]
    Rejected,
    /// Being drafted.
    #[serde(rename = "Draft")]
    Draft,
    /// Ready for approval.
    #[serde(rename = "Ready")]
    Ready,
}

impl OrderFulfillmentStatus {
    /// Returns the stored string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::PartiallyReceived => "Partially_Received",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Draft => "Draft",
            Self::Ready => "Ready",
        }
    }

    /// Parses a status, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Some(Self::Approved),
            "partially_received" => Some(Self::PartiallyReceived),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            "draft" => Some(Self::Draft),
            "ready" => Some(Self::Ready),
            _ => None,
        }
    }

    /// Returns true if goods can be received against the order.
    #[must_use]
    pub fn accepts_receipts(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::PartiallyReceived | Self::Completed
        )
    }
}

impl fmt::Display for OrderFulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            OrderFulfillmentStatus::Approved,
            OrderFulfillmentStatus::PartiallyReceived,
            OrderFulfillmentStatus::Completed,
            OrderFulfillmentStatus::Rejected,
            OrderFulfillmentStatus::Draft,
            OrderFulfillmentStatus::Ready,
        ] {
            assert_eq!(OrderFulfillmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            OrderFulfillmentStatus::parse("PARTIALLY_RECEIVED"),
            Some(OrderFulfillmentStatus::PartiallyReceived)
        );
        assert_eq!(OrderFulfillmentStatus::parse("closed"), None);
    }

    #[test]
    fn test_status_serde_uses_stored_names() {
        let json = serde_json::to_string(&OrderFulfillmentStatus::PartiallyReceived).unwrap();
        assert_eq!(json, "\"Partially_Received\"");
    }

    #[test]
    fn test_accepts_receipts() {
        assert!(OrderFulfillmentStatus::Approved.accepts_receipts());
        assert!(OrderFulfillmentStatus::PartiallyReceived.accepts_receipts());
        assert!(!OrderFulfillmentStatus::Draft.accepts_receipts());
        assert!(!OrderFulfillmentStatus::Rejected.accepts_receipts());
    }
}
