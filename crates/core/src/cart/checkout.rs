//! Checkout submission state machine.
//!
//! A cart moves through `draft → submitting → confirmed | failed` during
//! checkout. A failed submission returns to `draft` with the cart intact
//! (already-created server records are not rolled back — the server owns
//! that concern); a confirmed submission is terminal and clears the
//! persisted cart snapshot.

use serde::{Deserialize, Serialize};

use crate::types::OrderId;

/// State of an order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "orderId")]
pub enum SubmissionState {
    /// Cart assembled, nothing sent yet.
    Draft,
    /// Customer lookup-or-create, order create, and item create are in
    /// flight as a sequence.
    Submitting,
    /// The server returned an order id; the receipt can be materialized.
    Confirmed(OrderId),
    /// Some step errored. The cart is kept so the customer can retry.
    Failed,
}

/// An attempted transition that the state machine does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} from {from:?}")]
pub struct TransitionError {
    pub from: SubmissionState,
    pub action: &'static str,
}

impl SubmissionState {
    /// Begin submitting. Only valid from `Draft`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] from any other state.
    pub fn begin(self) -> Result<Self, TransitionError> {
        match self {
            Self::Draft => Ok(Self::Submitting),
            from => Err(TransitionError { from, action: "begin" }),
        }
    }

    /// Record the order id returned by the server. Only valid from
    /// `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] from any other state.
    pub fn confirm(self, order_id: OrderId) -> Result<Self, TransitionError> {
        match self {
            Self::Submitting => Ok(Self::Confirmed(order_id)),
            from => Err(TransitionError { from, action: "confirm" }),
        }
    }

    /// Record a failed step. Only valid from `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] from any other state.
    pub fn fail(self) -> Result<Self, TransitionError> {
        match self {
            Self::Submitting => Ok(Self::Failed),
            from => Err(TransitionError { from, action: "fail" }),
        }
    }

    /// Return to `Draft` after a failure, prior cart intact.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] from any other state.
    pub fn retry(self) -> Result<Self, TransitionError> {
        match self {
            Self::Failed => Ok(Self::Draft),
            from => Err(TransitionError { from, action: "retry" }),
        }
    }

    /// Whether the submission reached a successful end state.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Draft
    }
}
