//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`UnknownMember`] thrown when a snapshot references a member id that is
//!   not part of the room. The whole computation fails.
//! - [`InvalidAmount`] thrown when a sum cannot be parsed.
//! - [`AmountOverflow`] thrown when a total no longer fits in an `i64`.
//!
//! A single malformed [`Operation`] is not an [`EngineError`]: it is reported
//! as an [`InvalidOperationError`] next to the result and the rest of the
//! ledger is still computed.
//!
//!  [`UnknownMember`]: EngineError::UnknownMember
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`AmountOverflow`]: EngineError::AmountOverflow
//!  [`Operation`]: crate::Operation
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::MemberId;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("member {0} is not part of the room")]
    UnknownMember(MemberId),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("amount overflow while computing {0}")]
    AmountOverflow(&'static str),
}

/// Why an operation was excluded from the balances.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InvalidOperationReason {
    #[error("operation has no donor")]
    MissingDonor,
    #[error("expense has no recipients")]
    NoRecipients,
    #[error("sum must be > 0, got {0}")]
    NonPositiveSum(i64),
}

/// An operation rejected during aggregation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[error("invalid operation {operation_id}: {reason}")]
pub struct InvalidOperationError {
    pub operation_id: Uuid,
    pub reason: InvalidOperationReason,
}
