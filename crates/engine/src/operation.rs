//! Operation primitives.
//!
//! An `Operation` is one recorded expense or repayment. Expenses split their
//! sum across the recipients; repayments reduce what the donor already owes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{InvalidOperationError, InvalidOperationReason, MemberId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    /// `None` when the donor record is missing from the stored document.
    #[serde(default)]
    pub donor: Option<MemberId>,
    #[serde(default)]
    pub recipients: Vec<MemberId>,
    /// Minor currency units.
    pub sum: i64,
    #[serde(default)]
    pub is_repayment: bool,
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Checks the structural invariants of the record and returns the donor.
    ///
    /// Membership of the ids is checked by the aggregator against the room.
    pub(crate) fn validate(&self) -> Result<MemberId, InvalidOperationError> {
        let reject = |reason| InvalidOperationError {
            operation_id: self.id,
            reason,
        };

        let donor = self.donor.ok_or(reject(InvalidOperationReason::MissingDonor))?;
        if self.sum <= 0 {
            return Err(reject(InvalidOperationReason::NonPositiveSum(self.sum)));
        }
        if !self.is_repayment && self.recipients.is_empty() {
            return Err(reject(InvalidOperationReason::NoRecipients));
        }
        Ok(donor)
    }

    /// Pairs each recipient with its share of the sum, see [`split_sum`].
    pub fn shares(&self) -> impl Iterator<Item = (MemberId, i64)> + '_ {
        self.recipients
            .iter()
            .copied()
            .zip(split_sum(self.sum, self.recipients.len()))
    }
}

/// Splits `sum` into `parts` integer shares that add up to `sum` exactly.
///
/// Every share gets `sum / parts`; the remainder is handed out one unit at a
/// time to the first shares. `parts == 0` yields no shares.
///
/// ```rust
/// assert_eq!(engine::split_sum(10, 3), vec![4, 3, 3]);
/// ```
pub fn split_sum(sum: i64, parts: usize) -> Vec<i64> {
    let Ok(n) = i64::try_from(parts) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }
    let base = sum / n;
    let remainder = sum % n;
    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}
