//! Debt ledger and settlement engine for shared-expense rooms.
//!
//! Every entry point takes an immutable [`Room`] snapshot and recomputes from
//! scratch: the engine keeps no state between calls and performs no I/O.
//!
//! ```rust
//! # use chrono::Utc;
//! # use uuid::Uuid;
//! use engine::{Member, MemberId, Operation, Room, RoomStates};
//!
//! let member = |id, name: &str| Member { id: MemberId(id), name: name.to_string(), handle: None };
//! let room = Room {
//!     id: Uuid::new_v4(),
//!     name: "Pizza night".to_string(),
//!     members: vec![member(1, "Ann"), member(2, "Bob")],
//!     operations: vec![Operation {
//!         id: Uuid::new_v4(),
//!         description: "Pizza".to_string(),
//!         donor: Some(MemberId(1)),
//!         recipients: vec![MemberId(1), MemberId(2)],
//!         sum: 2400,
//!         is_repayment: false,
//!         created_at: Utc::now(),
//!     }],
//!     states: RoomStates::default(),
//!     created_at: Utc::now(),
//! };
//!
//! let report = engine::compute_debts(&room).unwrap();
//! assert_eq!(report.debts.len(), 1);
//! assert_eq!(report.debts[0].debtor.name, "Bob");
//! assert_eq!(report.debts[0].sum, 1200);
//! ```

use serde::Serialize;

pub use balances::{Aggregation, BalanceTable, aggregate};
pub use error::{EngineError, InvalidOperationError, InvalidOperationReason};
pub use money::Money;
pub use netting::{Debt, simplify};
pub use operation::{Operation, split_sum};
pub use phase::{PartyPhase, classify};
pub use room::{Member, MemberId, Room, RoomStates};
pub use statistics::{MemberSummary, RoomSummary};

mod balances;
mod error;
mod money;
mod netting;
mod operation;
mod phase;
mod room;
mod statistics;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Netted debts of a room together with the operations left out of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DebtReport {
    pub debts: Vec<Debt>,
    pub rejected: Vec<InvalidOperationError>,
}

/// Computes the minimal pairwise debts of the room.
pub fn compute_debts(room: &Room) -> ResultEngine<DebtReport> {
    let aggregation = aggregate(room)?;
    let debts = simplify(&aggregation.balances, room)?;
    Ok(DebtReport {
        debts,
        rejected: aggregation.rejected,
    })
}

/// Debts in which `user` is either the debtor or the lender.
pub fn user_debts(room: &Room, user: MemberId) -> ResultEngine<Vec<Debt>> {
    statistics::ensure_member(room, user)?;
    let report = compute_debts(room)?;
    Ok(report.debts.into_iter().filter(|d| d.involves(user)).collect())
}

/// Returns `(owed, lent)`: what `user` owes others and what others owe them.
pub fn user_debt_and_lend(room: &Room, user: MemberId) -> ResultEngine<(i64, i64)> {
    statistics::ensure_member(room, user)?;
    let report = compute_debts(room)?;
    statistics::debt_and_lend(&report.debts, user)
}

/// The user's own share of every accepted expense of the room.
pub fn user_cost_share(room: &Room, user: MemberId) -> ResultEngine<i64> {
    statistics::ensure_member(room, user)?;
    Ok(aggregate(room)?.cost_share(user))
}

/// Sum of every accepted expense; repayments are not spending.
pub fn total_cost(room: &Room) -> ResultEngine<i64> {
    Ok(aggregate(room)?.total_cost)
}

/// Sum of the netted debts still to be settled.
pub fn total_debt_outstanding(room: &Room) -> ResultEngine<i64> {
    let report = compute_debts(room)?;
    statistics::total_outstanding(&report.debts)
}

/// Per-member figures and room totals from a single fold of the ledger.
pub fn room_summary(room: &Room) -> ResultEngine<RoomSummary> {
    let aggregation = aggregate(room)?;
    let debts = simplify(&aggregation.balances, room)?;
    statistics::summarize(room, &aggregation, &debts)
}

pub fn resolve_phase(room: &Room) -> PartyPhase {
    phase::resolve(room)
}

/// Members the room is still waiting on in its current phase.
pub fn pending_members(room: &Room) -> Vec<&Member> {
    phase::pending_members(room)
}
