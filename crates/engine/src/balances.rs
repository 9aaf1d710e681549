//! Folds a room ledger into directed, gross balances.
//!
//! `balance[(debtor, lender)]` is what `debtor` owes `lender` before netting.
//! Expenses add each recipient's share to `balance[(recipient, donor)]`.
//! Repayments subtract from `balance[(donor, recipient)]` and may drive it
//! negative; the netting step resolves the sign.

use std::collections::BTreeMap;

use crate::{
    InvalidOperationError, MemberId, ResultEngine, Room,
    money::{checked_add, checked_sub},
    operation::Operation,
};

/// Directed pairwise balances keyed by `(debtor, lender)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceTable {
    entries: BTreeMap<(MemberId, MemberId), i64>,
}

impl BalanceTable {
    /// Gross amount `debtor` owes `lender`; 0 when the pair never transacted.
    pub fn get(&self, debtor: MemberId, lender: MemberId) -> i64 {
        self.entries.get(&(debtor, lender)).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = ((MemberId, MemberId), i64)> + '_ {
        self.entries.iter().map(|(pair, amount)| (*pair, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Members never owe themselves: self pairs are dropped.
    fn add(&mut self, debtor: MemberId, lender: MemberId, amount: i64) -> ResultEngine<()> {
        if debtor == lender {
            return Ok(());
        }
        let balance = self.entries.entry((debtor, lender)).or_insert(0);
        *balance = checked_add(*balance, amount, "balance")?;
        Ok(())
    }

    fn sub(&mut self, debtor: MemberId, lender: MemberId, amount: i64) -> ResultEngine<()> {
        if debtor == lender {
            return Ok(());
        }
        let balance = self.entries.entry((debtor, lender)).or_insert(0);
        *balance = checked_sub(*balance, amount, "balance")?;
        Ok(())
    }
}

/// Outcome of folding a room ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub balances: BalanceTable,
    /// Each member's own share of the group spending.
    pub cost_shares: BTreeMap<MemberId, i64>,
    /// Sum of all accepted expenses.
    pub total_cost: i64,
    /// Operations excluded from the fold, in ledger order.
    pub rejected: Vec<InvalidOperationError>,
}

impl Aggregation {
    pub fn cost_share(&self, member: MemberId) -> i64 {
        self.cost_shares.get(&member).copied().unwrap_or(0)
    }
}

/// Builds the balance table from every operation of the room.
///
/// Structurally broken operations are skipped and listed in
/// [`Aggregation::rejected`]. An operation naming an id outside
/// `room.members` fails the whole fold, and so does any total that
/// overflows `i64`.
pub fn aggregate(room: &Room) -> ResultEngine<Aggregation> {
    let mut aggregation = Aggregation::default();

    for operation in &room.operations {
        let donor = match operation.validate() {
            Ok(donor) => donor,
            Err(err) => {
                tracing::warn!("skipping operation: {err}");
                aggregation.rejected.push(err);
                continue;
            }
        };
        room.require_member(donor)?;
        for recipient in &operation.recipients {
            room.require_member(*recipient)?;
        }

        if operation.is_repayment {
            apply_repayment(&mut aggregation, donor, operation)?;
        } else {
            apply_expense(&mut aggregation, donor, operation)?;
        }
    }

    tracing::debug!(
        "aggregated room {}: {} operations, {} rejected, {} balances",
        room.id,
        room.operations.len(),
        aggregation.rejected.len(),
        aggregation.balances.entries.len()
    );
    Ok(aggregation)
}

fn apply_expense(
    aggregation: &mut Aggregation,
    donor: MemberId,
    operation: &Operation,
) -> ResultEngine<()> {
    for (recipient, share) in operation.shares() {
        aggregation.balances.add(recipient, donor, share)?;
        let cost_share = aggregation.cost_shares.entry(recipient).or_insert(0);
        *cost_share = checked_add(*cost_share, share, "cost share")?;
    }
    aggregation.total_cost = checked_add(aggregation.total_cost, operation.sum, "total cost")?;
    Ok(())
}

// A repayment to several recipients is split with the expense rule, so the
// total repaid is still `operation.sum`.
fn apply_repayment(
    aggregation: &mut Aggregation,
    donor: MemberId,
    operation: &Operation,
) -> ResultEngine<()> {
    for (recipient, share) in operation.shares() {
        aggregation.balances.sub(donor, recipient, share)?;
    }
    Ok(())
}
