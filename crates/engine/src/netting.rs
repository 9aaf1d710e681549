//! Pairwise netting of a balance table into debts.
//!
//! For every unordered pair `{x, y}` the opposite balances cancel out and at
//! most one [`Debt`] remains. This does not route debts through third
//! members: `a -> b -> c` stays two debts even if `a` and `c` never met.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    EngineError, Member, MemberId, ResultEngine, Room, balances::BalanceTable, money::checked_sub,
};

/// Netted amount one member owes another.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Debt {
    pub debtor: Member,
    pub lender: Member,
    pub sum: i64,
}

impl Debt {
    /// Whether the member is on either side of the debt.
    pub fn involves(&self, member: MemberId) -> bool {
        self.debtor.id == member || self.lender.id == member
    }
}

/// Cancels opposing balances per pair.
///
/// Debts are sorted by `(debtor, lender)` id. Ids missing from the room fail
/// with [`EngineError::UnknownMember`]; a net amount outside `i64` fails with
/// [`EngineError::AmountOverflow`].
pub fn simplify(balances: &BalanceTable, room: &Room) -> ResultEngine<Vec<Debt>> {
    let pairs: BTreeSet<(MemberId, MemberId)> = balances
        .iter()
        .map(|((a, b), _)| if a < b { (a, b) } else { (b, a) })
        .collect();

    let mut debts = Vec::new();
    for (x, y) in pairs {
        let net = checked_sub(balances.get(x, y), balances.get(y, x), "net debt")?;
        let (debtor, lender, sum) = match net {
            0 => continue,
            n if n > 0 => (x, y, n),
            n => (
                y,
                x,
                n.checked_neg().ok_or(EngineError::AmountOverflow("net debt"))?,
            ),
        };
        debts.push(Debt {
            debtor: room.require_member(debtor)?.clone(),
            lender: room.require_member(lender)?.clone(),
            sum,
        });
    }
    debts.sort_by_key(|d| (d.debtor.id, d.lender.id));

    tracing::debug!("netted room {} into {} debts", room.id, debts.len());
    Ok(debts)
}
