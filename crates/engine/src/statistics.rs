//! Read-side figures derived from the balances and the netted debts.

use serde::Serialize;

use crate::{
    Debt, Member, MemberId, ResultEngine, Room, balances::Aggregation, money::checked_add,
};

/// Figures of one member of a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub member: Member,
    /// The member's share of the group spending.
    pub cost_share: i64,
    /// What the member still owes to others.
    pub owed: i64,
    /// What others still owe to the member.
    pub lent: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub members: Vec<MemberSummary>,
    pub total_cost: i64,
    pub total_debt_outstanding: i64,
}

/// `(owed_by_user, owed_to_user)` over the netted debts.
pub fn debt_and_lend(debts: &[Debt], user: MemberId) -> ResultEngine<(i64, i64)> {
    debts.iter().try_fold((0, 0), |(owed, lent), debt| {
        if debt.debtor.id == user {
            Ok((checked_add(owed, debt.sum, "owed")?, lent))
        } else if debt.lender.id == user {
            Ok((owed, checked_add(lent, debt.sum, "lent")?))
        } else {
            Ok((owed, lent))
        }
    })
}

pub fn total_outstanding(debts: &[Debt]) -> ResultEngine<i64> {
    debts
        .iter()
        .try_fold(0, |total, debt| checked_add(total, debt.sum, "outstanding debt"))
}

pub(crate) fn summarize(
    room: &Room,
    aggregation: &Aggregation,
    debts: &[Debt],
) -> ResultEngine<RoomSummary> {
    let members = room
        .members
        .iter()
        .map(|member| {
            let (owed, lent) = debt_and_lend(debts, member.id)?;
            Ok(MemberSummary {
                member: member.clone(),
                cost_share: aggregation.cost_share(member.id),
                owed,
                lent,
            })
        })
        .collect::<ResultEngine<Vec<_>>>()?;

    Ok(RoomSummary {
        members,
        total_cost: aggregation.total_cost,
        total_debt_outstanding: total_outstanding(debts)?,
    })
}

/// Validates that a queried user belongs to the room.
pub(crate) fn ensure_member(room: &Room, user: MemberId) -> ResultEngine<()> {
    room.require_member(user).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    fn member(id: i64) -> Member {
        Member {
            id: MemberId(id),
            name: format!("m{id}"),
            handle: None,
        }
    }

    fn debt(debtor: i64, lender: i64, sum: i64) -> Debt {
        Debt {
            debtor: member(debtor),
            lender: member(lender),
            sum,
        }
    }

    #[test]
    fn debt_and_lend_splits_by_side() {
        let debts = vec![debt(1, 2, 10), debt(3, 1, 4), debt(3, 2, 7), debt(1, 4, 1)];

        assert_eq!(debt_and_lend(&debts, MemberId(1)), Ok((11, 4)));
        assert_eq!(debt_and_lend(&debts, MemberId(2)), Ok((0, 17)));
        assert_eq!(debt_and_lend(&debts, MemberId(5)), Ok((0, 0)));
        assert_eq!(total_outstanding(&debts), Ok(22));
    }

    #[test]
    fn no_debts_means_nothing_outstanding() {
        assert_eq!(total_outstanding(&[]), Ok(0));
        assert_eq!(debt_and_lend(&[], MemberId(1)), Ok((0, 0)));
    }

    #[test]
    fn totals_across_debts_report_overflow() {
        // Each debt fits in i64, their sum does not.
        let debts = vec![debt(1, 2, i64::MAX), debt(3, 2, 1)];

        assert_eq!(
            total_outstanding(&debts),
            Err(EngineError::AmountOverflow("outstanding debt"))
        );
        assert_eq!(
            debt_and_lend(&debts, MemberId(2)),
            Err(EngineError::AmountOverflow("lent"))
        );
        assert_eq!(debt_and_lend(&debts, MemberId(1)), Ok((i64::MAX, 0)));
    }
}
