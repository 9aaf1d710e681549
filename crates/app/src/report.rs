//! Plain text rendering of engine results.

use engine::{DebtReport, Member, MemberSummary, Money, PartyPhase, RoomSummary};

fn amount(minor: i64, currency: &str) -> String {
    format!("{}{currency}", Money::new(minor))
}

fn who(member: &Member) -> String {
    match &member.handle {
        Some(handle) => format!("{} ({handle})", member.name),
        None => member.name.clone(),
    }
}

pub fn debts(report: &DebtReport, currency: &str) -> String {
    let mut out = String::new();
    if report.debts.is_empty() {
        out.push_str("No debts.\n");
    }
    for debt in &report.debts {
        out.push_str(&format!(
            "{} owes {} {}\n",
            who(&debt.debtor),
            who(&debt.lender),
            amount(debt.sum, currency)
        ));
    }
    if !report.rejected.is_empty() {
        out.push_str("\nIgnored operations:\n");
        for rejected in &report.rejected {
            out.push_str(&format!("  {rejected}\n"));
        }
    }
    out
}

pub fn member(summary: &MemberSummary, currency: &str) -> String {
    format!(
        "{}: share {}, owes {}, is owed {}\n",
        who(&summary.member),
        amount(summary.cost_share, currency),
        amount(summary.owed, currency),
        amount(summary.lent, currency)
    )
}

pub fn summary(summary: &RoomSummary, currency: &str) -> String {
    let mut out = format!(
        "Total spent: {}\nOutstanding: {}\n\n",
        amount(summary.total_cost, currency),
        amount(summary.total_debt_outstanding, currency)
    );
    for line in &summary.members {
        out.push_str(&member(line, currency));
    }
    out
}

pub fn phase(phase: PartyPhase, pending: &[&Member]) -> String {
    let title = match phase {
        PartyPhase::AddingOperations => "Adding operations",
        PartyPhase::DistributingDebts => "Distributing debts",
        PartyPhase::Finished => "Finished",
    };
    if pending.is_empty() {
        return format!("{title}\n");
    }
    let names: Vec<String> = pending.iter().map(|m| who(m)).collect();
    format!("{title}, waiting for: {}\n", names.join(", "))
}

#[cfg(test)]
mod tests {
    use engine::{Debt, InvalidOperationError, InvalidOperationReason, MemberId};
    use uuid::Uuid;

    use super::*;

    fn member(id: i64, name: &str, handle: Option<&str>) -> Member {
        Member {
            id: MemberId(id),
            name: name.to_string(),
            handle: handle.map(ToString::to_string),
        }
    }

    #[test]
    fn debts_lists_each_pair_and_rejections() {
        let operation_id = Uuid::nil();
        let report = DebtReport {
            debts: vec![Debt {
                debtor: member(1, "Ann", Some("@ann")),
                lender: member(2, "Bob", None),
                sum: 1250,
            }],
            rejected: vec![InvalidOperationError {
                operation_id,
                reason: InvalidOperationReason::NoRecipients,
            }],
        };

        assert_eq!(
            debts(&report, "€"),
            format!(
                "Ann (@ann) owes Bob 12.50€\n\nIgnored operations:\n  \
                 invalid operation {operation_id}: expense has no recipients\n"
            )
        );
    }

    #[test]
    fn empty_debts_say_so() {
        assert_eq!(debts(&DebtReport::default(), "€"), "No debts.\n");
    }

    #[test]
    fn phase_names_pending_members() {
        let ann = member(1, "Ann", None);
        let bob = member(2, "Bob", Some("@bob"));
        assert_eq!(
            phase(PartyPhase::DistributingDebts, &[&ann, &bob]),
            "Distributing debts, waiting for: Ann, Bob (@bob)\n"
        );
        assert_eq!(phase(PartyPhase::Finished, &[]), "Finished\n");
    }

    #[test]
    fn summary_prints_totals_first() {
        let summary = RoomSummary {
            members: vec![MemberSummary {
                member: member(1, "Ann", None),
                cost_share: 300,
                owed: 0,
                lent: 150,
            }],
            total_cost: 450,
            total_debt_outstanding: 150,
        };
        assert_eq!(
            super::summary(&summary, " EUR"),
            "Total spent: 4.50 EUR\nOutstanding: 1.50 EUR\n\nAnn: share 3.00 EUR, owes 0.00 EUR, is owed 1.50 EUR\n"
        );
    }
}
