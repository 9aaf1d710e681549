use std::{error::Error, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn snapshot() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/weekend.json")
}

fn party_ledger() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("party_ledger")?;
    cmd.env("PARTY_LEDGER__REPORT__CURRENCY", "€").arg(snapshot());
    Ok(cmd)
}

#[test]
fn debts_prints_netted_pairs_and_ignored_operations() -> Result<(), Box<dyn Error>> {
    party_ledger()?
        .arg("debts")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Alice (@alice) owes Carol (@carol) 10.00€")
                .and(predicate::str::contains("Bob owes Erin 10.00€"))
                .and(predicate::str::contains("Dave owes").not())
                .and(predicate::str::contains("sum must be > 0, got 0")),
        );
    Ok(())
}

#[test]
fn debts_for_one_user_as_json() -> Result<(), Box<dyn Error>> {
    let output = party_ledger()?
        .args(["debts", "--user", "2", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let debts = json["debts"].as_array().ok_or("debts missing")?;
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0]["lender"]["name"], "Erin");
    assert_eq!(debts[0]["sum"], 1000);
    Ok(())
}

#[test]
fn stats_prints_totals() -> Result<(), Box<dyn Error>> {
    party_ledger()?
        .arg("stats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total spent: 21.00€")
                .and(predicate::str::contains("Outstanding: 20.00€")),
        );
    Ok(())
}

#[test]
fn stats_for_unknown_user_fails() -> Result<(), Box<dyn Error>> {
    party_ledger()?
        .args(["stats", "--user", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("member 42 is not part of the room"));
    Ok(())
}

#[test]
fn phase_lists_pending_members() -> Result<(), Box<dyn Error>> {
    party_ledger()?
        .arg("phase")
        .assert()
        .success()
        .stdout("Distributing debts, waiting for: Alice (@alice), Bob, Erin\n");
    Ok(())
}
