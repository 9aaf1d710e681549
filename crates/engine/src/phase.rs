//! Lifecycle phase of a room.
//!
//! The phase is never stored: it is derived on demand from the completion
//! flags in [`RoomStates`](crate::RoomStates). Members move the room forward
//! by marking themselves done; clearing the flags is a collaborator decision.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{Member, MemberId, Room};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyPhase {
    AddingOperations,
    DistributingDebts,
    Finished,
}

impl PartyPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddingOperations => "adding_operations",
            Self::DistributingDebts => "distributing_debts",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for PartyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a room from the sizes of its completion sets.
pub fn classify(
    finished_add_operation: usize,
    member_count: usize,
    paid_off_debt: usize,
) -> PartyPhase {
    if finished_add_operation != member_count {
        PartyPhase::AddingOperations
    } else if paid_off_debt != member_count {
        PartyPhase::DistributingDebts
    } else {
        PartyPhase::Finished
    }
}

/// Derives the current phase of the room.
///
/// Flags are counted once per member; ids not in the room are ignored.
pub fn resolve(room: &Room) -> PartyPhase {
    let phase = classify(
        flagged(room, &room.states.finished_add_operation).len(),
        room.members.len(),
        flagged(room, &room.states.paid_off_debt).len(),
    );
    tracing::debug!("room {} is in phase {phase}", room.id);
    phase
}

/// Members the room is waiting on in its current phase, in member order.
pub fn pending_members(room: &Room) -> Vec<&Member> {
    let done = match resolve(room) {
        PartyPhase::AddingOperations => flagged(room, &room.states.finished_add_operation),
        PartyPhase::DistributingDebts => flagged(room, &room.states.paid_off_debt),
        PartyPhase::Finished => return Vec::new(),
    };
    room.members
        .iter()
        .filter(|m| !done.contains(&m.id))
        .collect()
}

fn flagged(room: &Room, ids: &[MemberId]) -> BTreeSet<MemberId> {
    ids.iter().copied().filter(|id| room.is_member(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_walks_the_three_phases() {
        assert_eq!(classify(0, 3, 0), PartyPhase::AddingOperations);
        assert_eq!(classify(2, 3, 3), PartyPhase::AddingOperations);
        assert_eq!(classify(3, 3, 0), PartyPhase::DistributingDebts);
        assert_eq!(classify(3, 3, 2), PartyPhase::DistributingDebts);
        assert_eq!(classify(3, 3, 3), PartyPhase::Finished);
    }

    #[test]
    fn empty_room_is_finished() {
        assert_eq!(classify(0, 0, 0), PartyPhase::Finished);
    }

    #[test]
    fn phase_names() {
        assert_eq!(PartyPhase::DistributingDebts.to_string(), "distributing_debts");
        assert_eq!(
            serde_json::to_string(&PartyPhase::AddingOperations).unwrap(),
            "\"adding_operations\""
        );
    }
}
