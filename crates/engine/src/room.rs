//! Room snapshot types.
//!
//! A [`Room`] is owned by the persistence layer; the engine only ever reads a
//! point-in-time copy of it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, operation::Operation};

/// Chat platform user id of a room member.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(pub i64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub handle: Option<String>,
}

/// Completion flags set by members through the chat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomStates {
    pub archived: Vec<MemberId>,
    pub paid_off_debt: Vec<MemberId>,
    pub finished_add_operation: Vec<MemberId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub states: RoomStates,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Looks up a member by id.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Like [`Room::member`], failing with [`EngineError::UnknownMember`].
    pub fn require_member(&self, id: MemberId) -> ResultEngine<&Member> {
        self.member(id).ok_or(EngineError::UnknownMember(id))
    }

    pub fn is_member(&self, id: MemberId) -> bool {
        self.member(id).is_some()
    }

    /// Whether the member has hidden the room from their room list.
    pub fn is_archived_for(&self, id: MemberId) -> bool {
        self.states.archived.contains(&id)
    }
}
