//! Trip member record.
//!
//! # Invariants
//! - Members created through `InviteService` start `active` with `joined_at`
//!   set to creation time.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission tier inside one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Trip owner; cannot be removed from the members view.
    Organizer,
    #[default]
    Member,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub avatar: String,
    pub joined_at: DateTime<Utc>,
    pub status: MemberStatus,
}

/// Member input without server-assigned fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMember {
    pub trip_id: EntityId,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    /// Generated from `name` when empty.
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPatch {
    pub trip_id: Option<EntityId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<MemberRole>,
    pub avatar: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub status: Option<MemberStatus>,
}

impl Entity for Member {
    type Patch = MemberPatch;
    const KIND: EntityKind = EntityKind::Member;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: MemberPatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.email, patch.email);
        merge_field(&mut self.role, patch.role);
        merge_field(&mut self.avatar, patch.avatar);
        merge_field(&mut self.joined_at, patch.joined_at);
        merge_field(&mut self.status, patch.status);
    }
}

impl TripScoped for Member {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
