//! Trip invitation record.
//!
//! # Invariants
//! - `status` moves from `pending` to `accepted` or `declined`; the matching
//!   `accepted_at` / `declined_at` stamp is set by `InviteService`.

use crate::model::member::MemberRole;
use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub invitee_name: String,
    pub invitee_email: String,
    #[serde(default)]
    pub role: MemberRole,
    #[serde(default)]
    pub message: String,
    pub status: InvitationStatus,
    pub sent_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declined_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

/// Invitation input as collected by the invite form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInvitation {
    pub trip_id: EntityId,
    /// Derived from the email local part when blank.
    pub invitee_name: String,
    pub invitee_email: String,
    pub role: MemberRole,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvitationPatch {
    pub trip_id: Option<EntityId>,
    pub invitee_name: Option<String>,
    pub invitee_email: Option<String>,
    pub role: Option<MemberRole>,
    pub message: Option<String>,
    pub status: Option<InvitationStatus>,
    pub sent_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<Option<DateTime<Utc>>>,
    pub declined_at: Option<Option<DateTime<Utc>>>,
}

impl Entity for Invitation {
    type Patch = InvitationPatch;
    const KIND: EntityKind = EntityKind::Invitation;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: InvitationPatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.invitee_name, patch.invitee_name);
        merge_field(&mut self.invitee_email, patch.invitee_email);
        merge_field(&mut self.role, patch.role);
        merge_field(&mut self.message, patch.message);
        merge_field(&mut self.status, patch.status);
        merge_field(&mut self.sent_at, patch.sent_at);
        merge_field(&mut self.accepted_at, patch.accepted_at);
        merge_field(&mut self.declined_at, patch.declined_at);
    }
}

impl TripScoped for Invitation {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
