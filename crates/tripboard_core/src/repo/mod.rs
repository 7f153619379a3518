//! Repository layer: the per-entity async access contract.
//!
//! # Responsibility
//! - Define the `Entity` seam every record type plugs into.
//! - Provide one generic in-memory repository with simulated latency.
//!
//! # Invariants
//! - `NotFound` is the only error an access operation can surface for a
//!   well-formed call.
//! - Every value handed out is an owned copy of stored state.

pub mod entity_repo;

use crate::model::accommodation::Accommodation;
use crate::model::expense::Expense;
use crate::model::invitation::Invitation;
use crate::model::itinerary::Itinerary;
use crate::model::member::Member;
use crate::model::place::Place;
use crate::model::trip::Trip;
use crate::model::EntityId;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use entity_repo::EntityRepository;

pub type TripRepository = EntityRepository<Trip>;
pub type ItineraryRepository = EntityRepository<Itinerary>;
pub type AccommodationRepository = EntityRepository<Accommodation>;
pub type PlaceRepository = EntityRepository<Place>;
pub type MemberRepository = EntityRepository<Member>;
pub type InvitationRepository = EntityRepository<Invitation>;
pub type ExpenseRepository = EntityRepository<Expense>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity collections known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Trip,
    Itinerary,
    Accommodation,
    Place,
    Member,
    Invitation,
    Expense,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Itinerary => "itinerary",
            Self::Accommodation => "accommodation",
            Self::Place => "place",
            Self::Member => "member",
            Self::Invitation => "invitation",
            Self::Expense => "expense",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error surfaced by access and service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Target record of an update/delete-style call does not exist.
    NotFound { entity: EntityKind, id: EntityId },
    /// Caller input cannot describe a valid record.
    InvalidInput(String),
}

impl RepoError {
    pub fn not_found(entity: EntityKind, id: impl Into<EntityId>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Record type stored in an [`EntityRepository`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Field-by-field update applied by `update`.
    type Patch: Send;

    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn assign_id(&mut self, id: EntityId);

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Hook for records carrying a creation timestamp.
    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    /// Hook for records carrying a modification timestamp.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}
}

/// Entity that belongs to exactly one trip.
pub trait TripScoped: Entity {
    fn trip_id(&self) -> &str;
}

/// Generates a fresh record id, unique under rapid successive calls.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{new_entity_id, EntityKind, RepoError};
    use std::collections::HashSet;

    #[test]
    fn ids_do_not_collide_in_tight_loop() {
        let ids = (0..1_000).map(|_| new_entity_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = RepoError::not_found(EntityKind::Accommodation, "42");
        assert_eq!(err.to_string(), "accommodation not found: 42");
        assert!(err.is_not_found());
    }
}
