//! Explicitly owned store holding one repository per entity.
//!
//! # Responsibility
//! - Replace process-global collections with one value callers pass around.
//! - Hand out services wired to the store's repositories.
//!
//! # Invariants
//! - Two stores never share collections; clones of one store always do.

use crate::config::{SeedSource, StoreConfig};
use crate::latency::Latency;
use crate::repo::{
    AccommodationRepository, EntityRepository, ExpenseRepository, InvitationRepository,
    ItineraryRepository, MemberRepository, PlaceRepository, TripRepository,
};
use crate::seed::SeedData;
use crate::service::expense_service::ExpenseService;
use crate::service::invite_service::InviteService;
use crate::service::itinerary_service::ItineraryService;
use crate::service::trip_service::TripService;
use log::info;

#[derive(Clone)]
pub struct TripStore {
    trips: TripRepository,
    itineraries: ItineraryRepository,
    accommodations: AccommodationRepository,
    places: PlaceRepository,
    members: MemberRepository,
    invitations: InvitationRepository,
    expenses: ExpenseRepository,
}

impl TripStore {
    /// Store with empty collections.
    pub fn empty(latency: Latency) -> Self {
        Self::seeded(latency, SeedData::default())
    }

    /// Store whose collections start with `seed`.
    pub fn seeded(latency: Latency, seed: SeedData) -> Self {
        Self {
            trips: EntityRepository::with_records(seed.trips, latency),
            itineraries: EntityRepository::with_records(seed.itineraries, latency),
            accommodations: EntityRepository::with_records(seed.accommodations, latency),
            places: EntityRepository::with_records(seed.places, latency),
            members: EntityRepository::with_records(seed.members, latency),
            invitations: EntityRepository::with_records(seed.invitations, latency),
            expenses: EntityRepository::with_records(seed.expenses, latency),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let seed = match &config.seed {
            SeedSource::Bundled => SeedData::bundled(),
            SeedSource::Dir(dir) => SeedData::from_dir(dir),
            SeedSource::Empty => SeedData::default(),
        };
        info!(
            "event=store_init module=store status=ok records={} simulated_latency={}",
            seed.record_count(),
            !config.latency.is_none()
        );
        Self::seeded(config.latency, seed)
    }

    pub fn trips(&self) -> &TripRepository {
        &self.trips
    }

    pub fn itineraries(&self) -> &ItineraryRepository {
        &self.itineraries
    }

    pub fn accommodations(&self) -> &AccommodationRepository {
        &self.accommodations
    }

    pub fn places(&self) -> &PlaceRepository {
        &self.places
    }

    pub fn members(&self) -> &MemberRepository {
        &self.members
    }

    pub fn invitations(&self) -> &InvitationRepository {
        &self.invitations
    }

    pub fn expenses(&self) -> &ExpenseRepository {
        &self.expenses
    }

    pub fn expense_service(&self) -> ExpenseService {
        ExpenseService::new(self.expenses.clone())
    }

    pub fn invite_service(&self) -> InviteService {
        InviteService::new(self.members.clone(), self.invitations.clone())
    }

    pub fn itinerary_service(&self) -> ItineraryService {
        ItineraryService::new(self.itineraries.clone())
    }

    pub fn trip_service(&self) -> TripService {
        TripService::new(
            self.trips.clone(),
            self.itineraries.clone(),
            self.accommodations.clone(),
            self.places.clone(),
            self.members.clone(),
            self.expenses.clone(),
        )
    }
}
