//! Trip overview service.
//!
//! Aggregates the counters shown on a trip's overview card. Per-collection
//! reads run concurrently, so the call costs one filter latency, not six.

use crate::model::trip::Trip;
use crate::repo::{
    AccommodationRepository, ExpenseRepository, ItineraryRepository, MemberRepository,
    PlaceRepository, TripRepository,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub trip: Trip,
    pub duration_days: u32,
    pub planned_days: usize,
    pub activity_count: usize,
    pub member_count: usize,
    pub accommodation_count: usize,
    pub place_count: usize,
    pub must_see_count: usize,
    pub expense_total: f64,
}

pub struct TripService {
    trips: TripRepository,
    itineraries: ItineraryRepository,
    accommodations: AccommodationRepository,
    places: PlaceRepository,
    members: MemberRepository,
    expenses: ExpenseRepository,
}

impl TripService {
    pub fn new(
        trips: TripRepository,
        itineraries: ItineraryRepository,
        accommodations: AccommodationRepository,
        places: PlaceRepository,
        members: MemberRepository,
        expenses: ExpenseRepository,
    ) -> Self {
        Self {
            trips,
            itineraries,
            accommodations,
            places,
            members,
            expenses,
        }
    }

    /// Overview for `trip_id`, or `None` when the trip does not exist.
    pub async fn overview(&self, trip_id: &str) -> Option<TripOverview> {
        let (trip, itineraries, accommodations, places, members, expenses) = tokio::join!(
            self.trips.get_by_id(trip_id),
            self.itineraries.get_by_trip_id(trip_id),
            self.accommodations.get_by_trip_id(trip_id),
            self.places.get_by_trip_id(trip_id),
            self.members.get_by_trip_id(trip_id),
            self.expenses.get_by_trip_id(trip_id),
        );
        let trip = trip?;

        Some(TripOverview {
            duration_days: trip.duration_days(),
            planned_days: itineraries.len(),
            activity_count: itineraries
                .iter()
                .map(|itinerary| itinerary.activities.len())
                .sum(),
            member_count: members.len(),
            accommodation_count: accommodations.len(),
            place_count: places.len(),
            must_see_count: places.iter().filter(|place| place.must_see).count(),
            expense_total: expenses.iter().map(|expense| expense.amount).sum(),
            trip,
        })
    }
}
