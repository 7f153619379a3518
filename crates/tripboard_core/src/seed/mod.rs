//! Seed dataset for the in-memory store.
//!
//! # Responsibility
//! - Bundle the static starter dataset into the binary.
//! - Load an alternative dataset from a directory of JSON files.
//!
//! # Invariants
//! - Loading never fails: a missing or malformed collection degrades to an
//!   empty list and emits a warning.
//! - Record order in the source file is the collection insertion order.

use crate::model::accommodation::Accommodation;
use crate::model::expense::Expense;
use crate::model::invitation::Invitation;
use crate::model::itinerary::Itinerary;
use crate::model::member::Member;
use crate::model::place::Place;
use crate::model::trip::Trip;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

const TRIPS_FILE: &str = "trips.json";
const ITINERARIES_FILE: &str = "itineraries.json";
const ACCOMMODATIONS_FILE: &str = "accommodations.json";
const PLACES_FILE: &str = "places.json";
const MEMBERS_FILE: &str = "members.json";
const INVITATIONS_FILE: &str = "invitations.json";
const EXPENSES_FILE: &str = "expenses.json";

/// Initial contents for every entity collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub trips: Vec<Trip>,
    pub itineraries: Vec<Itinerary>,
    pub accommodations: Vec<Accommodation>,
    pub places: Vec<Place>,
    pub members: Vec<Member>,
    pub invitations: Vec<Invitation>,
    pub expenses: Vec<Expense>,
}

impl SeedData {
    /// Dataset compiled into the crate.
    pub fn bundled() -> Self {
        Self {
            trips: parse_collection(TRIPS_FILE, include_str!("data/trips.json")),
            itineraries: parse_collection(
                ITINERARIES_FILE,
                include_str!("data/itineraries.json"),
            ),
            accommodations: parse_collection(
                ACCOMMODATIONS_FILE,
                include_str!("data/accommodations.json"),
            ),
            places: parse_collection(PLACES_FILE, include_str!("data/places.json")),
            members: parse_collection(MEMBERS_FILE, include_str!("data/members.json")),
            invitations: parse_collection(
                INVITATIONS_FILE,
                include_str!("data/invitations.json"),
            ),
            expenses: parse_collection(EXPENSES_FILE, include_str!("data/expenses.json")),
        }
    }

    /// Loads each collection from `<dir>/<entity>.json`.
    pub fn from_dir(dir: &Path) -> Self {
        let seed = Self {
            trips: load_file(dir, TRIPS_FILE),
            itineraries: load_file(dir, ITINERARIES_FILE),
            accommodations: load_file(dir, ACCOMMODATIONS_FILE),
            places: load_file(dir, PLACES_FILE),
            members: load_file(dir, MEMBERS_FILE),
            invitations: load_file(dir, INVITATIONS_FILE),
            expenses: load_file(dir, EXPENSES_FILE),
        };
        info!(
            "event=seed_load module=seed status=ok source=dir trips={} expenses={}",
            seed.trips.len(),
            seed.expenses.len()
        );
        seed
    }

    pub fn record_count(&self) -> usize {
        self.trips.len()
            + self.itineraries.len()
            + self.accommodations.len()
            + self.places.len()
            + self.members.len()
            + self.invitations.len()
            + self.expenses.len()
    }
}

fn load_file<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Vec<T> {
    let path = dir.join(file_name);
    match std::fs::read_to_string(&path) {
        Ok(raw) => parse_collection(file_name, &raw),
        Err(err) => {
            warn!(
                "event=seed_load module=seed status=error collection={} reason=io kind={:?}",
                file_name,
                err.kind()
            );
            Vec::new()
        }
    }
}

/// Parses one JSON array, falling back to empty on any error.
pub(crate) fn parse_collection<T: DeserializeOwned>(collection: &str, raw: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(records) => records,
        Err(err) => {
            // Metadata only: serde messages can echo record content.
            warn!(
                "event=seed_load module=seed status=error collection={} reason=parse line={} column={}",
                collection,
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}
