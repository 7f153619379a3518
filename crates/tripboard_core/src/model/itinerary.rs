//! Day itinerary record and its ordered activities.
//!
//! # Invariants
//! - `day` is 1-based.
//! - One itinerary per `(trip_id, day)` is upheld by `ItineraryService`,
//!   not by the raw repository.
//! - Service paths keep `activities` ordered by `start_time`; ties keep
//!   insertion order.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a planned activity, drives the timeline badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[default]
    Attraction,
    Restaurant,
    Shopping,
    Transport,
    Hotel,
    Activity,
}

/// One timeline entry inside a day itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    pub title: String,
    /// Wall-clock `HH:MM` as entered by the planner.
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ActivityCategory,
}

/// Activity input without an id; the itinerary service assigns one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewActivity {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub category: ActivityCategory,
}

impl NewActivity {
    pub(crate) fn into_activity(self, id: EntityId) -> Activity {
        Activity {
            id,
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            description: self.description,
            category: self.category,
        }
    }
}

/// Plan for a single trip day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub day: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Itinerary {
    /// Builds an unsaved, empty day plan.
    pub fn new(trip_id: impl Into<EntityId>, day: u32, date: NaiveDate) -> Self {
        Self {
            id: EntityId::new(),
            trip_id: trip_id.into(),
            day,
            date,
            activities: Vec::new(),
        }
    }

    /// Orders activities by `HH:MM` start time, stable for equal times.
    pub fn sort_activities(&mut self) {
        self.activities
            .sort_by(|left, right| left.start_time.cmp(&right.start_time));
    }
}

/// Field-by-field update for [`Itinerary`]. `activities` replaces the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryPatch {
    pub trip_id: Option<EntityId>,
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub activities: Option<Vec<Activity>>,
}

impl Entity for Itinerary {
    type Patch = ItineraryPatch;
    const KIND: EntityKind = EntityKind::Itinerary;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: ItineraryPatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.day, patch.day);
        merge_field(&mut self.date, patch.date);
        merge_field(&mut self.activities, patch.activities);
    }
}

impl TripScoped for Itinerary {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
