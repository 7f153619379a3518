//! Trip record.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Top-level trip that every other entity hangs off via `trip_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: EntityId,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    /// Set by the repository on create; seed records may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Builds an unsaved trip; the repository assigns `id` on create.
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            destination: destination.into(),
            start_date,
            end_date,
            description: String::new(),
            cover_image: String::new(),
            created_at: None,
        }
    }

    /// Inclusive trip length in days. Inverted ranges count as zero.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(0)).unwrap_or(0)
    }
}

/// Field-by-field update for [`Trip`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    pub name: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
}

impl Entity for Trip {
    type Patch = TripPatch;
    const KIND: EntityKind = EntityKind::Trip;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: TripPatch) {
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.destination, patch.destination);
        merge_field(&mut self.start_date, patch.start_date);
        merge_field(&mut self.end_date, patch.end_date);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.cover_image, patch.cover_image);
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }
}
