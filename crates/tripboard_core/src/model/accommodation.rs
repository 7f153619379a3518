//! Accommodation booking record.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub name: String,
    pub address: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Field-by-field update for [`Accommodation`].
///
/// Optional record fields take `Some(None)` to clear and `None` to leave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccommodationPatch {
    pub trip_id: Option<EntityId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub confirmation_number: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl Entity for Accommodation {
    type Patch = AccommodationPatch;
    const KIND: EntityKind = EntityKind::Accommodation;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: AccommodationPatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.address, patch.address);
        merge_field(&mut self.check_in, patch.check_in);
        merge_field(&mut self.check_out, patch.check_out);
        merge_field(&mut self.confirmation_number, patch.confirmation_number);
        merge_field(&mut self.notes, patch.notes);
    }
}

impl TripScoped for Accommodation {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
