//! Place-to-visit record.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub name: String,
    /// Free-form label shown as-is (`Museum`, `Landmark`, ...).
    pub category: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub must_see: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacePatch {
    pub trip_id: Option<EntityId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub must_see: Option<bool>,
}

impl Entity for Place {
    type Patch = PlacePatch;
    const KIND: EntityKind = EntityKind::Place;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: PlacePatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.name, patch.name);
        merge_field(&mut self.category, patch.category);
        merge_field(&mut self.rating, patch.rating);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.image_url, patch.image_url);
        merge_field(&mut self.must_see, patch.must_see);
    }
}

impl TripScoped for Place {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
