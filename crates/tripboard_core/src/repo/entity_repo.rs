//! Generic in-memory repository with simulated latency.
//!
//! # Responsibility
//! - Provide `get_all/get_by_id/get_by_trip_id/create/update/delete` for any
//!   [`Entity`].
//! - Keep lock scopes short: latency first, then one locked critical section.
//!
//! # Invariants
//! - Insertion order is preserved by every read.
//! - `create` always assigns a fresh id, ignoring the incoming one.
//! - No lock guard is held across an await on the latency timer.
//! - Returned records are clones; callers can never alias stored state.

use crate::latency::{Latency, OpWeight};
use crate::model::EntityId;
use crate::repo::{new_entity_id, Entity, RepoError, RepoResult, TripScoped};
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle over one shared entity collection.
///
/// Clones share the same collection; build a new repository (or a new
/// `TripStore`) for an isolated one.
pub struct EntityRepository<T> {
    records: Arc<RwLock<Vec<T>>>,
    latency: Latency,
}

impl<T> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            latency: self.latency,
        }
    }
}

impl<T: Entity> EntityRepository<T> {
    /// Creates an empty repository.
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    /// Creates a repository seeded with `records` in the given order.
    pub fn with_records(records: Vec<T>, latency: Latency) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency,
        }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Current collection size. Diagnostic read, no simulated latency.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns a copy of the whole collection. Never fails.
    pub async fn get_all(&self) -> Vec<T> {
        self.latency.wait(OpWeight::List).await;
        self.records.read().await.clone()
    }

    /// Returns a copy of the matching record, or `None` when absent.
    pub async fn get_by_id(&self, id: &str) -> Option<T> {
        self.latency.wait(OpWeight::Lookup).await;
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Stores `record` under a freshly generated id and returns the stored copy.
    pub async fn create(&self, mut record: T) -> T {
        self.latency.wait(OpWeight::Create).await;
        record.assign_id(new_entity_id());
        record.stamp_created(Utc::now());

        let created = record.clone();
        self.records.write().await.push(record);
        debug!(
            "event=entity_create module=repo entity={} status=ok id={}",
            T::KIND,
            created.id()
        );
        created
    }

    /// Merges `patch` onto the stored record and returns the merged copy.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    pub async fn update(&self, id: &str, patch: T::Patch) -> RepoResult<T> {
        self.mutate(OpWeight::Update, id, move |record| {
            record.apply_patch(patch);
            record.stamp_updated(Utc::now());
            Ok(())
        })
        .await
        .map(|(record, ())| record)
    }

    /// Removes the record and returns it.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    pub async fn delete(&self, id: &str) -> RepoResult<T> {
        self.latency.wait(OpWeight::Delete).await;
        let mut records = self.records.write().await;
        let Some(index) = position_of(&records, id) else {
            return Err(not_found::<T>("delete", id));
        };

        let removed = records.remove(index);
        debug!(
            "event=entity_delete module=repo entity={} status=ok id={}",
            T::KIND,
            id
        );
        Ok(removed)
    }

    /// Applies `change` to the stored record in one critical section.
    ///
    /// Returns the post-change copy along with the closure's own output. A
    /// closure error is returned as-is; it must reject before touching the
    /// record.
    pub(crate) async fn mutate<F, R>(&self, weight: OpWeight, id: &str, change: F) -> RepoResult<(T, R)>
    where
        F: FnOnce(&mut T) -> RepoResult<R>,
    {
        self.latency.wait(weight).await;
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            return Err(not_found::<T>("update", id));
        };

        match change(record) {
            Ok(output) => {
                debug!(
                    "event=entity_update module=repo entity={} status=ok id={}",
                    T::KIND,
                    id
                );
                Ok((record.clone(), output))
            }
            Err(err) => {
                warn!(
                    "event=entity_update module=repo entity={} status=rejected id={}",
                    T::KIND,
                    id
                );
                Err(err)
            }
        }
    }

    /// Direct write access for compound operations spanning collections.
    ///
    /// Callers are responsible for awaiting latency before taking the guard.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().await
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.records.read().await
    }
}

impl<T: TripScoped> EntityRepository<T> {
    /// Returns copies of every record belonging to `trip_id`, in insertion order.
    pub async fn get_by_trip_id(&self, trip_id: &str) -> Vec<T> {
        self.latency.wait(OpWeight::Filter).await;
        self.records
            .read()
            .await
            .iter()
            .filter(|record| record.trip_id() == trip_id)
            .cloned()
            .collect()
    }
}

pub(crate) fn position_of<T: Entity>(records: &[T], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

pub(crate) fn not_found<T: Entity>(operation: &str, id: &str) -> RepoError {
    warn!(
        "event=entity_{} module=repo entity={} status=not_found id={}",
        operation,
        T::KIND,
        id
    );
    RepoError::not_found(T::KIND, EntityId::from(id))
}

#[cfg(test)]
mod tests {
    use super::EntityRepository;
    use crate::latency::{Latency, OpWeight};
    use crate::model::place::Place;
    use crate::repo::RepoError;

    fn place(id: &str) -> Place {
        Place {
            id: id.to_string(),
            trip_id: "t1".to_string(),
            name: "Senso-ji".to_string(),
            category: "Temple".to_string(),
            rating: 4.5,
            description: String::new(),
            image_url: String::new(),
            must_see: false,
        }
    }

    #[tokio::test]
    async fn mutate_returns_closure_output_with_changed_copy() {
        let repo = EntityRepository::with_records(vec![place("p1")], Latency::none());

        let (changed, previous) = repo
            .mutate(OpWeight::Update, "p1", |record| {
                let previous = record.must_see;
                record.must_see = true;
                Ok(previous)
            })
            .await
            .unwrap();

        assert!(!previous);
        assert!(changed.must_see);
        assert!(repo.get_by_id("p1").await.unwrap().must_see);
    }

    #[tokio::test]
    async fn mutate_passes_closure_rejection_through() {
        let repo = EntityRepository::with_records(vec![place("p1")], Latency::none());

        let err = repo
            .mutate(OpWeight::Update, "p1", |_record: &mut Place| -> Result<(), RepoError> {
                Err(RepoError::InvalidInput("rejected".to_string()))
            })
            .await
            .unwrap_err();

        assert_eq!(err, RepoError::InvalidInput("rejected".to_string()));
        assert_eq!(repo.get_by_id("p1").await.unwrap(), place("p1"));
    }

    #[tokio::test]
    async fn mutate_missing_id_is_not_found() {
        let repo: EntityRepository<Place> = EntityRepository::new(Latency::none());
        let err = repo
            .mutate(OpWeight::Update, "ghost", |_record| Ok(()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
