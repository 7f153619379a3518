//! Itinerary use-case service.
//!
//! # Responsibility
//! - Add and remove activities on a trip day.
//! - Keep at most one itinerary per `(trip_id, day)` on these paths.
//!
//! # Invariants
//! - Days are 1-based; day `n` falls on `trip_start + (n - 1)` days.
//! - Lookup and insert of a missing day happen under one write lock.
//! - Plans are returned with activities ordered by start time.

use crate::latency::OpWeight;
use crate::model::itinerary::{Itinerary, NewActivity};
use crate::model::EntityId;
use crate::repo::{new_entity_id, EntityKind, ItineraryRepository, RepoError, RepoResult};
use chrono::{Days, NaiveDate};
use log::{debug, warn};

pub struct ItineraryService {
    itineraries: ItineraryRepository,
}

impl ItineraryService {
    pub fn new(itineraries: ItineraryRepository) -> Self {
        Self { itineraries }
    }

    /// Day plan for `(trip_id, day)`, if one exists.
    pub async fn day_plan(&self, trip_id: &str, day: u32) -> Option<Itinerary> {
        self.itineraries.latency().wait(OpWeight::Filter).await;
        self.itineraries
            .read()
            .await
            .iter()
            .find(|itinerary| itinerary.trip_id == trip_id && itinerary.day == day)
            .cloned()
            .map(|mut itinerary| {
                itinerary.sort_activities();
                itinerary
            })
    }

    /// All day plans of a trip ordered by day.
    pub async fn trip_plan(&self, trip_id: &str) -> Vec<Itinerary> {
        let mut days = self.itineraries.get_by_trip_id(trip_id).await;
        days.sort_by_key(|itinerary| itinerary.day);
        days.iter_mut().for_each(Itinerary::sort_activities);
        days
    }

    /// Appends `activity` to the day plan, creating the plan when missing.
    ///
    /// # Errors
    /// - `RepoError::InvalidInput` when `day` is zero, its date overflows, or
    ///   the activity has no title or start time.
    pub async fn add_activity(
        &self,
        trip_id: &str,
        day: u32,
        trip_start: NaiveDate,
        activity: NewActivity,
    ) -> RepoResult<Itinerary> {
        let date = day_date(trip_start, day)?;
        ensure_schedulable(&activity)?;
        self.itineraries.latency().wait(OpWeight::Update).await;

        let activity = activity.into_activity(new_entity_id());
        let mut itineraries = self.itineraries.write().await;
        if let Some(existing) = itineraries
            .iter_mut()
            .find(|itinerary| itinerary.trip_id == trip_id && itinerary.day == day)
        {
            existing.activities.push(activity);
            existing.sort_activities();
            debug!(
                "event=activity_add module=service status=ok itinerary_id={} created=false",
                existing.id
            );
            return Ok(existing.clone());
        }

        let mut itinerary = Itinerary::new(trip_id, day, date);
        itinerary.id = new_entity_id();
        itinerary.activities.push(activity);
        itineraries.push(itinerary.clone());
        debug!(
            "event=activity_add module=service status=ok itinerary_id={} created=true",
            itinerary.id
        );
        Ok(itinerary)
    }

    /// Removes one activity from a day plan. Unknown activity ids are a no-op.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the trip has no plan for `day`.
    pub async fn remove_activity(
        &self,
        trip_id: &str,
        day: u32,
        activity_id: &str,
    ) -> RepoResult<Itinerary> {
        self.itineraries.latency().wait(OpWeight::Update).await;

        let mut itineraries = self.itineraries.write().await;
        let Some(itinerary) = itineraries
            .iter_mut()
            .find(|itinerary| itinerary.trip_id == trip_id && itinerary.day == day)
        else {
            warn!(
                "event=activity_remove module=service status=not_found trip_id={} day={}",
                trip_id, day
            );
            return Err(RepoError::not_found(
                EntityKind::Itinerary,
                day_key(trip_id, day),
            ));
        };

        itinerary
            .activities
            .retain(|activity| activity.id != activity_id);
        let mut remaining = itinerary.clone();
        remaining.sort_activities();
        Ok(remaining)
    }
}

fn day_date(trip_start: NaiveDate, day: u32) -> RepoResult<NaiveDate> {
    if day == 0 {
        return Err(RepoError::InvalidInput(
            "itinerary days start at 1".to_string(),
        ));
    }
    trip_start
        .checked_add_days(Days::new(u64::from(day - 1)))
        .ok_or_else(|| RepoError::InvalidInput(format!("day {day} is out of calendar range")))
}

fn ensure_schedulable(activity: &NewActivity) -> RepoResult<()> {
    if activity.title.trim().is_empty() {
        return Err(RepoError::InvalidInput(
            "activity title cannot be empty".to_string(),
        ));
    }
    if activity.start_time.trim().is_empty() {
        return Err(RepoError::InvalidInput(
            "activity start time cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn day_key(trip_id: &str, day: u32) -> EntityId {
    format!("{trip_id}/day-{day}")
}

#[cfg(test)]
mod tests {
    use super::{day_date, ensure_schedulable};
    use crate::model::itinerary::NewActivity;
    use chrono::NaiveDate;

    #[test]
    fn day_one_is_trip_start() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(day_date(start, 1).unwrap(), start);
        assert_eq!(
            day_date(start, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn day_zero_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert!(day_date(start, 0).is_err());
    }

    #[test]
    fn activity_needs_title_and_start_time() {
        let mut activity = NewActivity {
            title: "Sushi".to_string(),
            start_time: "12:30".to_string(),
            ..NewActivity::default()
        };
        assert!(ensure_schedulable(&activity).is_ok());

        activity.start_time = " ".to_string();
        assert!(ensure_schedulable(&activity).is_err());

        activity.start_time = "12:30".to_string();
        activity.title.clear();
        assert!(ensure_schedulable(&activity).is_err());
    }
}
