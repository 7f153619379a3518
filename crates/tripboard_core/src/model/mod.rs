//! Trip-planning domain model.
//!
//! # Responsibility
//! - Define the canonical records for every trip-scoped entity.
//! - Define one patch type per record for field-by-field merge updates.
//!
//! # Invariants
//! - Every record is identified by a string `EntityId`.
//! - Serialized field names are camelCase and match the seed dataset shape.
//! - A `None` patch field leaves the stored value untouched.

pub mod accommodation;
pub mod expense;
pub mod invitation;
pub mod itinerary;
pub mod member;
pub mod place;
pub mod trip;

/// Stable identifier shared by every entity record.
pub type EntityId = String;

/// Overwrites `slot` when the patch carries a value.
pub(crate) fn merge_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::expense::ExpenseCategory;
    use super::itinerary::ActivityCategory;
    use super::member::MemberRole;
    use super::merge_field;

    #[test]
    fn merge_field_keeps_value_on_none() {
        let mut slot = "kept".to_string();
        merge_field(&mut slot, None);
        assert_eq!(slot, "kept");

        merge_field(&mut slot, Some("patched".to_string()));
        assert_eq!(slot, "patched");
    }

    #[test]
    fn merge_field_distinguishes_clear_from_leave() {
        let mut slot = Some("ABC123".to_string());
        merge_field(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("ABC123"));

        merge_field(&mut slot, Some(None));
        assert!(slot.is_none());
    }

    #[test]
    fn form_defaults_match_new_entry_choices() {
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Food);
        assert_eq!(ActivityCategory::default(), ActivityCategory::Attraction);
        assert_eq!(MemberRole::default(), MemberRole::Member);
    }
}
