//! Shared expense record with per-member splits.
//!
//! # Invariants
//! - Split amounts are computed once at creation and never recomputed when
//!   `amount` is edited; they need not sum to `amount`.
//! - `updated_at` is bumped on every update and payment-status change.

use crate::model::{merge_field, EntityId};
use crate::repo::{Entity, EntityKind, TripScoped};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Accommodation,
    #[default]
    Food,
    Transportation,
    Activities,
    Other,
}

/// Member who fronted the money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    pub member_id: EntityId,
    pub name: String,
}

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub member_id: EntityId,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: EntityId,
    pub trip_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub paid_by: Payer,
    #[serde(default)]
    pub splits: Vec<Split>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Sum of split amounts not yet marked paid.
    pub fn outstanding(&self) -> f64 {
        self.splits
            .iter()
            .filter(|split| !split.paid)
            .map(|split| split.amount)
            .sum()
    }
}

/// Expense form input before splitting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub trip_id: EntityId,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub trip_id: Option<EntityId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<NaiveDate>,
    pub paid_by: Option<Payer>,
    pub splits: Option<Vec<Split>>,
}

impl Entity for Expense {
    type Patch = ExpensePatch;
    const KIND: EntityKind = EntityKind::Expense;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn apply_patch(&mut self, patch: ExpensePatch) {
        merge_field(&mut self.trip_id, patch.trip_id);
        merge_field(&mut self.title, patch.title);
        merge_field(&mut self.description, patch.description);
        merge_field(&mut self.amount, patch.amount);
        merge_field(&mut self.currency, patch.currency);
        merge_field(&mut self.category, patch.category);
        merge_field(&mut self.date, patch.date);
        merge_field(&mut self.paid_by, patch.paid_by);
        merge_field(&mut self.splits, patch.splits);
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

impl TripScoped for Expense {
    fn trip_id(&self) -> &str {
        &self.trip_id
    }
}
