//! Expense use-case service.
//!
//! # Responsibility
//! - Aggregate trip spending on demand.
//! - Flip per-member payment flags inside one expense.
//! - Create expenses with an equal split across participants.
//!
//! # Invariants
//! - Summaries are recomputed on every call; nothing is cached.
//! - Payment updates touch exactly one split.

use crate::latency::OpWeight;
use crate::model::expense::{Expense, ExpenseCategory, NewExpense, Payer, Split};
use crate::model::member::Member;
use crate::model::EntityId;
use crate::repo::{Entity, ExpenseRepository, RepoError, RepoResult};
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-side spending aggregate for one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripExpenseSummary {
    pub total_amount: f64,
    pub total_expenses: usize,
    pub category_summary: BTreeMap<ExpenseCategory, f64>,
    /// Expenses that fed the aggregate, in insertion order.
    pub expenses: Vec<Expense>,
}

/// Unpaid share a member still owes across a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    pub member_id: EntityId,
    pub name: String,
    pub outstanding: f64,
}

pub struct ExpenseService {
    expenses: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(expenses: ExpenseRepository) -> Self {
        Self { expenses }
    }

    /// Totals, count and per-category totals for `trip_id`.
    pub async fn get_trip_summary(&self, trip_id: &str) -> TripExpenseSummary {
        let expenses = self.expenses.get_by_trip_id(trip_id).await;

        let mut category_summary = BTreeMap::new();
        for expense in &expenses {
            *category_summary.entry(expense.category).or_insert(0.0) += expense.amount;
        }

        TripExpenseSummary {
            total_amount: expenses.iter().map(|expense| expense.amount).sum(),
            total_expenses: expenses.len(),
            category_summary,
            expenses,
        }
    }

    /// Sets the `paid` flag on `member_id`'s split of `expense_id`.
    ///
    /// An expense without a split for `member_id` is returned unchanged.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the expense does not exist.
    pub async fn update_payment_status(
        &self,
        expense_id: &str,
        member_id: &str,
        paid: bool,
    ) -> RepoResult<Expense> {
        let (expense, changed) = self
            .expenses
            .mutate(OpWeight::Update, expense_id, |expense| {
                let Some(split) = expense
                    .splits
                    .iter_mut()
                    .find(|split| split.member_id == member_id)
                else {
                    return Ok(false);
                };
                split.paid = paid;
                expense.stamp_updated(Utc::now());
                Ok(true)
            })
            .await?;

        if !changed {
            debug!(
                "event=payment_status module=service status=skipped reason=no_split expense_id={} member_id={}",
                expense_id, member_id
            );
        }
        Ok(expense)
    }

    /// Creates an expense split equally between `participants`.
    ///
    /// The payer's own split starts paid; every other split starts unpaid.
    ///
    /// # Errors
    /// - `RepoError::InvalidInput` when `participants` is empty or the amount
    ///   is negative or not finite.
    pub async fn create_equal_split(
        &self,
        input: NewExpense,
        payer: &Member,
        participants: &[Member],
    ) -> RepoResult<Expense> {
        if participants.is_empty() {
            return Err(RepoError::InvalidInput(
                "expense needs at least one participant".to_string(),
            ));
        }
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(RepoError::InvalidInput(format!(
                "expense amount must be a non-negative number, got {}",
                input.amount
            )));
        }

        let share = input.amount / participants.len() as f64;
        let splits = participants
            .iter()
            .map(|member| Split {
                member_id: member.id.clone(),
                name: member.name.clone(),
                amount: share,
                paid: member.id == payer.id,
            })
            .collect();

        let expense = Expense {
            id: EntityId::new(),
            trip_id: input.trip_id,
            title: input.title,
            description: input.description,
            amount: input.amount,
            currency: input.currency,
            category: input.category,
            date: input.date,
            paid_by: Payer {
                member_id: payer.id.clone(),
                name: payer.name.clone(),
            },
            splits,
            created_at: None,
            updated_at: None,
        };

        let created = self.expenses.create(expense).await;
        info!(
            "event=expense_split module=service status=ok id={} participants={}",
            created.id,
            participants.len()
        );
        Ok(created)
    }

    /// Unpaid totals per member for `trip_id`, in first-seen order.
    pub async fn outstanding_balances(&self, trip_id: &str) -> Vec<MemberBalance> {
        let expenses = self.expenses.get_by_trip_id(trip_id).await;

        let mut balances: Vec<MemberBalance> = Vec::new();
        for split in expenses.iter().flat_map(|expense| expense.splits.iter()) {
            let owed = if split.paid { 0.0 } else { split.amount };
            match balances
                .iter_mut()
                .find(|balance| balance.member_id == split.member_id)
            {
                Some(balance) => balance.outstanding += owed,
                None => balances.push(MemberBalance {
                    member_id: split.member_id.clone(),
                    name: split.name.clone(),
                    outstanding: owed,
                }),
            }
        }
        balances
    }
}
