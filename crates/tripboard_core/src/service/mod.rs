//! Use-case services layered over entity repositories.
//!
//! # Responsibility
//! - Host the operations that go beyond uniform CRUD: aggregation,
//!   compound writes and per-day upserts.
//!
//! # Invariants
//! - Services never bypass repository id generation or latency.

pub mod expense_service;
pub mod invite_service;
pub mod itinerary_service;
pub mod trip_service;
