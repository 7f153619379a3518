//! Data-access core for the group trip planner.
//! Entity collections live in memory and every access simulates latency.

pub mod config;
pub mod latency;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{ConfigError, SeedSource, StoreConfig};
pub use latency::{Latency, OpWeight};
pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::accommodation::{Accommodation, AccommodationPatch};
pub use model::expense::{Expense, ExpenseCategory, ExpensePatch, NewExpense, Payer, Split};
pub use model::invitation::{Invitation, InvitationPatch, InvitationStatus, NewInvitation};
pub use model::itinerary::{Activity, ActivityCategory, Itinerary, ItineraryPatch, NewActivity};
pub use model::member::{Member, MemberPatch, MemberRole, MemberStatus, NewMember};
pub use model::place::{Place, PlacePatch};
pub use model::trip::{Trip, TripPatch};
pub use model::EntityId;
pub use repo::{Entity, EntityKind, EntityRepository, RepoError, RepoResult, TripScoped};
pub use seed::SeedData;
pub use service::expense_service::{ExpenseService, MemberBalance, TripExpenseSummary};
pub use service::invite_service::{AcceptedInvite, InviteService, DEFAULT_INVITE_MESSAGE};
pub use service::itinerary_service::ItineraryService;
pub use service::trip_service::{TripOverview, TripService};
pub use store::TripStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
