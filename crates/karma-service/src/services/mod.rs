//! Business logic services
//!
//! This module contains the service layer implementations: reaction
//! processing, role reconciliation, inspection/adjustment, membership
//! bonuses, and the coalescing role-sync dispatcher.

pub mod context;
pub mod error;
pub mod inspect;
pub mod member;
pub mod reaction;
pub mod reconcile;
pub mod sync;

// Re-export all services for convenience
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use inspect::{InspectionHandler, InspectionOutcome, ScoreAdjustment};
pub use member::MembershipService;
pub use reaction::{ReactionProcessor, ScoreDelta};
pub use reconcile::RoleReconciler;
pub use sync::RoleSyncDispatcher;
