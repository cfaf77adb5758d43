//! # karma-service
//!
//! Application layer for the reputation engine: consumes reaction events and
//! command invocations from the gateway collaborator, mutates the score
//! store with race-safe bookkeeping, and keeps score-gated roles in sync.

pub mod engine;
pub mod services;

pub use engine::KarmaEngine;
pub use services::{
    InspectionHandler, InspectionOutcome, MembershipService, ReactionProcessor, RoleReconciler,
    RoleSyncDispatcher, ScoreAdjustment, ScoreDelta, ServiceContext, ServiceError, ServiceResult,
};
