//! # roll-service
//!
//! Orchestration between the attendance store and eligibility state.
//!
//! [`AttendanceService`] validates a submission, commits it atomically, and
//! then hands the session's facts to an
//! [`EligibilityPropagator`](roll_eligibility::EligibilityPropagator). The
//! two steps are not one transaction: a failure after commit
//! surfaces as [`ServiceError::Propagation`] and is repaired through
//! [`AttendanceService::retry_propagation`] or
//! [`AttendanceService::reconcile_pending`], never by resubmitting.

pub mod error;
pub mod reconcile;
pub mod service;

pub use error::{PropagationFailure, ServiceError};
pub use reconcile::{ReconcileFailure, ReconcileReport};
pub use service::AttendanceService;
