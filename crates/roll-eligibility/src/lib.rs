//! # roll-eligibility
//!
//! Downstream eligibility state for Rollcall.
//!
//! [`EligibilityPropagator`] is the contract the attendance service calls
//! after a session commits. [`EligibilityLedger`] implements it on its own
//! libSQL database: it keeps per-session attendance facts and recomputes
//! each student's attendance percentage and each lecturer's delivered
//! lecture count for the affected course.

pub mod error;
pub mod ledger;
pub mod propagator;

pub use error::EligibilityError;
pub use ledger::{EligibilityLedger, eligibility_percent};
pub use propagator::EligibilityPropagator;
