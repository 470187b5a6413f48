//! Entity structs for all Rollcall domain objects.
//!
//! Lecture, attendance, directory, and outbox entities map to tables in the
//! attendance database. Eligibility entities map to the eligibility ledger's
//! own database. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema`.

mod directory;
mod eligibility;
mod lecture;
mod propagation;

pub use directory::{Course, User};
pub use eligibility::{CourseEligibilityFact, EligibilityBatch, LecturerAvailability, StudentEligibility};
pub use lecture::{AttendanceRecord, LectureSession, LectureSessionDetail};
pub use propagation::PropagationState;
