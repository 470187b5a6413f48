pub mod course;
pub mod dispatch;
pub mod eligibility;
pub mod reconcile;
pub mod retry;
pub mod schema;
pub mod session;
pub mod shared;
pub mod snapshot;
pub mod submit;
pub mod user;
