//! The propagation contract between the attendance service and eligibility state.

use std::future::Future;
use std::sync::Arc;

use roll_core::entities::EligibilityBatch;

use crate::error::EligibilityError;

/// Consumes the attended/absent facts of one committed lecture session.
///
/// Implementations must be idempotent per `batch.session_id`: applying the
/// same batch again leaves eligibility state unchanged. The attendance
/// service relies on this to retry after failures and timeouts.
pub trait EligibilityPropagator: Send + Sync {
    /// Apply one session's facts.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError` if the facts could not be applied. The
    /// caller keeps the session and may retry later.
    fn apply(
        &self,
        batch: &EligibilityBatch,
    ) -> impl Future<Output = Result<(), EligibilityError>> + Send;
}

impl<P: EligibilityPropagator> EligibilityPropagator for Arc<P> {
    fn apply(
        &self,
        batch: &EligibilityBatch,
    ) -> impl Future<Output = Result<(), EligibilityError>> + Send {
        (**self).apply(batch)
    }
}
