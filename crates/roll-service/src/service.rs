//! Attendance session and query service.

use std::time::Duration;

use tokio::time::timeout;

use roll_core::entities::{EligibilityBatch, LectureSessionDetail};
use roll_core::snapshot::AttendanceSnapshot;
use roll_core::submission::AttendanceSessionSubmission;
use roll_db::AttendanceStore;
use roll_db::error::DatabaseError;
use roll_eligibility::EligibilityPropagator;

use crate::error::{PropagationFailure, ServiceError};
use crate::reconcile::{ReconcileFailure, ReconcileReport};

/// Records lecture sessions and keeps eligibility state in step with them.
///
/// Holds no mutable state of its own; share it across tasks behind an `Arc`.
pub struct AttendanceService<P> {
    store: AttendanceStore,
    propagator: P,
    propagation_timeout: Duration,
}

impl<P: EligibilityPropagator> AttendanceService<P> {
    #[must_use]
    pub const fn new(store: AttendanceStore, propagator: P, propagation_timeout: Duration) -> Self {
        Self {
            store,
            propagator,
            propagation_timeout,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &AttendanceStore {
        &self.store
    }

    #[must_use]
    pub const fn propagator(&self) -> &P {
        &self.propagator
    }

    /// Validate, persist, and propagate one lecture session.
    ///
    /// Returns the committed session with its records.
    ///
    /// # Errors
    ///
    /// - `Validation` if the payload is malformed; no I/O happened.
    /// - `DuplicateSession` if the id is already recorded; nothing changed.
    /// - `Persistence` if the store failed; nothing was committed and the
    ///   propagator was not called.
    /// - `Propagation` if the session was committed but eligibility state
    ///   was not updated. Use [`Self::retry_propagation`], not a resubmit.
    pub async fn submit_session(
        &self,
        submission: &AttendanceSessionSubmission,
    ) -> Result<LectureSessionDetail, ServiceError> {
        submission.validate()?;

        let detail = self.store.write_session_atomic(submission).await?;

        self.propagate(&EligibilityBatch::from(&detail)).await?;
        Ok(detail)
    }

    /// Decode a JSON payload and submit it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit_session`]; undecodable JSON is `Validation`.
    pub async fn submit_json(&self, payload: &str) -> Result<LectureSessionDetail, ServiceError> {
        let submission = AttendanceSessionSubmission::from_json(payload)?;
        self.submit_session(&submission).await
    }

    /// Re-apply a committed session's facts to the propagator.
    ///
    /// Safe to call any number of times; the propagator keys facts by
    /// session id.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown ids, `Persistence` if the
    /// session cannot be read, or `Propagation` if applying fails again.
    pub async fn retry_propagation(&self, session_id: i64) -> Result<(), ServiceError> {
        let detail = self.get_lecture_session(session_id).await?;
        tracing::debug!(session_id, "retrying eligibility propagation");
        self.propagate(&EligibilityBatch::from(&detail)).await
    }

    /// Retry up to `limit` pending propagations, oldest attempt first.
    ///
    /// Individual failures are collected in the report and never stop the
    /// sweep.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` only if the pending list cannot be read.
    pub async fn reconcile_pending(&self, limit: u32) -> Result<ReconcileReport, ServiceError> {
        let pending = self.store.list_pending_propagations(limit).await?;
        let mut report = ReconcileReport::default();

        for state in pending {
            match self.retry_propagation(state.session_id).await {
                Ok(()) => report.applied.push(state.session_id),
                Err(error) => report.failed.push(ReconcileFailure {
                    session_id: state.session_id,
                    error: error.to_string(),
                }),
            }
        }

        tracing::info!(
            applied = report.applied.len(),
            failed = report.failed.len(),
            "reconciliation sweep finished"
        );
        Ok(report)
    }

    /// Active lecturer and roster of a course, for edge devices.
    ///
    /// An unknown course or empty roster yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the store read fails.
    pub async fn get_attendance_snapshot(
        &self,
        course_code: &str,
    ) -> Result<AttendanceSnapshot, ServiceError> {
        Ok(self.store.read_attendance_snapshot(course_code).await?)
    }

    /// A committed session with its attendance records.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown ids or `Persistence` if the
    /// read fails.
    pub async fn get_lecture_session(
        &self,
        session_id: i64,
    ) -> Result<LectureSessionDetail, ServiceError> {
        match self.store.get_lecture_session_detail(session_id).await {
            Ok(detail) => Ok(detail),
            Err(DatabaseError::NoResult) => Err(ServiceError::SessionNotFound { session_id }),
            Err(other) => Err(other.into()),
        }
    }

    async fn propagate(&self, batch: &EligibilityBatch) -> Result<(), ServiceError> {
        let session_id = batch.session_id;
        let cause = match timeout(self.propagation_timeout, self.propagator.apply(batch)).await {
            Ok(Ok(())) => {
                if let Err(error) = self.store.mark_propagation_applied(session_id).await {
                    tracing::warn!(session_id, %error, "propagation applied but outbox not updated");
                }
                tracing::info!(
                    session_id,
                    course_code = %batch.course_code,
                    facts = batch.facts.len(),
                    "eligibility propagated"
                );
                return Ok(());
            }
            Ok(Err(error)) => PropagationFailure::Rejected(error),
            Err(_) => PropagationFailure::TimedOut {
                after: self.propagation_timeout,
            },
        };

        tracing::error!(
            session_id,
            course_code = %batch.course_code,
            error = %cause,
            "eligibility propagation failed; session stays recorded"
        );
        if let Err(error) = self
            .store
            .record_propagation_failure(session_id, &cause.to_string())
            .await
        {
            tracing::warn!(session_id, %error, "propagation failure not recorded in outbox");
        }

        Err(ServiceError::Propagation { session_id, cause })
    }
}
