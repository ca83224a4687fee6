//! Error types for the Converge driver.

use crate::transport::{OperationKind, TransportError};
use std::time::Duration;
use thiserror::Error;

/// Terminal outcomes of a convergence wait.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvergenceError {
    /// The deadline passed while the resource was still in a pending
    /// status. `last_status` is what the final poll observed.
    #[error("still '{last_status}' after {waited:?}")]
    Timeout { last_status: String, waited: Duration },

    /// The resource reported a status outside both the pending and the
    /// target set - typically an operator-visible error state. Reported
    /// immediately rather than polled until the deadline.
    #[error("unexpected status '{0}'")]
    UnexpectedState(String),

    /// The status fetch itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The caller's cancellation signal fired before the wait resolved.
    #[error("wait cancelled by caller")]
    Cancelled,
}

/// Errors that abort one reconciliation cycle.
///
/// Operations already issued when the cycle aborts stay applied
/// remotely; retrying the reconciliation diffs against the new observed
/// state and only acts on the remaining delta.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Malformed desired or observed collection (duplicate keys).
    #[error(transparent)]
    Plan(#[from] converge_engine::Error),

    /// The remote API rejected an add/remove for the named item.
    #[error("{kind} of '{key}' failed: {source}")]
    Operation {
        key: String,
        kind: OperationKind,
        source: TransportError,
    },

    /// An issued operation never converged for the named item.
    #[error("'{key}' did not converge: {source}")]
    Convergence {
        key: String,
        source: ConvergenceError,
    },

    /// Fetching observed state failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_offending_key() {
        let err = ReconcileError::Operation {
            key: "blk-c".into(),
            kind: OperationKind::Remove,
            source: TransportError::Api {
                status: 409,
                message: "busy".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "remove of 'blk-c' failed: api error (409): busy"
        );

        let err = ReconcileError::Convergence {
            key: "blk-b".into(),
            source: ConvergenceError::UnexpectedState("error".into()),
        };
        assert_eq!(
            err.to_string(),
            "'blk-b' did not converge: unexpected status 'error'"
        );
    }

    #[test]
    fn timeout_reports_last_observed_status() {
        let err = ConvergenceError::Timeout {
            last_status: "assigning".into(),
            waited: Duration::from_secs(60),
        };
        assert!(err.to_string().contains("assigning"));
    }

    #[test]
    fn duplicate_key_converts_from_engine_error() {
        let engine_err = converge_engine::Error::DuplicateKey {
            key: "env".into(),
            side: converge_engine::Side::Desired,
        };
        let err: ReconcileError = engine_err.clone().into();
        assert_eq!(err, ReconcileError::Plan(engine_err));
    }
}
