//! The seam between the driver and the remote API.
//!
//! Converge never talks to the network itself. The surrounding system
//! implements [`Transport`] on top of its HTTP client; the driver only
//! needs three capabilities: read the current collection, read a status
//! string, and issue one add/remove operation.

use async_trait::async_trait;
use converge_engine::Keyed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by the transport collaborator.
///
/// The driver propagates these unchanged and never retries them; retry
/// policy for transient network errors belongs to the transport itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The remote API rejected the request
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never got a usable answer
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with something the client could not interpret
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// The kind of remote write issued for one unmatched item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Attach/create the item on the resource
    Add,
    /// Detach/delete the item from the resource
    Remove,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Add => write!(f, "add"),
            OperationKind::Remove => write!(f, "remove"),
        }
    }
}

/// Remote API access for one collection type.
///
/// `fetch_status` takes the id of whatever carries the status being
/// waited on - the parent resource for provisioning waits, the
/// sub-resource (e.g. the IP block itself) for attachment waits.
#[async_trait]
pub trait Transport<T: Keyed + Send + Sync>: Send + Sync {
    /// Read the collection currently attached to `resource_id`.
    async fn fetch_observed(&self, resource_id: &str) -> Result<Vec<T>, TransportError>;

    /// Read the current status string of a resource or sub-resource.
    async fn fetch_status(&self, id: &str) -> Result<String, TransportError>;

    /// Issue one add/remove operation. Accepted immediately by the
    /// remote API; the effect may land later.
    async fn execute(
        &self,
        kind: OperationKind,
        resource_id: &str,
        item: &T,
    ) -> Result<(), TransportError>;
}
