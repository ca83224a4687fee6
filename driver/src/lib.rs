//! # Converge Driver
//!
//! The async half of Converge: drives the remote API until its observed
//! state matches the caller's desired state.
//!
//! The `converge-engine` crate decides *what* has to change (pure
//! diffing and projection); this crate decides *how and when*: it issues
//! add/remove operations through an injected [`Transport`], waits for
//! asynchronous side effects to actually land by polling status
//! ([`await_convergence`]), and reports the refreshed collection back in
//! the caller's declared order.
//!
//! One [`reconcile`] call is one cycle. Nothing is rolled back on
//! failure - the remote API commits each operation independently - but a
//! failed cycle is safe to retry: the next diff only sees the remaining
//! delta.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use converge_driver::{presets, reconcile, ReconcilePolicy, RetryConfig};
//! use converge_engine::IpBlockBinding;
//! # use converge_driver::{OperationKind, Transport, TransportError};
//! # async fn demo<X: Transport<IpBlockBinding>>(api: &X) -> Result<(), Box<dyn std::error::Error>> {
//! let timing = RetryConfig::default();
//! let policy = ReconcilePolicy::slot_exclusive(
//!     presets::ip_block_unassign(&timing),
//!     presets::ip_block_assign(&timing),
//! );
//!
//! let desired = vec![IpBlockBinding::new("blk-a", 10)];
//! let observed = api.fetch_observed("srv-1").await?;
//! let reported = reconcile(api, "srv-1", &desired, &observed, &policy).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod presets;
pub mod transport;
pub mod wait;

// Re-export main types at crate root
pub use config::{ConfigError, RetryConfig};
pub use driver::{reconcile, Ordering, ReconcilePolicy};
pub use error::{ConvergenceError, ReconcileError};
pub use transport::{OperationKind, Transport, TransportError};
pub use wait::{await_convergence, await_convergence_until, WaitSpec};
