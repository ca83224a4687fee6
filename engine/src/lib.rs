//! # Converge Engine
//!
//! Deterministic collection reconciliation for infrastructure resources.
//!
//! This crate provides the pure logic for converging a caller-declared
//! *desired* list of sub-resources (tags, IP blocks, network attachments,
//! node pools) with the *observed* list reported by a remote API. It has
//! no IO and no clock - the same inputs always produce the same outputs.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never talks to a network or filesystem
//! - **Deterministic**: safe to call repeatedly, no hidden state
//! - **Testable**: pure functions, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Keyed collections
//!
//! Every reconciled item carries a stable identity key (a server-assigned
//! id, or a name when no id exists yet). A collection is an ordered
//! sequence of such items; ordering matters only on the desired side.
//!
//! ### Diffing
//!
//! [`diff`] partitions a desired/observed pair into a [`ReconcilePlan`]:
//! keys present on both sides (`matched`), items to create remotely
//! (`to_add`), and items to tear down (`to_remove`).
//!
//! ### Projection
//!
//! [`project`] rebuilds the caller-visible collection after a write:
//! matched items keep the caller's position (with the server's payload,
//! which is authoritative), server-discovered items are appended, removed
//! items disappear. Re-projecting an unchanged observation is a no-op,
//! which is what makes reconciliation idempotent.
//!
//! ## Quick Start
//!
//! ```rust
//! use converge_engine::{diff, project, keys_of, TagAssignment};
//!
//! let desired = vec![
//!     TagAssignment::new("env", Some("prod")),
//!     TagAssignment::new("team", Some("x")),
//! ];
//! let observed = vec![TagAssignment::new("team", Some("x"))];
//!
//! let plan = diff(&desired, &observed).unwrap();
//! assert_eq!(plan.to_add.len(), 1);
//! assert!(plan.to_remove.is_empty());
//!
//! // After the add is applied remotely, report back in caller order.
//! let refreshed = vec![
//!     TagAssignment::new("team", Some("x")),
//!     TagAssignment::new("env", Some("prod")),
//! ];
//! let reported = project(&refreshed, &keys_of(&desired));
//! assert_eq!(reported[0].name, "env");
//! ```

pub mod diff;
pub mod error;
pub mod item;
pub mod project;
pub mod resources;

// Re-export main types at crate root
pub use diff::{diff, ReconcilePlan};
pub use error::{Error, Side};
pub use item::{keys_of, Keyed};
pub use project::project;
pub use resources::{
    IpBlockBinding, NodePool, PrivateNetworkAttachment, PublicNetworkAttachment, TagAssignment,
};

/// Type aliases for clarity
pub type ResourceId = String;
pub type Status = String;
