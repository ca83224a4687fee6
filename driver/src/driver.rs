//! The Reconciliation Driver.
//!
//! One [`reconcile`] call is one cycle for one resource's collection:
//! diff desired against observed, issue the add/remove operations the
//! plan calls for, wait for asynchronous effects to converge, then
//! re-read the remote state and project it back in the caller's order.
//!
//! The driver assumes exclusive ownership of the resource id for the
//! duration of the cycle. Cycles against different resource ids are
//! independent and need no shared locking.

use crate::error::ReconcileError;
use crate::transport::{OperationKind, Transport};
use crate::wait::{await_convergence, WaitSpec};
use converge_engine::{diff, keys_of, project, Keyed};
use futures::future::try_join_all;
use tracing::{debug, info};

/// How a collection's add/remove operations must be sequenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    /// Items occupy exclusive slots (a single gateway/VLAN assignment):
    /// each removal must complete - and converge, when a wait spec is
    /// set - before the next operation is attempted. Everything runs
    /// sequentially, removes first.
    SlotExclusive,
    /// Items are independent (tags): removes and adds may be issued
    /// concurrently, joined before any convergence waiting.
    #[default]
    Independent,
}

/// Per-resource-kind reconciliation behavior.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePolicy {
    pub ordering: Ordering,
    /// Wait applied after each remove; `None` for synchronous APIs
    pub wait_remove: Option<WaitSpec>,
    /// Wait applied after each add; `None` for synchronous APIs
    pub wait_add: Option<WaitSpec>,
}

impl ReconcilePolicy {
    /// Independent items, synchronous effects. Tag semantics.
    pub fn independent() -> Self {
        Self::default()
    }

    /// Slot-exclusive items with asynchronous detach/attach. IP block
    /// semantics: the remove converges before the add is issued.
    pub fn slot_exclusive(wait_remove: WaitSpec, wait_add: WaitSpec) -> Self {
        Self {
            ordering: Ordering::SlotExclusive,
            wait_remove: Some(wait_remove),
            wait_add: Some(wait_add),
        }
    }
}

/// Run one reconciliation cycle and return the collection to report
/// back to the caller.
///
/// When the plan is already converged this short-circuits to a pure
/// projection and issues no remote call at all, which is what makes a
/// no-op cycle produce no spurious changes.
///
/// On failure the cycle aborts without rollback: operations already
/// issued stay applied remotely, and the error names the offending item
/// key. Retrying diffs against the new observed state and only acts on
/// the remaining delta.
pub async fn reconcile<T, X>(
    transport: &X,
    resource_id: &str,
    desired: &[T],
    observed: &[T],
    policy: &ReconcilePolicy,
) -> Result<Vec<T>, ReconcileError>
where
    T: Keyed + Clone + Send + Sync,
    X: Transport<T> + ?Sized,
{
    let plan = diff(desired, observed)?;
    let hint = keys_of(desired);

    if plan.is_converged() {
        debug!(resource = resource_id, "already converged, nothing to do");
        return Ok(project(observed, &hint));
    }

    info!(
        resource = resource_id,
        add = plan.to_add.len(),
        remove = plan.to_remove.len(),
        "reconciling collection"
    );

    match policy.ordering {
        Ordering::SlotExclusive => {
            for item in &plan.to_remove {
                execute_one(transport, OperationKind::Remove, resource_id, item).await?;
                if let Some(spec) = &policy.wait_remove {
                    converge_one(transport, spec, item).await?;
                }
            }
            for item in &plan.to_add {
                execute_one(transport, OperationKind::Add, resource_id, item).await?;
                if let Some(spec) = &policy.wait_add {
                    converge_one(transport, spec, item).await?;
                }
            }
        }
        Ordering::Independent => {
            let removes = plan
                .to_remove
                .iter()
                .map(|item| execute_one(transport, OperationKind::Remove, resource_id, item));
            let adds = plan
                .to_add
                .iter()
                .map(|item| execute_one(transport, OperationKind::Add, resource_id, item));
            // Join every operation before waiting on any of them: a
            // waiter needs a stable view of which items were issued.
            try_join_all(removes.chain(adds)).await?;

            if let Some(spec) = &policy.wait_remove {
                for item in &plan.to_remove {
                    converge_one(transport, spec, item).await?;
                }
            }
            if let Some(spec) = &policy.wait_add {
                for item in &plan.to_add {
                    converge_one(transport, spec, item).await?;
                }
            }
        }
    }

    let refreshed = transport.fetch_observed(resource_id).await?;
    Ok(project(&refreshed, &hint))
}

async fn execute_one<T, X>(
    transport: &X,
    kind: OperationKind,
    resource_id: &str,
    item: &T,
) -> Result<(), ReconcileError>
where
    T: Keyed + Clone + Send + Sync,
    X: Transport<T> + ?Sized,
{
    debug!(resource = resource_id, key = %item.key(), %kind, "issuing operation");
    transport
        .execute(kind, resource_id, item)
        .await
        .map_err(|source| ReconcileError::Operation {
            key: item.key().to_string(),
            kind,
            source,
        })
}

async fn converge_one<T, X>(
    transport: &X,
    spec: &WaitSpec,
    item: &T,
) -> Result<(), ReconcileError>
where
    T: Keyed + Clone + Send + Sync,
    X: Transport<T> + ?Sized,
{
    let key = item.key().to_string();
    debug!(%key, "waiting for convergence");
    await_convergence(spec, || transport.fetch_status(&key))
        .await
        .map(drop)
        .map_err(|source| ReconcileError::Convergence {
            key: key.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::presets;

    #[test]
    fn independent_policy_has_no_waits() {
        let policy = ReconcilePolicy::independent();
        assert_eq!(policy.ordering, Ordering::Independent);
        assert!(policy.wait_remove.is_none());
        assert!(policy.wait_add.is_none());
    }

    #[test]
    fn slot_exclusive_policy_waits_both_ways() {
        let timing = RetryConfig::default();
        let policy = ReconcilePolicy::slot_exclusive(
            presets::ip_block_unassign(&timing),
            presets::ip_block_assign(&timing),
        );
        assert_eq!(policy.ordering, Ordering::SlotExclusive);
        assert!(policy.wait_remove.is_some());
        assert!(policy.wait_add.is_some());
    }
}
