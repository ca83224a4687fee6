//! Ready-made [`WaitSpec`]s for the resource kinds the platform exposes.
//!
//! Each preset carries one remote status vocabulary; the timing comes
//! from the caller's [`RetryConfig`]. Statuses outside a preset's
//! pending and target sets - `"error"` for servers, `"Error"` for
//! clusters - deliberately appear in neither, so the waiter fails fast
//! on them instead of polling until the deadline.

use crate::config::RetryConfig;
use crate::wait::WaitSpec;

/// Server provisioning, reboot, and reset all end in a power state.
pub fn server_provision(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(
        ["creating", "resetting", "rebooting"],
        ["powered-on", "powered-off"],
        timing,
    )
}

/// Waiting for a powered-off server to come up.
pub fn power_on(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(["powered-off"], ["powered-on"], timing)
}

/// Waiting for a powered-on server to shut down.
pub fn power_off(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(["powered-on"], ["powered-off"], timing)
}

/// An IP block attaching to a server. The block is slot-exclusive, so
/// this is also the wait that must pass before the freed block can be
/// bound elsewhere.
pub fn ip_block_assign(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(["unassigned", "assigning"], ["assigned"], timing)
}

/// An IP block detaching from a server.
pub fn ip_block_unassign(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(["assigned", "unassigning"], ["unassigned"], timing)
}

/// A managed cluster provisioning its node pools. A cluster that lands
/// in `Ready` converged; one that lands in `Error` surfaces as an
/// unexpected-state failure naming that status.
pub fn cluster_provision(timing: &RetryConfig) -> WaitSpec {
    WaitSpec::new(["Creating"], ["Ready"], timing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn presets_share_configured_timing() {
        let timing = RetryConfig {
            timeout: Duration::from_secs(10),
            ..RetryConfig::default()
        };
        for spec in [
            server_provision(&timing),
            power_on(&timing),
            power_off(&timing),
            ip_block_assign(&timing),
            ip_block_unassign(&timing),
            cluster_provision(&timing),
        ] {
            assert_eq!(spec.timeout, Duration::from_secs(10));
            assert!(spec.pending.is_disjoint(&spec.target));
        }
    }

    #[test]
    fn cluster_error_is_in_neither_set() {
        let spec = cluster_provision(&RetryConfig::default());
        assert!(!spec.pending.contains("Error"));
        assert!(!spec.target.contains("Error"));
    }

    #[test]
    fn assign_and_unassign_mirror_each_other() {
        let timing = RetryConfig::default();
        let assign = ip_block_assign(&timing);
        let unassign = ip_block_unassign(&timing);
        assert!(assign.target.contains("assigned"));
        assert!(unassign.pending.contains("assigned"));
        assert!(unassign.target.contains("unassigned"));
        assert!(assign.pending.contains("unassigned"));
    }
}
