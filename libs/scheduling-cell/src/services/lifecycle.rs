// libs/scheduling-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use shared_models::appointment::AppointmentStatus;

use crate::models::SchedulingError;

/// Status transition machine. The table below is exhaustive: any pair not
/// listed, including same-state no-ops, is rejected.
pub struct LifecycleService;

impl LifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_transition(
        &self,
        current: AppointmentStatus,
        requested: AppointmentStatus,
    ) -> Result<(), SchedulingError> {
        debug!("Validating status transition {} -> {}", current, requested);

        if !self.allowed_transitions(current).contains(&requested) {
            warn!(
                "Invalid status transition attempted: {} -> {}",
                current, requested
            );
            return Err(SchedulingError::Validation(format!(
                "Cannot change status from {} to {}",
                current, requested
            )));
        }

        Ok(())
    }

    /// All valid next statuses for a given current status.
    pub fn allowed_transitions(&self, current: AppointmentStatus) -> &'static [AppointmentStatus] {
        match current {
            AppointmentStatus::Scheduled => {
                &[AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Scheduled, AppointmentStatus::Cancelled]
            }
            // Terminal
            AppointmentStatus::Completed => &[],
            // Cancelled appointments may be reopened
            AppointmentStatus::Cancelled => &[AppointmentStatus::Scheduled],
        }
    }
}

impl Default for LifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use AppointmentStatus::*;

    const ALL: [AppointmentStatus; 4] = [Scheduled, Pending, Completed, Cancelled];

    #[test]
    fn allowed_edges_pass() {
        let lifecycle = LifecycleService::new();
        for (from, to) in [
            (Scheduled, Completed),
            (Scheduled, Cancelled),
            (Pending, Scheduled),
            (Pending, Cancelled),
            (Cancelled, Scheduled),
        ] {
            assert!(lifecycle.validate_transition(from, to).is_ok());
        }
    }

    #[test]
    fn every_unlisted_pair_is_rejected() {
        let lifecycle = LifecycleService::new();
        for from in ALL {
            for to in ALL {
                if lifecycle.allowed_transitions(from).contains(&to) {
                    continue;
                }
                assert_matches!(
                    lifecycle.validate_transition(from, to),
                    Err(SchedulingError::Validation(_)),
                    "{} -> {} should be rejected",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn same_state_transitions_are_rejected() {
        let lifecycle = LifecycleService::new();
        for status in ALL {
            assert_matches!(
                lifecycle.validate_transition(status, status),
                Err(SchedulingError::Validation(_))
            );
        }
    }

    #[test]
    fn completed_is_terminal() {
        let lifecycle = LifecycleService::new();
        assert!(lifecycle.allowed_transitions(Completed).is_empty());
        assert_matches!(
            lifecycle.validate_transition(Completed, Scheduled),
            Err(SchedulingError::Validation(_))
        );
    }
}
