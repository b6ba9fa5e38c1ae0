use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a donation process.
///
/// Stored as a lowercase string column; the enum is the only place that
/// knows the legal edges. Status only ever moves forward - there is no undo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    PendingApproval,
    Rejected,
    AppointmentPending,
    AppointmentScheduled,
    HealthCheckPassed,
    HealthCheckFailed,
    BloodCollected,
    Completed,
    TestingFailed,
}

impl DonationStatus {
    /// Statuses from which no further transition is defined.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DonationStatus::Rejected
                | DonationStatus::HealthCheckFailed
                | DonationStatus::TestingFailed
                | DonationStatus::Completed
        )
    }

    /// The complete edge set of the lifecycle.
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        use DonationStatus::*;
        matches!(
            (*self, next),
            (PendingApproval, Rejected)
                | (PendingApproval, AppointmentPending)
                | (AppointmentPending, AppointmentScheduled)
                | (AppointmentScheduled, HealthCheckPassed)
                | (AppointmentScheduled, HealthCheckFailed)
                | (HealthCheckPassed, BloodCollected)
                | (BloodCollected, Completed)
                | (BloodCollected, TestingFailed)
        )
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonationStatus::PendingApproval => write!(f, "pending_approval"),
            DonationStatus::Rejected => write!(f, "rejected"),
            DonationStatus::AppointmentPending => write!(f, "appointment_pending"),
            DonationStatus::AppointmentScheduled => write!(f, "appointment_scheduled"),
            DonationStatus::HealthCheckPassed => write!(f, "health_check_passed"),
            DonationStatus::HealthCheckFailed => write!(f, "health_check_failed"),
            DonationStatus::BloodCollected => write!(f, "blood_collected"),
            DonationStatus::Completed => write!(f, "completed"),
            DonationStatus::TestingFailed => write!(f, "testing_failed"),
        }
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending_approval" => Ok(DonationStatus::PendingApproval),
            "rejected" => Ok(DonationStatus::Rejected),
            "appointment_pending" => Ok(DonationStatus::AppointmentPending),
            "appointment_scheduled" => Ok(DonationStatus::AppointmentScheduled),
            "health_check_passed" => Ok(DonationStatus::HealthCheckPassed),
            "health_check_failed" => Ok(DonationStatus::HealthCheckFailed),
            "blood_collected" => Ok(DonationStatus::BloodCollected),
            "completed" => Ok(DonationStatus::Completed),
            "testing_failed" => Ok(DonationStatus::TestingFailed),
            _ => Err(anyhow::anyhow!("Invalid donation status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DonationStatus::*;
    use super::*;

    const ALL: [DonationStatus; 9] = [
        PendingApproval,
        Rejected,
        AppointmentPending,
        AppointmentScheduled,
        HealthCheckPassed,
        HealthCheckFailed,
        BloodCollected,
        Completed,
        TestingFailed,
    ];

    #[test]
    fn display_and_parse_round_trip() {
        for status in ALL {
            let parsed: DonationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("approved".parse::<DonationStatus>().is_err());
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for status in ALL.iter().filter(|s| s.is_terminal()) {
            for next in ALL {
                assert!(
                    !status.can_transition_to(next),
                    "{status} must not transition to {next}"
                );
            }
        }
    }

    #[test]
    fn edge_set_is_exactly_the_lifecycle() {
        let edges: Vec<(DonationStatus, DonationStatus)> = ALL
            .iter()
            .flat_map(|from| {
                ALL.into_iter()
                    .filter(|to| from.can_transition_to(*to))
                    .map(|to| (*from, to))
            })
            .collect();

        assert_eq!(
            edges,
            vec![
                (PendingApproval, Rejected),
                (PendingApproval, AppointmentPending),
                (AppointmentPending, AppointmentScheduled),
                (AppointmentScheduled, HealthCheckPassed),
                (AppointmentScheduled, HealthCheckFailed),
                (HealthCheckPassed, BloodCollected),
                (BloodCollected, Completed),
                (BloodCollected, TestingFailed),
            ]
        );
    }

    #[test]
    fn blood_collected_is_only_reachable_from_health_check_passed() {
        for from in ALL {
            if from.can_transition_to(BloodCollected) {
                assert_eq!(from, HealthCheckPassed);
            }
        }
    }
}
