//! Employment status transition table.
//!
//! Every `(from, to)` pair is a permitted transition and no status is
//! terminal. The table only lists pairs that carry a side effect; adding a
//! new effect means adding a row, not a branch in the lifecycle service.

use crate::model::official::EmploymentStatus;

/// Side effect attached to a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Persist the schedule computed for `as_status` from the official's
    /// original entry date.
    ScheduleEvents { as_status: EmploymentStatus },
}

const TRANSITION_EFFECTS: &[(EmploymentStatus, EmploymentStatus, TransitionEffect)] = &[(
    EmploymentStatus::Provisional,
    EmploymentStatus::Positioned,
    TransitionEffect::ScheduleEvents {
        as_status: EmploymentStatus::Positioned,
    },
)];

/// Returns the side effect of moving from `from` to `to`, if any.
pub fn effect_for(from: EmploymentStatus, to: EmploymentStatus) -> Option<TransitionEffect> {
    TRANSITION_EFFECTS
        .iter()
        .find(|(row_from, row_to, _)| *row_from == from && *row_to == to)
        .map(|&(_, _, effect)| effect)
}

#[cfg(test)]
mod tests {
    use super::{effect_for, TransitionEffect};
    use crate::model::official::EmploymentStatus;

    #[test]
    fn only_provisional_to_positioned_schedules_events() {
        for from in EmploymentStatus::ALL {
            for to in EmploymentStatus::ALL {
                let effect = effect_for(from, to);
                if from == EmploymentStatus::Provisional && to == EmploymentStatus::Positioned {
                    assert_eq!(
                        effect,
                        Some(TransitionEffect::ScheduleEvents {
                            as_status: EmploymentStatus::Positioned
                        })
                    );
                } else {
                    assert_eq!(effect, None, "{from} -> {to} must not carry an effect");
                }
            }
        }
    }
}
