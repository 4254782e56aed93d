//! State machine trait for status enums.
//!
//! Connection stages, milestone status, document exchanges and verification
//! documents all share this interface so illegal transitions fail the same way.

use super::DomainError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// ```ignore
/// let next = ConnectionStatus::Lead.transition_to(ConnectionStatus::Connected)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the target is not reachable from `self`
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::invalid_transition(format!(
                "Cannot transition from {:?} to {:?}",
                self, target
            ))
            .with_detail("from", format!("{:?}", self))
            .with_detail("to", format!("{:?}", target)))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
