use crate::domain::order::TransactionStatus;

/// Policy points the product owner may still flip. The direct
/// Pending -> Refunded shortcut (refund before a payment event was ever
/// seen) is allowed by default because some platforms deliver it.
#[derive(Debug, Clone, Copy)]
pub struct TransitionPolicy {
    pub allow_pending_to_refunded: bool,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self {
            allow_pending_to_refunded: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    Allow,
    Deny,
}

/// Pure decision function for the order lifecycle. Status is monotonically
/// non-decreasing along `Pending < Paid < Refunded`; re-delivering the
/// current status is an allowed no-op update. `current = None` means no
/// record exists yet and any first status may establish the order.
pub fn decide(
    policy: &TransitionPolicy,
    current: Option<TransactionStatus>,
    requested: TransactionStatus,
) -> TransitionDecision {
    let Some(current) = current else {
        return TransitionDecision::Allow;
    };

    use TransactionStatus::{Paid, Pending, Refunded};
    match (current, requested) {
        (Pending, Pending) => TransitionDecision::Allow,
        (Pending, Paid) => TransitionDecision::Allow,
        (Pending, Refunded) => {
            if policy.allow_pending_to_refunded {
                TransitionDecision::Allow
            } else {
                TransitionDecision::Deny
            }
        }
        (Paid, Paid) => TransitionDecision::Allow,
        (Paid, Refunded) => TransitionDecision::Allow,
        (Paid, Pending) => TransitionDecision::Deny,
        (Refunded, Refunded) => TransitionDecision::Allow,
        (Refunded, Pending) | (Refunded, Paid) => TransitionDecision::Deny,
    }
}
