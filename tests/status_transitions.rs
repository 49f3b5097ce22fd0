use orders_ingest::domain::order::TransactionStatus::{Paid, Pending, Refunded};
use orders_ingest::lifecycle::transitions::{decide, TransitionDecision, TransitionPolicy};

#[test]
fn first_write_establishes_any_status() {
    let policy = TransitionPolicy::default();
    for status in [Pending, Paid, Refunded] {
        assert_eq!(decide(&policy, None, status), TransitionDecision::Allow);
    }
}

#[test]
fn redelivery_of_current_status_is_allowed() {
    let policy = TransitionPolicy::default();
    for status in [Pending, Paid, Refunded] {
        assert_eq!(
            decide(&policy, Some(status), status),
            TransitionDecision::Allow
        );
    }
}

#[test]
fn pending_moves_forward() {
    let policy = TransitionPolicy::default();
    assert_eq!(decide(&policy, Some(Pending), Paid), TransitionDecision::Allow);
    assert_eq!(
        decide(&policy, Some(Pending), Refunded),
        TransitionDecision::Allow
    );
}

#[test]
fn paid_cannot_regress_to_pending() {
    let policy = TransitionPolicy::default();
    assert_eq!(decide(&policy, Some(Paid), Pending), TransitionDecision::Deny);
}

#[test]
fn paid_can_be_refunded() {
    let policy = TransitionPolicy::default();
    assert_eq!(decide(&policy, Some(Paid), Refunded), TransitionDecision::Allow);
}

#[test]
fn refunded_is_terminal() {
    let policy = TransitionPolicy::default();
    assert_eq!(
        decide(&policy, Some(Refunded), Pending),
        TransitionDecision::Deny
    );
    assert_eq!(
        decide(&policy, Some(Refunded), Paid),
        TransitionDecision::Deny
    );
}

#[test]
fn pending_to_refunded_shortcut_follows_policy() {
    let strict = TransitionPolicy {
        allow_pending_to_refunded: false,
    };
    assert_eq!(
        decide(&strict, Some(Pending), Refunded),
        TransitionDecision::Deny
    );

    let lenient = TransitionPolicy {
        allow_pending_to_refunded: true,
    };
    assert_eq!(
        decide(&lenient, Some(Pending), Refunded),
        TransitionDecision::Allow
    );
}
