use orders_ingest::domain::order::TransactionStatus::{Paid, Pending, Refunded};
use orders_ingest::lifecycle::transitions::TransitionPolicy;
use orders_ingest::repo::orders_repo::{plan_write, WritePlan};

#[test]
fn first_delivery_inserts_whatever_the_status() {
    let policy = TransitionPolicy::default();
    for status in [Pending, Paid, Refunded] {
        assert_eq!(plan_write(&policy, None, status), WritePlan::Insert);
    }
}

#[test]
fn redelivery_of_current_status_updates_guarded_on_it() {
    let policy = TransitionPolicy::default();
    for status in [Pending, Paid, Refunded] {
        assert_eq!(
            plan_write(&policy, Some(status), status),
            WritePlan::Update {
                guard_status: status
            }
        );
    }
}

#[test]
fn forward_moves_are_guarded_on_the_observed_status() {
    let policy = TransitionPolicy::default();
    assert_eq!(
        plan_write(&policy, Some(Pending), Paid),
        WritePlan::Update {
            guard_status: Pending
        }
    );
    assert_eq!(
        plan_write(&policy, Some(Paid), Refunded),
        WritePlan::Update { guard_status: Paid }
    );
}

#[test]
fn regressions_are_denied_with_the_current_status_attached() {
    let policy = TransitionPolicy::default();
    assert_eq!(
        plan_write(&policy, Some(Paid), Pending),
        WritePlan::Deny { current: Paid }
    );
    assert_eq!(
        plan_write(&policy, Some(Refunded), Pending),
        WritePlan::Deny { current: Refunded }
    );
    assert_eq!(
        plan_write(&policy, Some(Refunded), Paid),
        WritePlan::Deny { current: Refunded }
    );
}

#[test]
fn pending_refund_shortcut_follows_policy() {
    let strict = TransitionPolicy {
        allow_pending_to_refunded: false,
    };
    assert_eq!(
        plan_write(&strict, Some(Pending), Refunded),
        WritePlan::Deny { current: Pending }
    );

    let lenient = TransitionPolicy::default();
    assert_eq!(
        plan_write(&lenient, Some(Pending), Refunded),
        WritePlan::Update {
            guard_status: Pending
        }
    );
}
