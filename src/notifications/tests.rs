//! Timing tests for the notification center.
//!
//! All tests run on a paused clock, so sleeps complete instantly and in a
//! deterministic order.

use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::{Instant, sleep};

use super::*;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn titles(snapshot: &[Notification]) -> Vec<&str> {
    snapshot.iter().map(|n| n.title.as_str()).collect()
}

fn drain_removals(rx: &mut tokio::sync::broadcast::Receiver<Removal>) -> Vec<Removal> {
    let mut removals = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(removal) => removals.push(removal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return removals,
            Err(TryRecvError::Lagged(n)) => panic!("lagged by {n} removals"),
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_notify_then_expire() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);

    center.notify("success", "A", "a");
    let active = center.list_active().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Success);
    assert_eq!(active[0].title, "A");
    assert_eq!(active[0].message, "a");

    sleep(ms(5_000)).await;
    sleep(ms(10)).await;
    assert!(center.list_active().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_expiry_window_bounds() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.notify(NotificationKind::Info, "bounded", "window");

    sleep(ms(4_999)).await;
    assert_eq!(center.list_active().await.len(), 1);

    sleep(ms(11)).await;
    assert!(center.list_active().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_before_expiry() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut removals = center.removals();

    let id = center.notify("error", "B", "b");
    sleep(ms(100)).await;
    center.dismiss(id);
    assert!(center.list_active().await.is_empty());

    // Well past the original deadline: the cancelled timer must not fire.
    sleep(ms(6_000)).await;
    assert!(center.list_active().await.is_empty());

    let events = drain_removals(&mut removals);
    assert_eq!(
        events,
        vec![Removal {
            id,
            reason: RemovalReason::Dismissed
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_staggered_expiry() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let start = Instant::now();

    center.notify("info", "t0", "first");
    sleep(ms(1_000)).await;
    center.notify("info", "t1000", "second");
    sleep(ms(1_000)).await;
    center.notify("info", "t2000", "third");

    tokio::time::sleep_until(start + ms(5_500)).await;
    assert_eq!(titles(&center.list_active().await), vec!["t1000", "t2000"]);

    tokio::time::sleep_until(start + ms(6_500)).await;
    assert_eq!(titles(&center.list_active().await), vec!["t2000"]);

    tokio::time::sleep_until(start + ms(7_500)).await;
    assert!(center.list_active().await.is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_dismiss_unknown_id_is_noop() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.notify("info", "kept", "still here");

    center.dismiss(NotificationId::new(42));
    assert_eq!(titles(&center.list_active().await), vec!["kept"]);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_twice_records_one_removal() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut removals = center.removals();

    let id = center.notify("warning", "once", "only once");
    center.dismiss(id);
    center.dismiss(id);
    assert!(center.list_active().await.is_empty());

    assert_eq!(drain_removals(&mut removals).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_after_expiry_is_noop() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut removals = center.removals();

    let id = center.notify("info", "late", "dismissed too late");
    sleep(ms(5_100)).await;
    center.dismiss(id);
    assert!(center.list_active().await.is_empty());

    let events = drain_removals(&mut removals);
    assert_eq!(
        events,
        vec![Removal {
            id,
            reason: RemovalReason::Expired
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_racing_expiry_removes_once() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut removals = center.removals();

    let id = center.notify("info", "race", "same tick");
    sleep(ms(5_000)).await;
    center.dismiss(id);
    assert!(center.list_active().await.is_empty());

    sleep(ms(1_000)).await;
    let events = drain_removals(&mut removals);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
}

#[tokio::test(start_paused = true)]
async fn test_timers_are_independent() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);

    let first = center.notify("info", "first", "dismissed");
    sleep(ms(1_000)).await;
    center.notify("info", "second", "expires on its own");
    center.dismiss(first);

    sleep(ms(3_000)).await;
    assert_eq!(titles(&center.list_active().await), vec!["second"]);

    sleep(ms(2_100)).await;
    assert!(center.list_active().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ids_unique_within_same_millisecond() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);

    let ids: Vec<NotificationId> = (0..100)
        .map(|i| center.notify("info", format!("n{i}"), ""))
        .collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    let listed: Vec<NotificationId> = center.list_active().await.iter().map(|n| n.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test(start_paused = true)]
async fn test_unrecognized_kind_falls_back_to_info() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.notify("critical", "odd kind", "coerced");

    let active = center.list_active().await;
    assert_eq!(active[0].kind, NotificationKind::Info);
}

#[tokio::test(start_paused = true)]
async fn test_empty_title_and_message_are_accepted() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.notify("info", "", "");
    assert_eq!(center.list_active().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expires_at_matches_window() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.notify("info", "stamped", "");

    let active = center.list_active().await;
    let window = active[0].expires_at.duration_since(active[0].created_at);
    assert_eq!(window.as_millis(), 5_000);
}

#[tokio::test(start_paused = true)]
async fn test_custom_expiry() {
    let center = NotificationCenter::new(ms(1_000));
    assert_eq!(center.expiry(), ms(1_000));
    center.notify("info", "short", "lived");

    sleep(ms(1_010)).await;
    assert!(center.list_active().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_one_active_set() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let other = center.clone();

    let id = other.notify("success", "from clone", "");
    assert_eq!(center.list_active().await.len(), 1);

    center.dismiss(id);
    assert!(other.list_active().await.is_empty());
}

// ============================================================================
// View-layer contract
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_subscribe_sees_every_change() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut snapshots = center.subscribe();

    let id = center.notify("success", "watched", "");
    snapshots.changed().await.unwrap();
    assert_eq!(titles(&snapshots.borrow_and_update()), vec!["watched"]);

    center.dismiss(id);
    snapshots.changed().await.unwrap();
    assert!(snapshots.borrow_and_update().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_empty() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let start = Instant::now();

    center.notify("info", "a", "");
    center.wait_until_empty().await;

    assert!(start.elapsed() >= ms(5_000));
    assert!(center.list_active().await.is_empty());
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_shutdown_clears_active_set() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    let mut removals = center.removals();

    let first = center.notify("info", "a", "");
    let second = center.notify("info", "b", "");
    center.shutdown().await.unwrap();

    assert!(center.list_active().await.is_empty());
    assert_eq!(
        drain_removals(&mut removals),
        vec![
            Removal {
                id: first,
                reason: RemovalReason::Shutdown
            },
            Removal {
                id: second,
                reason: RemovalReason::Shutdown
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_calls_after_shutdown_are_ignored() {
    let center = NotificationCenter::new(DEFAULT_EXPIRY);
    center.shutdown().await.unwrap();
    center.shutdown().await.unwrap();

    let id = center.notify("info", "ignored", "");
    center.dismiss(id);
    assert!(center.list_active().await.is_empty());
}

// ============================================================================
// Model-based property test
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Notify(usize),
    Dismiss(usize),
    Advance(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..4).prop_map(Op::Notify),
        2 => (0usize..16).prop_map(Op::Dismiss),
        3 => (1u64..3_000).prop_map(Op::Advance),
    ]
}

/// Runs `ops` against a center and a plain model, comparing snapshots after
/// every step. Steps whose clock lands within a few milliseconds of a
/// deadline are skipped, since timer granularity is one millisecond.
fn check_against_model(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap();

    runtime.block_on(async move {
        let center = NotificationCenter::new(DEFAULT_EXPIRY);
        let mut created: Vec<NotificationId> = Vec::new();
        let mut model: Vec<(NotificationId, Instant)> = Vec::new();

        for op in ops {
            match op {
                Op::Notify(kind) => {
                    let kind = NotificationKind::ALL[kind];
                    let deadline = Instant::now() + DEFAULT_EXPIRY;
                    let id = center.notify(kind, "t", "m");
                    created.push(id);
                    model.push((id, deadline));
                }
                Op::Dismiss(index) => {
                    if let Some(&id) = created.get(index) {
                        center.dismiss(id);
                        model.retain(|(alive, _)| *alive != id);
                    }
                }
                Op::Advance(millis) => sleep(ms(millis)).await,
            }

            let now = Instant::now();
            let near_deadline = model.iter().any(|(_, deadline)| {
                let gap = if *deadline > now { *deadline - now } else { now - *deadline };
                gap <= ms(2)
            });
            if near_deadline {
                continue;
            }

            model.retain(|(_, deadline)| *deadline > now);
            let expected: Vec<NotificationId> = model.iter().map(|(id, _)| *id).collect();
            let actual: Vec<NotificationId> =
                center.list_active().await.iter().map(|n| n.id).collect();
            prop_assert_eq!(actual, expected);
        }

        Ok(())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `list_active` returns exactly the notifications that were neither
    /// dismissed nor expired, in creation order.
    #[test]
    fn prop_list_active_matches_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        check_against_model(ops)?;
    }
}
