//! Sweeper runner: immediate first cycle, start/stop toggling, and
//! restartability.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::TestApp;
use parkhub_core::types::time::{now_millis, MILLIS_PER_MINUTE};
use parkhub_entity::booking::{BookingStatus, CreateBooking};
use parkhub_entity::vehicle::VehicleType;
use parkhub_worker::{OverstaySweep, SweeperHandle};

fn sweep(app: &TestApp) -> Arc<OverstaySweep> {
    Arc::new(OverstaySweep::new(
        Arc::clone(&app.booking_repo),
        Arc::clone(&app.slot_repo),
        Arc::clone(&app.request_repo),
        app.violations.clone(),
        app.policy.clone(),
    ))
}

#[tokio::test]
async fn first_cycle_runs_immediately() {
    let app = TestApp::new().await;
    let user = app.create_user("sleeper", 10_000.0).await;
    app.approved_request(&user, "KA-10-AA-1010", VehicleType::TwoWheeler)
        .await;

    let slot = app
        .allocator
        .find_available(VehicleType::TwoWheeler, None)
        .await
        .unwrap()
        .unwrap();
    let now = now_millis();
    let booking = app
        .bookings
        .create_booking(&CreateBooking {
            user_id: user.id,
            slot_id: slot.id,
            expected_entry_time: now,
            expected_exit_time: now + 60 * MILLIS_PER_MINUTE,
            vehicle_type: VehicleType::TwoWheeler,
        })
        .await
        .unwrap();
    app.bookings
        .record_entry(booking.id, now - 13 * 60 * MILLIS_PER_MINUTE)
        .await
        .unwrap();

    // A long interval: only the immediate first tick can do the work.
    let mut handle = SweeperHandle::new();
    handle.start(sweep(&app), Duration::from_secs(3_600));

    // Give the spawned task a moment to run its first cycle.
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if app.bookings.get(booking.id).await.unwrap().status == BookingStatus::Completed {
            break;
        }
    }

    assert_eq!(
        app.bookings.get(booking.id).await.unwrap().status,
        BookingStatus::Completed
    );
    handle.stop().await;
}

#[tokio::test]
async fn start_is_a_no_op_while_running_and_stop_clears_the_handle() {
    let app = TestApp::new().await;
    let sweep = sweep(&app);

    let mut handle = SweeperHandle::new();
    assert!(!handle.is_running());

    handle.start(Arc::clone(&sweep), Duration::from_secs(3_600));
    assert!(handle.is_running());

    // Second start does not replace the running task.
    handle.start(Arc::clone(&sweep), Duration::from_secs(1));
    assert!(handle.is_running());

    handle.stop().await;
    assert!(!handle.is_running());

    // Stopping again is harmless, and the handle is restartable.
    handle.stop().await;
    handle.start(sweep, Duration::from_secs(3_600));
    assert!(handle.is_running());
    handle.stop().await;
    assert!(!handle.is_running());
}
