//! Overstay sweep: force-completion, violation emission, the
//! vehicle-number precondition, and the race against manual exit.

mod common;

use std::sync::Arc;

use common::TestApp;
use parkhub_core::error::ErrorKind;
use parkhub_core::types::time::{now_millis, MILLIS_PER_MINUTE};
use parkhub_entity::booking::{Booking, BookingStatus, CreateBooking};
use parkhub_entity::user::User;
use parkhub_entity::vehicle::VehicleType;
use parkhub_worker::OverstaySweep;

fn sweep(app: &TestApp) -> OverstaySweep {
    OverstaySweep::new(
        Arc::clone(&app.booking_repo),
        Arc::clone(&app.slot_repo),
        Arc::clone(&app.request_repo),
        app.violations.clone(),
        app.policy.clone(),
    )
}

/// Create a booking and record an entry `minutes_ago` in the past.
async fn entered_booking(app: &TestApp, user: &User, minutes_ago: i64) -> Booking {
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
            expected_exit_time: now + 120 * MILLIS_PER_MINUTE,
            vehicle_type: VehicleType::TwoWheeler,
        })
        .await
        .unwrap();

    app.bookings
        .record_entry(booking.id, now - minutes_ago * MILLIS_PER_MINUTE)
        .await
        .unwrap();

    app.bookings.get(booking.id).await.unwrap()
}

#[tokio::test]
async fn overstayed_booking_is_released_with_violation_and_debit() {
    let app = TestApp::new().await;
    let user = app.create_user("sleeper", 20_000.0).await;
    app.approved_request(&user, "KA-05-HZ-4821", VehicleType::TwoWheeler)
        .await;

    // Entered 13 hours ago, one hour past the limit.
    let booking = entered_booking(&app, &user, 13 * 60).await;

    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.released, 1);
    assert_eq!(report.violations, 1);
    assert_eq!(report.failed, 0);

    let reloaded = app.bookings.get(booking.id).await.unwrap();
    assert_eq!(reloaded.status, BookingStatus::Completed);
    assert!(reloaded.exit_time > 0);
    assert!(reloaded.duration > app.policy.max_duration_minutes);
    assert!(app.slot_available(booking.slot_id).await);

    let violations = app.violations.list_by_user(user.id).await.unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].violation_type, "overstay");
    assert_eq!(violations[0].penalty_amount, 500.0);
    assert_eq!(violations[0].vehicle_number, "KA-05-HZ-4821");
    assert!(violations[0].description.contains("13 hours"));

    // Penalty debited exactly once.
    let reloaded_user = app.users.get(user.id).await.unwrap();
    assert_eq!(reloaded_user.salary, 19_500.0);
}

#[tokio::test]
async fn overstay_without_registration_releases_slot_but_skips_violation() {
    let app = TestApp::new().await;
    let user = app.create_user("anonymous", 1_000.0).await;
    // No approved request: no vehicle number resolvable.

    let booking = entered_booking(&app, &user, 13 * 60).await;

    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.released, 1);
    assert_eq!(report.violations, 0);

    let reloaded = app.bookings.get(booking.id).await.unwrap();
    assert_eq!(reloaded.status, BookingStatus::Completed);
    assert!(app.slot_available(booking.slot_id).await);

    assert!(app.violations.list_by_user(user.id).await.unwrap().is_empty());
    assert_eq!(app.users.get(user.id).await.unwrap().salary, 1_000.0);
}

#[tokio::test]
async fn bookings_within_limit_are_untouched() {
    let app = TestApp::new().await;
    let user = app.create_user("prompt", 0.0).await;
    app.approved_request(&user, "KA-03-XY-1111", VehicleType::TwoWheeler)
        .await;

    // Entered 11 hours ago: inside the 12-hour limit.
    let booking = entered_booking(&app, &user, 11 * 60).await;

    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.released, 0);

    let reloaded = app.bookings.get(booking.id).await.unwrap();
    assert_eq!(reloaded.status, BookingStatus::Active);
    assert!(!app.slot_available(booking.slot_id).await);
}

#[tokio::test]
async fn booking_exactly_at_limit_is_not_swept() {
    let app = TestApp::new().await;
    let user = app.create_user("edge", 0.0).await;

    // Exactly 720 minutes: the policy requires strictly greater.
    let booking = entered_booking(&app, &user, app.policy.max_duration_minutes).await;

    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.released, 0);
    assert_eq!(
        app.bookings.get(booking.id).await.unwrap().status,
        BookingStatus::Active
    );
}

#[tokio::test]
async fn manual_exit_before_sweep_wins_without_double_processing() {
    let app = TestApp::new().await;
    let user = app.create_user("racer", 5_000.0).await;
    app.approved_request(&user, "KA-02-QQ-7777", VehicleType::TwoWheeler)
        .await;

    let booking = entered_booking(&app, &user, 13 * 60).await;

    // Manual exit lands first.
    let duration = app
        .bookings
        .record_exit(booking.id, now_millis())
        .await
        .unwrap();
    assert!(duration > app.policy.max_duration_minutes);

    // The sweep sees no active bookings left; nothing is double-released
    // and no violation is recorded for the already-completed stay.
    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.scanned, 0);
    assert!(app.violations.list_by_user(user.id).await.unwrap().is_empty());
    assert_eq!(app.users.get(user.id).await.unwrap().salary, 5_000.0);
}

#[tokio::test]
async fn swept_booking_rejects_late_manual_exit() {
    let app = TestApp::new().await;
    let user = app.create_user("tardy", 5_000.0).await;
    app.approved_request(&user, "KA-09-LM-3456", VehicleType::TwoWheeler)
        .await;

    let booking = entered_booking(&app, &user, 13 * 60).await;

    let report = sweep(&app).run_once().await.unwrap();
    assert_eq!(report.released, 1);
    assert_eq!(report.violations, 1);

    // The booking left the active state; the late exit is a clean
    // conflict and does not release the slot a second time.
    let err = app
        .bookings
        .record_exit(booking.id, now_millis())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    // Exactly one violation and one debit.
    assert_eq!(app.violations.list_by_user(user.id).await.unwrap().len(), 1);
    assert_eq!(app.users.get(user.id).await.unwrap().salary, 4_500.0);
}
