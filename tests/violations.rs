//! Violation ledger: atomic debit-on-record, the balance floor flag,
//! and status updates.

mod common;

use common::TestApp;
use parkhub_core::config::ParkingConfig;
use parkhub_core::error::ErrorKind;
use parkhub_core::types::time::now_millis;
use parkhub_core::types::UserId;
use parkhub_entity::violation::{CreateViolation, ViolationStatus};
use parkhub_service::ViolationService;

fn violation_for(user_id: UserId, penalty: f64) -> CreateViolation {
    CreateViolation {
        user_id,
        vehicle_number: "KA-01-AB-1234".to_string(),
        violation_type: "no_helmet".to_string(),
        penalty_amount: penalty,
        violation_date: now_millis(),
        description: "Rider without helmet at gate".to_string(),
    }
}

#[tokio::test]
async fn recording_debits_salary_atomically() {
    let app = TestApp::new().await;
    let user = app.create_user("offender", 30_000.0).await;

    let violation = app
        .violations
        .record(&violation_for(user.id, 500.0))
        .await
        .unwrap();

    assert_eq!(violation.status, ViolationStatus::Pending);
    assert_eq!(app.users.get(user.id).await.unwrap().salary, 29_500.0);

    // A second violation debits again; the balance may go negative.
    app.violations
        .record(&violation_for(user.id, 30_000.0))
        .await
        .unwrap();
    assert_eq!(app.users.get(user.id).await.unwrap().salary, -500.0);
}

#[tokio::test]
async fn missing_user_rolls_back_the_whole_record() {
    let app = TestApp::new().await;

    let err = app
        .violations
        .record(&violation_for(UserId::new(9_999), 500.0))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    // No orphan violation row survived the rollback.
    assert!(app.violations.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn balance_floor_flag_clamps_at_zero() {
    let app = TestApp::new().await;
    let user = app.create_user("lowbalance", 100.0).await;

    let clamped = ViolationService::new(
        std::sync::Arc::clone(&app.violation_repo),
        ParkingConfig {
            allow_negative_balance: false,
            ..ParkingConfig::default()
        },
    );

    clamped.record(&violation_for(user.id, 500.0)).await.unwrap();
    assert_eq!(app.users.get(user.id).await.unwrap().salary, 0.0);
}

#[tokio::test]
async fn status_is_the_only_mutable_field() {
    let app = TestApp::new().await;
    let user = app.create_user("disputer", 1_000.0).await;

    let violation = app
        .violations
        .record(&violation_for(user.id, 500.0))
        .await
        .unwrap();

    app.violations
        .update_status(violation.id, ViolationStatus::Disputed)
        .await
        .unwrap();

    let all = app.violations.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, ViolationStatus::Disputed);
    // Everything else is as recorded.
    assert_eq!(all[0].penalty_amount, 500.0);
    assert_eq!(all[0].violation_type, "no_helmet");
}

#[tokio::test]
async fn ledger_queries_return_storage_order() {
    let app = TestApp::new().await;
    let a = app.create_user("first", 10_000.0).await;
    let b = app.create_user("second", 10_000.0).await;

    app.violations.record(&violation_for(a.id, 100.0)).await.unwrap();
    app.violations.record(&violation_for(b.id, 200.0)).await.unwrap();
    app.violations.record(&violation_for(a.id, 300.0)).await.unwrap();

    let for_a = app.violations.list_by_user(a.id).await.unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a[0].id < for_a[1].id);

    let all = app.violations.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}
