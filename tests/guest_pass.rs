//! Guest passes: issuance rules, deactivation idempotence, lazy expiry,
//! and last-slot contention.

mod common;

use std::sync::Arc;

use common::TestApp;
use parkhub_core::error::ErrorKind;
use parkhub_entity::vehicle::VehicleType;
use parkhub_worker::pass_expiry::PassExpirySweep;

#[tokio::test]
async fn issue_allocates_slot_and_sets_validity_window() {
    let app = TestApp::new().await;

    let pass = app
        .passes
        .issue("KA-21-GH-9012", VehicleType::TwoWheeler, "9876543210", None)
        .await
        .unwrap();

    assert!(pass.is_active);
    assert_eq!(pass.pass_code.len(), 6);
    assert!(pass
        .pass_code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert_eq!(
        pass.expiry_time - pass.issue_time,
        app.policy.pass_validity_hours * 3_600_000
    );
    assert!(!app.slot_available(pass.slot_id).await);

    let found = app
        .passes
        .find_active_by_vehicle("KA-21-GH-9012")
        .await
        .unwrap()
        .expect("freshly issued pass is valid");
    assert_eq!(found.id, pass.id);
}

#[tokio::test]
async fn registered_vehicle_cannot_get_a_pass() {
    let app = TestApp::new().await;
    let user = app.create_user("owner", 0.0).await;
    app.approved_request(&user, "KA-11-AA-2222", VehicleType::TwoWheeler)
        .await;

    let err = app
        .passes
        .issue("KA-11-AA-2222", VehicleType::TwoWheeler, "9876543210", None)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn duplicate_active_pass_is_rejected() {
    let app = TestApp::new().await;

    app.passes
        .issue("KA-31-BB-3333", VehicleType::TwoWheeler, "9000000001", None)
        .await
        .unwrap();

    let err = app
        .passes
        .issue("KA-31-BB-3333", VehicleType::TwoWheeler, "9000000001", None)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn issuance_fails_with_capacity_when_no_slot_fits() {
    let app = TestApp::new().await;

    sqlx::query("UPDATE parking_slots SET is_available = 0 WHERE vehicle_type = '4-wheeler'")
        .execute(&app.pool)
        .await
        .unwrap();

    let err = app
        .passes
        .issue("KA-41-CC-4444", VehicleType::FourWheeler, "9000000002", None)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Capacity));
}

#[tokio::test]
async fn deactivate_twice_is_a_safe_no_op() {
    let app = TestApp::new().await;

    let pass = app
        .passes
        .issue("KA-51-DD-5555", VehicleType::TwoWheeler, "9000000003", None)
        .await
        .unwrap();

    app.passes.deactivate(pass.id).await.unwrap();
    assert!(app.slot_available(pass.slot_id).await);

    // Second call: same end state, no error.
    app.passes.deactivate(pass.id).await.unwrap();

    let reloaded = app.pass_repo.find_by_id(pass.id).await.unwrap().unwrap();
    assert!(!reloaded.is_active);
    assert!(app.slot_available(pass.slot_id).await);
}

#[tokio::test]
async fn expired_pass_is_invisible_to_lookup_but_not_deactivated() {
    let app = TestApp::new().await;

    let pass = app
        .passes
        .issue("KA-61-EE-6666", VehicleType::TwoWheeler, "9000000004", None)
        .await
        .unwrap();

    sqlx::query("UPDATE guest_passes SET expiry_time = 1 WHERE id = ?")
        .bind(pass.id)
        .execute(&app.pool)
        .await
        .unwrap();

    // Lazy expiry: lookup treats it as inactive...
    assert!(app
        .passes
        .find_active_by_vehicle("KA-61-EE-6666")
        .await
        .unwrap()
        .is_none());

    // ...but the row keeps its flag and the slot stays held.
    let reloaded = app.pass_repo.find_by_id(pass.id).await.unwrap().unwrap();
    assert!(reloaded.is_active);
    assert!(!app.slot_available(pass.slot_id).await);
}

#[tokio::test]
async fn expiry_sweep_releases_expired_passes() {
    let app = TestApp::new().await;

    let pass = app
        .passes
        .issue("KA-71-FF-7777", VehicleType::TwoWheeler, "9000000005", None)
        .await
        .unwrap();

    sqlx::query("UPDATE guest_passes SET expiry_time = 1 WHERE id = ?")
        .bind(pass.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let released = PassExpirySweep::new(Arc::clone(&app.pass_repo))
        .run_once()
        .await
        .unwrap();
    assert_eq!(released, 1);

    let reloaded = app.pass_repo.find_by_id(pass.id).await.unwrap().unwrap();
    assert!(!reloaded.is_active);
    assert!(app.slot_available(pass.slot_id).await);
}

#[tokio::test]
async fn last_slot_contention_admits_exactly_one_winner() {
    let app = TestApp::new().await;

    let last = app
        .allocator
        .find_available(VehicleType::FourWheeler, None)
        .await
        .unwrap()
        .unwrap();
    app.exhaust_slots_except(VehicleType::FourWheeler, last.id).await;

    let passes_a = app.passes.clone();
    let passes_b = app.passes.clone();

    let (a, b) = tokio::join!(
        tokio::spawn(async move {
            passes_a
                .issue("KA-81-GG-8888", VehicleType::FourWheeler, "9000000006", None)
                .await
        }),
        tokio::spawn(async move {
            passes_b
                .issue("KA-91-HH-9999", VehicleType::FourWheeler, "9000000007", None)
                .await
        }),
    );

    let results = [a.unwrap(), b.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let loser = results
        .iter()
        .find(|r| r.is_err())
        .unwrap()
        .as_ref()
        .unwrap_err();
    assert!(loser.is(ErrorKind::Capacity));

    assert!(!app.slot_available(last.id).await);
}
