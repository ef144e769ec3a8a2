//! User accounts: registration uniqueness and login.

mod common;

use common::TestApp;
use parkhub_core::error::ErrorKind;
use parkhub_entity::user::{CreateUser, UserRole};

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = TestApp::new().await;
    app.create_user("ravi", 25_000.0).await;

    let err = app
        .users
        .register(&CreateUser {
            username: "ravi".to_string(),
            password: "other".to_string(),
            role: UserRole::User,
            name: "Ravi Again".to_string(),
            email: "ravi2@campus.edu".to_string(),
            salary: 0.0,
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn authenticate_matches_exact_credentials() {
    let app = TestApp::new().await;
    let user = app.create_user("meera", 0.0).await;

    let found = app
        .users
        .authenticate("meera", "secret")
        .await
        .unwrap()
        .expect("credentials match");
    assert_eq!(found.id, user.id);
    assert_eq!(found.role, UserRole::User);

    assert!(app
        .users
        .authenticate("meera", "wrong")
        .await
        .unwrap()
        .is_none());
    assert!(app
        .users
        .authenticate("nobody", "secret")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn empty_fields_fail_validation() {
    let app = TestApp::new().await;

    let err = app
        .users
        .register(&CreateUser {
            username: "  ".to_string(),
            password: "secret".to_string(),
            role: UserRole::User,
            name: "Blank".to_string(),
            email: "blank@campus.edu".to_string(),
            salary: 0.0,
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}
