//! Shared test harness: an in-memory database with migrations applied,
//! the default inventory seeded, and every service wired up.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::SqlitePool;

use parkhub_core::config::{DatabaseConfig, ParkingConfig};
use parkhub_core::types::SlotId;
use parkhub_database::repositories::{
    BookingRepository, GuestPassRepository, RequestRepository, SlotRepository, UserRepository,
    ViolationRepository,
};
use parkhub_database::DatabasePool;
use parkhub_entity::request::{CreateRequest, ParkingRequest};
use parkhub_entity::user::{CreateUser, User, UserRole};
use parkhub_entity::vehicle::VehicleType;
use parkhub_service::{
    BookingService, GuestPassService, LogNotifier, RegistrationService, SlotAllocator,
    UserService, VehicleLookup, ViolationService,
};

/// Test application context.
pub struct TestApp {
    /// Database pool for direct queries.
    pub pool: SqlitePool,
    /// Parking policy in effect.
    pub policy: ParkingConfig,

    pub slot_repo: Arc<SlotRepository>,
    pub booking_repo: Arc<BookingRepository>,
    pub request_repo: Arc<RequestRepository>,
    pub violation_repo: Arc<ViolationRepository>,
    pub pass_repo: Arc<GuestPassRepository>,
    pub user_repo: Arc<UserRepository>,

    pub allocator: SlotAllocator,
    pub bookings: BookingService,
    pub passes: GuestPassService,
    pub violations: ViolationService,
    pub registrations: RegistrationService,
    pub users: UserService,
    pub lookup: VehicleLookup,
}

impl TestApp {
    /// Create a fresh application over an in-memory database with the
    /// default 18-slot inventory.
    pub async fn new() -> Self {
        let db = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        let pool = db.into_pool();

        parkhub_database::migration::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        parkhub_database::seed::ensure_default_inventory(&pool)
            .await
            .expect("Failed to seed inventory");

        let policy = ParkingConfig::default();

        let slot_repo = Arc::new(SlotRepository::new(pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(pool.clone()));
        let request_repo = Arc::new(RequestRepository::new(pool.clone()));
        let violation_repo = Arc::new(ViolationRepository::new(pool.clone()));
        let pass_repo = Arc::new(GuestPassRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));

        let notifier = Arc::new(LogNotifier);

        let allocator = SlotAllocator::new(Arc::clone(&slot_repo));
        let bookings = BookingService::new(
            Arc::clone(&booking_repo),
            Arc::clone(&slot_repo),
            policy.clone(),
            notifier.clone(),
        );
        let passes = GuestPassService::new(
            Arc::clone(&pass_repo),
            Arc::clone(&slot_repo),
            Arc::clone(&request_repo),
            policy.clone(),
            notifier,
        );
        let violations = ViolationService::new(Arc::clone(&violation_repo), policy.clone());
        let registrations = RegistrationService::new(Arc::clone(&request_repo));
        let users = UserService::new(Arc::clone(&user_repo));
        let lookup = VehicleLookup::new(
            Arc::clone(&request_repo),
            Arc::clone(&booking_repo),
            Arc::clone(&violation_repo),
            Arc::clone(&pass_repo),
        );

        Self {
            pool,
            policy,
            slot_repo,
            booking_repo,
            request_repo,
            violation_repo,
            pass_repo,
            user_repo,
            allocator,
            bookings,
            passes,
            violations,
            registrations,
            users,
            lookup,
        }
    }

    /// Register a user account with the given starting balance.
    pub async fn create_user(&self, username: &str, salary: f64) -> User {
        self.users
            .register(&CreateUser {
                username: username.to_string(),
                password: "secret".to_string(),
                role: UserRole::User,
                name: format!("Test {username}"),
                email: format!("{username}@campus.edu"),
                salary,
            })
            .await
            .expect("Failed to register user")
    }

    /// Submit and approve a registration request for the user's vehicle.
    pub async fn approved_request(
        &self,
        user: &User,
        vehicle_number: &str,
        vehicle_type: VehicleType,
    ) -> ParkingRequest {
        let request = self
            .registrations
            .submit(&CreateRequest {
                user_id: user.id,
                vehicle_number: vehicle_number.to_string(),
                vehicle_type,
                cv_book_path: "docs/cv.jpg".to_string(),
                rc_book_path: "docs/rc.jpg".to_string(),
                driver_license_path: "docs/license.jpg".to_string(),
                has_helmet: vehicle_type == VehicleType::TwoWheeler,
                has_seat_belt: vehicle_type == VehicleType::FourWheeler,
            })
            .await
            .expect("Failed to submit request");

        self.registrations
            .approve(request.id)
            .await
            .expect("Failed to approve request");

        self.registrations
            .get(request.id)
            .await
            .expect("Failed to reload request")
    }

    /// Current availability flag of a slot, read straight from the store.
    pub async fn slot_available(&self, slot_id: SlotId) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT is_available FROM parking_slots WHERE id = ?")
            .bind(slot_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read slot availability")
    }

    /// Mark every allocatable slot of a type unavailable except `keep`,
    /// used by last-slot contention tests.
    pub async fn exhaust_slots_except(&self, vehicle_type: VehicleType, keep: SlotId) {
        sqlx::query(
            "UPDATE parking_slots SET is_available = 0 \
             WHERE vehicle_type = ? AND is_reserved = 0 AND id != ?",
        )
        .bind(vehicle_type)
        .bind(keep)
        .execute(&self.pool)
        .await
        .expect("Failed to exhaust slots");
    }
}
