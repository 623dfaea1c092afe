use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tracing::info;

use crate::auth::password::hash_password;
use crate::model::certification_request::{CertificationRequest, Status};
use crate::model::role::Role;

/// Server-side user record. Only ever read after seeding.
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Authoritative, volatile state. Users are a fixed seed; requests live
/// behind an RwLock for the lifetime of the process.
pub struct AppStore {
    users: Vec<StoredUser>,
    requests: RwLock<Vec<CertificationRequest>>,
    last_id: AtomicI64,
}

impl AppStore {
    pub fn new(users: Vec<StoredUser>, requests: Vec<CertificationRequest>) -> Self {
        let last_id = requests.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            users,
            requests: RwLock::new(requests),
            last_id: AtomicI64::new(last_id),
        }
    }

    /// Demo data set served until the process exits.
    pub fn seeded() -> Self {
        let users = vec![
            StoredUser {
                id: 1,
                username: "alice".into(),
                password_hash: hash_password("password123"),
                role: Role::Employee,
            },
            StoredUser {
                id: 2,
                username: "bob".into(),
                password_hash: hash_password("password123"),
                role: Role::Employee,
            },
            StoredUser {
                id: 3,
                username: "carol".into(),
                password_hash: hash_password("password123"),
                role: Role::Supervisor,
            },
        ];

        let requests = vec![
            CertificationRequest {
                id: 1_726_000_000_000,
                employee_id: 1,
                employee_name: "Alice".into(),
                description: "AWS Solutions Architect Associate".into(),
                estimated_budget: 300.0,
                expected_date: "2026-10-15".parse().expect("seed date"),
                status: Status::Submitted,
            },
            CertificationRequest {
                id: 1_726_000_000_001,
                employee_id: 2,
                employee_name: "Bob".into(),
                description: "Certified Kubernetes Administrator".into(),
                estimated_budget: 395.0,
                expected_date: "2026-11-01".parse().expect("seed date"),
                status: Status::Approved,
            },
            CertificationRequest {
                id: 1_726_000_000_002,
                employee_id: 1,
                employee_name: "Alice".into(),
                description: "Terraform Associate".into(),
                estimated_budget: 70.5,
                expected_date: "2026-09-20".parse().expect("seed date"),
                status: Status::Draft,
            },
        ];

        info!(
            users = users.len(),
            requests = requests.len(),
            "Seeded in-memory store"
        );
        Self::new(users, requests)
    }

    pub fn find_user(&self, username: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Full snapshot of the request collection.
    pub fn list(&self) -> Vec<CertificationRequest> {
        self.requests.read().expect("requests lock poisoned").clone()
    }

    pub fn insert(&self, mut request: CertificationRequest) -> CertificationRequest {
        request.id = self.allocate_id();
        let mut requests = self.requests.write().expect("requests lock poisoned");
        requests.push(request.clone());
        request
    }

    /// Replaces the status of the matching record. None if the id is unknown.
    pub fn set_status(&self, id: i64, status: Status) -> Option<CertificationRequest> {
        let mut requests = self.requests.write().expect("requests lock poisoned");
        let request = requests.iter_mut().find(|r| r.id == id)?;
        request.status = status;
        Some(request.clone())
    }

    /// Epoch-millis based ids, strictly increasing even when several creates
    /// land in the same millisecond.
    fn allocate_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(prev.max(now - 1) + 1)
            })
            .expect("fetch_update closure always returns Some");
        prev.max(now - 1) + 1
    }
}
