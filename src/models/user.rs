use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role of a user inside the CRM. Each user carries exactly one role;
/// permissions are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
    Owner,
}

impl UserRole {
    /// Permission set granted by this role
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            UserRole::Admin => &[
                "restaurants:read",
                "restaurants:write",
                "contacts:read",
                "contacts:write",
                "orders:read",
                "orders:write",
                "metrics:read",
                "metrics:write",
            ],
            UserRole::Manager => &[
                "restaurants:read",
                "restaurants:write",
                "contacts:read",
                "contacts:write",
                "orders:read",
                "orders:write",
                "metrics:read",
            ],
            UserRole::Staff => &[
                "restaurants:read",
                "contacts:read",
                "orders:read",
                "orders:write",
            ],
            UserRole::Owner => &["restaurants:read", "orders:read", "metrics:read"],
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Staff => "Staff",
            UserRole::Owner => "Owner",
        };
        write!(f, "{}", name)
    }
}

/// A staff contact. The email doubles as the login identifier, so it is
/// unique across the table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub hashed_password: String,
    pub restaurant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn permissions(&self) -> &'static [&'static str] {
        self.role.permissions()
    }
}
