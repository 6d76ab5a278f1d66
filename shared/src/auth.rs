//! Authentication vocabulary
//!
//! Staff accounts and customer accounts are disjoint identity spaces with
//! separate login routes, token audiences and credential stores. Staff
//! permissions are fully determined by role; the matrix lives here so both
//! sides agree on what each role can do.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Staff
// ============================================================================

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Chef,
    #[default]
    Waiter,
}

impl StaffRole {
    /// Wire string for this role, matching the serde rename
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Chef => "chef",
            StaffRole::Waiter => "waiter",
        }
    }

    /// Permission set for this role. Recomputed on every staff write where
    /// the role changed; never stored independently of the role.
    pub fn permissions(&self) -> Vec<String> {
        let perms: &[&str] = match self {
            StaffRole::Admin => &["all"],
            StaffRole::Chef => &[
                "orders:read",
                "orders:manage",
                "inventory:read",
                "inventory:manage",
                "menu:read",
            ],
            StaffRole::Waiter => &[
                "orders:read",
                "orders:manage",
                "reservations:read",
                "reservations:manage",
                "menu:read",
                "feedback:read",
            ],
        };
        perms.iter().map(|p| p.to_string()).collect()
    }
}

/// Staff login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffLoginRequest {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// Staff registration request (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStaffRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 200, message = "Display name is required"))]
    pub display_name: String,
    #[serde(default)]
    pub role: StaffRole,
}

// ============================================================================
// Customers
// ============================================================================

/// Customer signup request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 5, max = 20, message = "Valid phone number is required"))]
    pub phone: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Customer login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Authenticated principal as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    /// Username for staff, email for customers
    pub username: String,
    pub display_name: String,
    /// `staff` or `customer`
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Login response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}
