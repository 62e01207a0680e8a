//! User Model

use serde::{Deserialize, Serialize};

/// Account role, fixed at registration (no role-change operation)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Customer,
    Admin,
    DeliveryPartner,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
            Role::DeliveryPartner => write!(f, "delivery-partner"),
        }
    }
}

/// Registered account
///
/// `password_hash` is an argon2 PHC string and never crosses the API
/// boundary; handlers return [`PublicUser`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique, used as the login identifier
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
    /// Delivery partners only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    /// Creation timestamp (UTC millis)
    pub created_at: i64,
}

/// User view with the credential stripped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    pub created_at: i64,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            vehicle_number: user.vehicle_number.clone(),
            created_at: user.created_at,
        }
    }
}
