use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Capability tag controlling which area of the application is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Shop,
}

impl UserRole {
    /// Legacy role heuristic carried over from the original deployment: an
    /// account whose email contains "admin" is an admin, everything else is a
    /// shop account. Applied once at registration; the stored column is the
    /// source of truth afterwards.
    pub fn derive_from_email(email: &str) -> Self {
        if email.contains("admin") {
            UserRole::Admin
        } else {
            UserRole::Shop
        }
    }

    /// Landing route for the role, used by the routing guards.
    pub fn home_path(self) -> &'static str {
        match self {
            UserRole::Admin => "/admin",
            UserRole::Shop => "/shop",
        }
    }
}

/// A user row as stored in the database.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: UserRole,
    pub shop_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "The email address is invalid."))]
    pub email: String,
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "The email address is invalid."))]
    pub email: String,
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub role: UserRole,
}

/// Claims carried inside the JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_substring_yields_admin_role() {
        assert_eq!(
            UserRole::derive_from_email("admin@textile.com"),
            UserRole::Admin
        );
        assert_eq!(
            UserRole::derive_from_email("shopadmin2@textile.com"),
            UserRole::Admin
        );
    }

    #[test]
    fn other_emails_yield_shop_role() {
        assert_eq!(
            UserRole::derive_from_email("shop@textile.com"),
            UserRole::Shop
        );
        assert_eq!(UserRole::derive_from_email(""), UserRole::Shop);
    }

    #[test]
    fn home_path_matches_role() {
        assert_eq!(UserRole::Admin.home_path(), "/admin");
        assert_eq!(UserRole::Shop.home_path(), "/shop");
    }
}
