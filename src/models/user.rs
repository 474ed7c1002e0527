//! User model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{account_status, roles};

use super::ParseEnumError;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account may sign in
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// The principal this user acts as once authenticated
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            status: self.status,
        }
    }
}

/// The authenticated actor behind a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl Principal {
    pub fn is_disabled(&self) -> bool {
        self.status == AccountStatus::Disabled
    }
}

/// User roles, lowest privilege first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Paid,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => roles::VIEWER,
            Self::Paid => roles::PAID,
            Self::Editor => roles::EDITOR,
            Self::Admin => roles::ADMIN,
        }
    }

    /// Position on the tiered-access hierarchy
    pub fn rank(&self) -> u8 {
        rank_of(self.as_str())
    }
}

/// Look up a role name in the rank table. Unknown names rank 0.
pub fn rank_of(role: &str) -> u8 {
    roles::RANKS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            roles::VIEWER => Ok(Self::Viewer),
            roles::PAID => Ok(Self::Paid),
            roles::EDITOR => Ok(Self::Editor),
            roles::ADMIN => Ok(Self::Admin),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Disabled,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => account_status::ACTIVE,
            Self::Disabled => account_status::DISABLED,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            account_status::ACTIVE => Ok(Self::Active),
            account_status::DISABLED => Ok(Self::Disabled),
            other => Err(ParseEnumError::new("status", other)),
        }
    }
}

impl TryFrom<String> for AccountStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_name() {
        for name in roles::ALL {
            let role: Role = name.parse().unwrap();
            assert_eq!(role.as_str(), *name);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_rank_table() {
        assert_eq!(Role::Viewer.rank(), 1);
        assert_eq!(Role::Paid.rank(), 2);
        assert_eq!(Role::Editor.rank(), 3);
        assert_eq!(Role::Admin.rank(), 4);
        assert_eq!(rank_of("moderator"), 0);
        assert_eq!(rank_of(""), 0);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"editor\"");
        let role: Role = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(role, Role::Paid);
    }

    #[test]
    fn test_account_status_parse() {
        assert_eq!("active".parse::<AccountStatus>().unwrap(), AccountStatus::Active);
        assert_eq!("disabled".parse::<AccountStatus>().unwrap(), AccountStatus::Disabled);
        let err = "banned".parse::<AccountStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid status: 'banned'");
    }
}
