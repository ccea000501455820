//! Operator sessions and role gating.
//!
//! There is no process-wide "current user". A [`UserDirectory`] checks
//! credentials and hands out a [`Session`], which callers pass explicitly to
//! every gated operation (registration, revocation, user management).

mod directory;

pub use directory::{LoginPolicy, UserDirectory, seed_users};

use crate::error::{AuthErrorKind, CertError, Result};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Operator role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Uploader,
    #[default]
    Viewer,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Uploader => "uploader",
            Self::Viewer => "viewer",
        }
    }

    /// Whether this role holds `permission`.
    #[must_use]
    pub const fn allows(&self, permission: Permission) -> bool {
        matches!(self, Self::Admin) || matches!(permission, Permission::Verify)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "uploader" => Ok(Self::Uploader),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Operations that may be restricted by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Image or ID verification (open to everyone)
    Verify,
    /// Register new certificates
    Register,
    /// Revoke or reinstate certificates
    Revoke,
    /// Add or remove operators
    ManageUsers,
}

impl Permission {
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Verify => "verify certificates",
            Self::Register => "register certificates",
            Self::Revoke => "change certificate status",
            Self::ManageUsers => "manage users",
        }
    }
}

/// A known operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserRecord {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub login_count: u32,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            login_count: 0,
        }
    }
}

/// An authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: Role,
    started_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Fail with [`AuthErrorKind::Forbidden`] unless the role holds `permission`.
    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.role.allows(permission) {
            Ok(())
        } else {
            Err(CertError::auth(
                format!("user '{}'", self.username),
                AuthErrorKind::Forbidden {
                    role: self.role.to_string(),
                    action: permission.action().to_string(),
                },
            ))
        }
    }
}
