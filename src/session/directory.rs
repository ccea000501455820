//! Credential checks and the operator list.

use super::{Permission, Role, Session, UserRecord};
use crate::error::{AuthErrorKind, CertError, Result};

/// Minimum password length when creating an admin account.
const ADMIN_MIN_PASSWORD_LEN: usize = 6;

/// Password rules applied at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPolicy {
    /// Shared admin password
    pub admin_password: String,
    /// Minimum length accepted for uploader passwords
    pub min_password_len: usize,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            admin_password: "1234".to_string(),
            min_password_len: 4,
        }
    }
}

/// Operators shipped with a fresh installation.
#[must_use]
pub fn seed_users() -> Vec<UserRecord> {
    [
        ("admin", Role::Admin),
        ("dhivya", Role::Admin),
        ("irsath", Role::Admin),
        ("kathir", Role::Viewer),
        ("akshyaa", Role::Uploader),
        ("akshayaa", Role::Viewer),
    ]
    .into_iter()
    .map(|(name, role)| UserRecord::new(name, role))
    .collect()
}

/// The set of known operators plus the login policy.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
    policy: LoginPolicy,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(seed_users(), LoginPolicy::default())
    }
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>, policy: LoginPolicy) -> Self {
        Self { users, policy }
    }

    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    #[must_use]
    pub fn policy(&self) -> &LoginPolicy {
        &self.policy
    }

    fn position(&self, username: &str) -> Option<usize> {
        let wanted = username.trim().to_lowercase();
        self.users
            .iter()
            .position(|u| u.username.to_lowercase() == wanted)
    }

    /// Check credentials and open a session.
    ///
    /// Usernames are matched case-insensitively. Admins must present the
    /// shared admin password; uploaders any password of at least
    /// `min_password_len` characters. Viewers cannot log in.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let invalid = || {
            CertError::auth(
                format!("login as '{}'", username.trim()),
                AuthErrorKind::InvalidCredentials,
            )
        };

        let index = self.position(username).ok_or_else(invalid)?;
        let user = &mut self.users[index];
        let accepted = match user.role {
            Role::Admin => password == self.policy.admin_password,
            Role::Uploader => password.chars().count() >= self.policy.min_password_len,
            Role::Viewer => false,
        };
        if !accepted {
            tracing::warn!("Rejected login for '{}'", user.username);
            return Err(invalid());
        }

        user.login_count = user.login_count.saturating_add(1);
        tracing::info!("User '{}' logged in as {}", user.username, user.role);
        Ok(Session::new(user.username.clone(), user.role))
    }

    /// Add an operator. Admin only.
    pub fn add_user(
        &mut self,
        session: &Session,
        username: &str,
        role: Role,
        password: &str,
    ) -> Result<()> {
        session.require(Permission::ManageUsers)?;

        let username = username.trim();
        if username.is_empty() {
            return Err(CertError::auth(
                "adding user",
                AuthErrorKind::UnknownUser(String::new()),
            ));
        }
        if self.position(username).is_some() {
            return Err(CertError::auth(
                "adding user",
                AuthErrorKind::DuplicateUser(username.to_string()),
            ));
        }
        let min = if role == Role::Admin {
            ADMIN_MIN_PASSWORD_LEN
        } else {
            self.policy.min_password_len
        };
        if password.chars().count() < min {
            return Err(CertError::auth(
                format!("password must be at least {min} characters"),
                AuthErrorKind::InvalidCredentials,
            ));
        }

        self.users.push(UserRecord::new(username, role));
        tracing::info!("User '{}' added with role {} by {}", username, role, session.username());
        Ok(())
    }

    /// Remove an operator. Admin only; an admin cannot remove themselves.
    pub fn remove_user(&mut self, session: &Session, username: &str) -> Result<UserRecord> {
        session.require(Permission::ManageUsers)?;

        let index = self.position(username).ok_or_else(|| {
            CertError::auth(
                "removing user",
                AuthErrorKind::UnknownUser(username.to_string()),
            )
        })?;
        if self.users[index]
            .username
            .eq_ignore_ascii_case(session.username())
        {
            return Err(CertError::auth(
                "removing user",
                AuthErrorKind::Forbidden {
                    role: session.role().to_string(),
                    action: "remove themselves".to_string(),
                },
            ));
        }

        let removed = self.users.remove(index);
        tracing::info!("User '{}' removed by {}", removed.username, session.username());
        Ok(removed)
    }
}
