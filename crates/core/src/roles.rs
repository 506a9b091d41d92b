//! User roles and account statuses.
//!
//! Both are closed enums stored as lowercase strings in the `users` table
//! (CHECK-constrained in the migrations). Capability checks live here so the
//! authorization rules are in one place instead of scattered string
//! comparisons in handlers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Well-known role name constants. These must match the CHECK constraint in
/// the `users` migration.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COORDINATOR: &str = "coordinator";
pub const ROLE_TRAINER: &str = "trainer";
pub const ROLE_TRAINEE: &str = "trainee";

/// A user's role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Coordinator,
    Trainer,
    Trainee,
}

impl UserRole {
    /// The lowercase string form stored in the database and JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Coordinator => ROLE_COORDINATOR,
            UserRole::Trainer => ROLE_TRAINER,
            UserRole::Trainee => ROLE_TRAINEE,
        }
    }

    /// Admins manage user accounts (create, ban, deactivate, reactivate).
    pub fn can_manage_users(self) -> bool {
        self == UserRole::Admin
    }

    /// Coordinators (and admins) own sessions: create, archive, and decide
    /// on registrations.
    pub fn can_coordinate_sessions(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Coordinator)
    }

    /// Trainers and coordinators author course content.
    pub fn can_create_courses(self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::Coordinator | UserRole::Trainer
        )
    }

    /// Only trainees register themselves for sessions.
    pub fn can_register(self) -> bool {
        self == UserRole::Trainee
    }

    /// Trainers and coordinators mark attendance for a session.
    pub fn can_mark_attendance(self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::Coordinator | UserRole::Trainer
        )
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_COORDINATOR => Ok(UserRole::Coordinator),
            ROLE_TRAINER => Ok(UserRole::Trainer),
            ROLE_TRAINEE => Ok(UserRole::Trainee),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account's standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Banned,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Banned => "banned",
        }
    }

    /// Only active accounts may log in or act.
    pub fn can_authenticate(self) -> bool {
        self == UserStatus::Active
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "banned" => Ok(UserStatus::Banned),
            other => Err(format!("Unknown status '{other}'")),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
