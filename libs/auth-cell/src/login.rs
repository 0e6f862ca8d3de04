use serde::{Deserialize, Serialize};
use tracing::debug;

use shared_models::auth::{Role, Session};
use shared_models::error::AppError;

/// Dashboard each role lands on after signing in.
pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin-dashboard.html",
        Role::Doctor => "doctor-dashboard.html",
        Role::Patient => "patient-dashboard.html",
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub role: Role,
    pub location: &'static str,
}

impl LoginForm {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }

    /// Role buttons behave like a radio group; the last one picked wins.
    pub fn select_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Credentials are checked by the backend; this only decides where the
    /// browser goes next.
    pub fn submit(&self) -> Result<LoginRedirect, AppError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::ValidationError("Please fill in all fields".to_string()));
        }

        let location = landing_page(self.role);
        debug!("Redirecting {} to {}", self.role, location);

        Ok(LoginRedirect {
            role: self.role,
            location,
        })
    }
}

impl LoginRedirect {
    pub fn session(&self, user_id: Option<i64>) -> Session {
        Session {
            user_id,
            role: self.role,
        }
    }
}
