use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::models::user::NewUser;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose `something@something.something` check.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let no_space = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
    match domain.rsplit_once('.') {
        Some((host, tld)) => no_space(local) && no_space(host) && no_space(tld),
        None => false,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !looks_like_email(email) {
            errors.add("email", "Invalid email format");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }

        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }

        errors.into_result()
    }

    pub fn to_new_user(&self) -> Result<NewUser, ValidationErrors> {
        self.validate()?;
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
