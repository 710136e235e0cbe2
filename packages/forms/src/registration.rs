//! Account registration: email, password and confirmation.

use std::fmt;

use serde::Serialize;

use crate::error::FormError;
use crate::field::Field;
use crate::password::{validate_password, PasswordReport};

#[derive(Clone, Default, PartialEq)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Credentials sent to the auth collaborator. `Debug` never shows the password.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegistrationPayload {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for RegistrationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationPayload")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl RegistrationDraft {
    /// Live checklist for the password field.
    pub fn password_report(&self) -> PasswordReport {
        validate_password(&self.password, self.email.trim())
    }

    /// Whether the confirmation field has been filled in and differs.
    pub fn confirmation_mismatch(&self) -> bool {
        !self.confirm_password.is_empty() && self.confirm_password != self.password
    }

    /// Validate in order: email, password rules, confirmation.
    pub fn validate(&self) -> Result<RegistrationPayload, FormError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(FormError::RequiredField(Field::Email));
        }
        if !is_plausible_email(&email) {
            return Err(FormError::Format { field: Field::Email });
        }
        if self.password.is_empty() {
            return Err(FormError::RequiredField(Field::Password));
        }
        if let Some(rule) = self.password_report().first_failure() {
            return Err(FormError::PasswordPolicy(rule));
        }
        if self.password != self.confirm_password {
            return Err(FormError::ConfirmationMismatch);
        }
        Ok(RegistrationPayload {
            email,
            password: self.password.clone(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
