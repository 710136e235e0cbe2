//! Validation error taxonomy.
//!
//! Every variant except [`FormError::Backend`] is produced locally before any
//! network call is made. The `Display` output is the message shown to the user.

use thiserror::Error;

use crate::field::Field;
use crate::password::PasswordRule;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// Text that does not parse as a number (or email, for the email field).
    #[error("{}", .field.format_message())]
    Format { field: Field },

    /// Parsed value outside the field's inclusive bounds.
    #[error("{field} must be between {min} and {max}{}", .field.unit_suffix())]
    Range { field: Field, min: f64, max: f64 },

    #[error("{0} is required")]
    RequiredField(Field),

    /// First password rule that is not met, in declared rule order.
    #[error("{0}")]
    PasswordPolicy(PasswordRule),

    #[error("Passwords do not match")]
    ConfirmationMismatch,

    /// Message reported by the backend, shown verbatim.
    #[error("{0}")]
    Backend(String),
}

impl FormError {
    /// The field the error points at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            FormError::Format { field } | FormError::Range { field, .. } => Some(*field),
            FormError::RequiredField(field) => Some(*field),
            FormError::PasswordPolicy(_) => Some(Field::Password),
            FormError::ConfirmationMismatch => Some(Field::ConfirmPassword),
            FormError::Backend(_) => None,
        }
    }

    /// True for errors detected before reaching the backend.
    pub fn is_local(&self) -> bool {
        !matches!(self, FormError::Backend(_))
    }
}
