//! # Forms crate: unit-aware input validation and conversion
//!
//! Everything the profile, exercise-log and registration screens need to turn raw
//! text fields into a validated payload lives here. The crate has no UI and no
//! network code, so every rule can be exercised from plain unit tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`numeric`] | Restricts free text to digits and a single decimal separator |
//! | [`units`] | cm ↔ ft/in, lb ↔ kg, km ↔ mi with fixed display and storage rounding |
//! | [`range`] | Inclusive per-field bounds, typing-time clamping and age from date of birth |
//! | [`password`] | The nine password strength rules and their checklist report |
//! | [`exercise`], [`profile`], [`registration`] | Form drafts and the payloads they validate into |
//! | [`form`] | Submit state machine with cancellable backend calls |
//! | [`timing`] | Cooldown and debounce bookkeeping driven by UI timers |
//! | [`settings`] | `forms.toml` configuration (bounds, dot policy, timings) |
//!
//! Validation is fail-fast: every draft checks its fields in a fixed order and
//! reports the first failure as a single [`FormError`].

pub mod error;
pub mod exercise;
pub mod field;
pub mod form;
pub mod numeric;
pub mod password;
pub mod profile;
pub mod range;
pub mod registration;
pub mod settings;
pub mod timing;
pub mod units;

pub use error::FormError;
pub use exercise::{ExerciseCategory, ExerciseLogDraft, ExerciseLogPayload, Intensity};
pub use field::Field;
pub use form::{FormPhase, FormState, Submission};
pub use numeric::DotPolicy;
pub use password::{validate_password, PasswordReport, PasswordRule};
pub use profile::{ProfileDraft, ProfilePayload};
pub use registration::{RegistrationDraft, RegistrationPayload};
pub use settings::{Bounds, FieldBounds, FormSettings};
pub use timing::{Cooldown, Debouncer};
pub use units::{Distance, DistanceUnit, Height, HeightUnit, Weight, WeightUnit};

pub use tokio_util::sync::CancellationToken;
