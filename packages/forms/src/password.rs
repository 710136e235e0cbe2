//! # Password strength rules
//!
//! [`validate_password`] evaluates nine independent rules against a candidate
//! password and the email it will be registered with. The resulting
//! [`PasswordReport`] is used twice by the registration screen: as a live
//! checklist under the password field, and as the submit gate
//! ([`PasswordReport::is_valid`]).
//!
//! Rules are evaluated and reported in the order of [`PasswordRule::ALL`]. The
//! password itself is never stored or logged.

use std::fmt;

pub const MIN_PASSWORD_LENGTH: usize = 10;

pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Lower-case fragments that make a password "common" when contained anywhere in it.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "passw0rd",
    "123456",
    "qwerty",
    "letmein",
    "welcome",
    "admin",
    "abc123",
    "iloveyou",
    "monkey",
    "dragon",
    "football",
    "baseball",
    "sunshine",
    "princess",
    "trustno1",
    "111111",
    "000000",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PasswordRule {
    MinLength,
    HasLetter,
    HasUppercase,
    HasLowercase,
    HasNumber,
    HasSpecial,
    NoEdgeWhitespace,
    NotMatchesEmail,
    NotCommon,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 9] = [
        PasswordRule::MinLength,
        PasswordRule::HasLetter,
        PasswordRule::HasUppercase,
        PasswordRule::HasLowercase,
        PasswordRule::HasNumber,
        PasswordRule::HasSpecial,
        PasswordRule::NoEdgeWhitespace,
        PasswordRule::NotMatchesEmail,
        PasswordRule::NotCommon,
    ];

    /// Short checklist label.
    pub fn label(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "At least 10 characters",
            PasswordRule::HasLetter => "Contains a letter",
            PasswordRule::HasUppercase => "Contains an uppercase letter",
            PasswordRule::HasLowercase => "Contains a lowercase letter",
            PasswordRule::HasNumber => "Contains a number",
            PasswordRule::HasSpecial => "Contains a special character",
            PasswordRule::NoEdgeWhitespace => "No leading or trailing spaces",
            PasswordRule::NotMatchesEmail => "Does not contain your email name",
            PasswordRule::NotCommon => "Not a common or repetitive password",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn check(&self, password: &str, email_local: &str) -> bool {
        match self {
            PasswordRule::MinLength => password.chars().count() >= MIN_PASSWORD_LENGTH,
            PasswordRule::HasLetter => password.chars().any(char::is_alphabetic),
            PasswordRule::HasUppercase => password.chars().any(char::is_uppercase),
            PasswordRule::HasLowercase => password.chars().any(char::is_lowercase),
            PasswordRule::HasNumber => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::HasSpecial => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            PasswordRule::NoEdgeWhitespace => password.trim() == password,
            PasswordRule::NotMatchesEmail => {
                email_local.is_empty() || !password.to_lowercase().contains(email_local)
            }
            PasswordRule::NotCommon => !is_common(password) && !has_repeated_run(password, 3),
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PasswordRule::MinLength => "Password must be at least 10 characters",
            PasswordRule::HasLetter => "Password must contain a letter",
            PasswordRule::HasUppercase => "Password must contain an uppercase letter",
            PasswordRule::HasLowercase => "Password must contain a lowercase letter",
            PasswordRule::HasNumber => "Password must contain a number",
            PasswordRule::HasSpecial => "Password must contain a special character",
            PasswordRule::NoEdgeWhitespace => "Password must not start or end with a space",
            PasswordRule::NotMatchesEmail => "Password must not contain your email name",
            PasswordRule::NotCommon => "Password is too common or repetitive",
        };
        f.write_str(message)
    }
}

/// Outcome of every rule for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordReport {
    results: [bool; 9],
}

impl PasswordReport {
    pub fn passes(&self, rule: PasswordRule) -> bool {
        self.results[rule.index()]
    }

    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|ok| *ok)
    }

    pub fn first_failure(&self) -> Option<PasswordRule> {
        self.failures().next()
    }

    pub fn failures(&self) -> impl Iterator<Item = PasswordRule> + '_ {
        PasswordRule::ALL.into_iter().filter(|r| !self.passes(*r))
    }

    /// Every rule with its result, in display order.
    pub fn checklist(&self) -> impl Iterator<Item = (PasswordRule, bool)> + '_ {
        PasswordRule::ALL.into_iter().map(|r| (r, self.passes(r)))
    }
}

/// Evaluate all nine rules.
pub fn validate_password(password: &str, email: &str) -> PasswordReport {
    let email_local = email
        .split('@')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let mut results = [false; 9];
    for rule in PasswordRule::ALL {
        results[rule.index()] = rule.check(password, &email_local);
    }
    PasswordReport { results }
}

fn is_common(password: &str) -> bool {
    let lower = password.to_lowercase();
    COMMON_PASSWORDS.iter().any(|common| lower.contains(common))
}

fn has_repeated_run(password: &str, run: usize) -> bool {
    let mut count = 0;
    let mut prev = None;
    for ch in password.chars() {
        if Some(ch) == prev {
            count += 1;
        } else {
            prev = Some(ch);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}
