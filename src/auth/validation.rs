use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

pub const NAME_MIN: usize = 20;
pub const NAME_MAX: usize = 60;
pub const ADDRESS_MAX: usize = 400;
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex");
    static ref PASSWORD_CHARSET_RE: Regex =
        Regex::new(r"^[A-Za-z0-9!@#$%^&*]{8,16}$").expect("password regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 8–16 characters from the allowed set, with at least one uppercase letter
/// and one special character.
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_user_name(name: &str) -> Result<(), AppError> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "Name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), AppError> {
    if address.chars().count() > ADDRESS_MAX {
        return Err(AppError::validation(format!(
            "Address must be at most {ADDRESS_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if !is_valid_password(password) {
        return Err(AppError::validation(
            "Password must be 8-16 characters with at least one uppercase and one special character",
        ));
    }
    Ok(())
}

pub fn require_fields(fields: &[&str]) -> Result<(), AppError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::validation("All fields are required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("jane.doe+shop@example.co"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn password_policy() {
        assert!(is_valid_password("Passw0rd!"));
        assert!(is_valid_password("ABCDEFG#"));
        assert!(!is_valid_password("Pass!1"), "too short");
        assert!(!is_valid_password("Passw0rd!Passw0rd"), "17 chars");
        assert!(!is_valid_password("password!"), "no uppercase");
        assert!(!is_valid_password("Password1"), "no special");
        assert!(!is_valid_password("Pass word!"), "space not allowed");
        assert!(!is_valid_password("Passw0rd!("), "char outside set");
    }

    #[test]
    fn name_bounds_are_inclusive() {
        assert!(validate_user_name(&"a".repeat(19)).is_err());
        assert!(validate_user_name(&"a".repeat(20)).is_ok());
        assert!(validate_user_name(&"a".repeat(60)).is_ok());
        assert!(validate_user_name(&"a".repeat(61)).is_err());
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(validate_user_name(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn address_limit() {
        assert!(validate_address(&"x".repeat(400)).is_ok());
        assert!(validate_address(&"x".repeat(401)).is_err());
    }

    #[test]
    fn required_fields() {
        assert!(require_fields(&["a", "b"]).is_ok());
        assert!(require_fields(&["a", "  "]).is_err());
    }
}
