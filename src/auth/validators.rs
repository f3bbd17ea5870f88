//! Username and password rules shared by sign-up, sign-in and the CLI
//! strength meter

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Character classes a password must mix
pub const REQUIRED_CLASSES: u8 = 3;

/// Local part, `@`, a dotted domain and a top-level segment of 2+ characters
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

/// Is this an email-shaped username (after trimming)?
pub fn is_valid_email(username: &str) -> bool {
    let trimmed = username.trim();
    EMAIL.is_match(trimmed)
}

/// Lowercased, trimmed form used as the credential key
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Outcome of [`validate_password`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub valid: bool,
    /// Character classes present, 0..=4 (0 when too short)
    pub score: u8,
    /// Why the password was rejected
    pub message: Option<String>,
}

/// Check a password's length and character-class mix
///
/// Passwords shorter than [`MIN_PASSWORD_LEN`] score 0 regardless of
/// content. Otherwise the score counts lowercase, uppercase, digit and
/// "other" (non-ASCII-alphanumeric) characters, and at least
/// [`REQUIRED_CLASSES`] of them are needed.
pub fn validate_password(password: &str) -> PasswordCheck {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return PasswordCheck {
            valid: false,
            score: 0,
            message: Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )),
        };
    }

    let classes = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = classes.iter().filter(|present| **present).count() as u8;

    if score < REQUIRED_CLASSES {
        return PasswordCheck {
            valid: false,
            score,
            message: Some(
                concat!(
                    "Password should include at least three of: ",
                    "lowercase, uppercase, number, special character"
                )
                .to_string(),
            ),
        };
    }

    PasswordCheck {
        valid: true,
        score,
        message: None,
    }
}

/// Label for the strength meter
pub fn strength_label(score: u8) -> &'static str {
    match score {
        0 | 1 => "Very weak",
        2 => "Weak",
        3 => "Good",
        _ => "Strong",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.co", "  first.last@example.com  ", "x+tag@mail.example.org"] {
            assert!(is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "not-an-email",
            "a@b",
            "a@b.c",
            "@b.com",
            "a@.com",
            "a b@c.com",
            "a@b@c.com",
            "a@b.c m",
        ] {
            assert!(!is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  A@B.com "), "a@b.com");
    }

    #[test]
    fn test_short_password_scores_zero() {
        let check = validate_password("short");
        assert!(!check.valid);
        assert_eq!(check.score, 0);

        // Even a mix of every class is zero while too short
        let check = validate_password("aA1!");
        assert_eq!(check.score, 0);
        assert!(check.message.unwrap().contains("at least 8"));
    }

    #[test]
    fn test_four_classes() {
        let check = validate_password("Aa1!aaaa");
        assert!(check.valid);
        assert_eq!(check.score, 4);
        assert!(check.message.is_none());
    }

    #[test]
    fn test_three_classes_pass() {
        let check = validate_password("Password1");
        assert!(check.valid);
        assert_eq!(check.score, 3);
    }

    #[test]
    fn test_two_classes_fail_with_score() {
        let check = validate_password("password1");
        assert!(!check.valid);
        assert_eq!(check.score, 2);
        assert!(check.message.is_some());

        assert_eq!(validate_password("aaaaaaaa").score, 1);
    }

    #[test]
    fn test_non_ascii_counts_as_special() {
        let check = validate_password("passwörd1");
        assert_eq!(check.score, 3);
    }

    #[test]
    fn test_strength_labels() {
        assert_eq!(strength_label(0), "Very weak");
        assert_eq!(strength_label(1), "Very weak");
        assert_eq!(strength_label(2), "Weak");
        assert_eq!(strength_label(3), "Good");
        assert_eq!(strength_label(4), "Strong");
    }
}
