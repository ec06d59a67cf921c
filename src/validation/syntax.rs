use super::Checked;
use regex::Regex;

/// A word-like character, an `@`, and a letter-led remainder captured as the domain.
pub const EMAIL_PATTERN: &str = r"[A-Za-z-]@([A-Za-z].*)";

pub const REASON_NO_MATCH: &str = "Email not validated by regex";

/// Structural gate for email addresses.
///
/// This is deliberately not an RFC 5322 parser: it rejects obviously
/// malformed input and extracts a best-effort domain for the MX lookup.
/// The pattern is compiled once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SyntaxCheck {
    pattern: Regex,
}

impl SyntaxCheck {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// Returns the captured domain on a match.
    pub fn check(&self, email: &str) -> Checked<String> {
        match self.pattern.captures(email).and_then(|caps| caps.get(1)) {
            Some(domain) => Checked::Passed(domain.as_str().to_string()),
            None => Checked::failed(REASON_NO_MATCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(email: &str) -> Checked<String> {
        SyntaxCheck::new().unwrap().check(email)
    }

    #[test]
    fn test_simple_address_yields_domain() {
        assert_eq!(check("user@example.com"), Checked::Passed("example.com".to_string()));
    }

    #[test]
    fn test_minimal_address() {
        assert_eq!(check("a@b"), Checked::Passed("b".to_string()));
    }

    #[test]
    fn test_domain_is_everything_after_matched_at() {
        assert_eq!(
            check("first.last@mail.example.org"),
            Checked::Passed("mail.example.org".to_string())
        );
        assert_eq!(check("x-@y.z@w"), Checked::Passed("y.z@w".to_string()));
    }

    #[test]
    fn test_hyphen_before_at_is_word_like() {
        assert_eq!(check("-@example.com"), Checked::Passed("example.com".to_string()));
    }

    #[test]
    fn test_rejects_without_at() {
        assert_eq!(check("not-an-email"), Checked::failed(REASON_NO_MATCH));
        assert_eq!(check(""), Checked::failed(REASON_NO_MATCH));
    }

    #[test]
    fn test_rejects_missing_local_part() {
        assert_eq!(check("@example.com"), Checked::failed(REASON_NO_MATCH));
    }

    #[test]
    fn test_rejects_missing_domain() {
        assert_eq!(check("user@"), Checked::failed(REASON_NO_MATCH));
    }

    #[test]
    fn test_rejects_non_letter_around_at() {
        assert_eq!(check("user1@example.com"), Checked::failed(REASON_NO_MATCH));
        assert_eq!(check("user@1example.com"), Checked::failed(REASON_NO_MATCH));
        assert_eq!(check("user.@example.com"), Checked::failed(REASON_NO_MATCH));
    }

    #[test]
    fn test_no_normalization() {
        assert_eq!(
            check("  User@Example.COM  "),
            Checked::Passed("Example.COM  ".to_string())
        );
    }
}
