//! Account policy configuration.

use regex::Regex;
use rustc_hash::FxHashSet;

/// Email domains of throwaway mail services.
pub const DEFAULT_DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
];

/// Usernames nobody may register.
pub const DEFAULT_RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "user",
    "test",
    "guest",
    "api",
    "www",
    "mail",
    "email",
    "support",
    "help",
    "info",
];

/// Passwords rejected regardless of how well they meet the policy.
pub const DEFAULT_COMMON_PASSWORDS: &[&str] = &[
    "password",
    "12345678",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "password1",
];

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$";
const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.@+-]+$";
const NAME_PATTERN: &str = r"^[a-zA-Z\s'-]+$";
const PHONE_PATTERN: &str = r"^\+?1?\d{9,15}$";
const SYMBOL_PATTERN: &str = r"[@#$&*\-+?=!]";

/// Compiled patterns used by the form rules.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub email: Regex,
    pub username: Regex,
    pub name: Regex,
    pub phone: Regex,
    pub symbol: Regex,
}

impl Patterns {
    /// Compile the form patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            username: Regex::new(USERNAME_PATTERN)?,
            name: Regex::new(NAME_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            symbol: Regex::new(SYMBOL_PATTERN)?,
        })
    }
}

/// Deny-lists and patterns applied to account forms.
///
/// Deny-list entries are stored lower-cased and matched case-insensitively.
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    pub disposable_domains: FxHashSet<String>,
    pub reserved_usernames: FxHashSet<String>,
    pub common_passwords: FxHashSet<String>,
    pub patterns: Patterns,
}

impl AccountsConfig {
    /// Configuration with the built-in deny-lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a form pattern fails to compile.
    pub fn standard() -> Result<Self, regex::Error> {
        Self::with_lists(
            DEFAULT_DISPOSABLE_DOMAINS,
            DEFAULT_RESERVED_USERNAMES,
            DEFAULT_COMMON_PASSWORDS,
        )
    }

    /// Configuration with custom deny-lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a form pattern fails to compile.
    pub fn with_lists<D, U, P>(
        disposable_domains: D,
        reserved_usernames: U,
        common_passwords: P,
    ) -> Result<Self, regex::Error>
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        U: IntoIterator,
        U::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Ok(Self {
            disposable_domains: lowered(disposable_domains),
            reserved_usernames: lowered(reserved_usernames),
            common_passwords: lowered(common_passwords),
            patterns: Patterns::compile()?,
        })
    }
}

fn lowered<I>(entries: I) -> FxHashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_lists_are_lowered_and_trimmed() {
        let config = AccountsConfig::with_lists([" Spam.IO "], ["Boss", ""], ["Hunter2"])
            .expect("patterns compile");

        assert!(config.disposable_domains.contains("spam.io"));
        assert!(config.reserved_usernames.contains("boss"));
        assert_eq!(config.reserved_usernames.len(), 1);
        assert!(config.common_passwords.contains("hunter2"));
    }

    #[test]
    fn phone_pattern_matches_international_numbers() {
        let patterns = Patterns::compile().expect("patterns compile");

        assert!(patterns.phone.is_match("+447911123456"));
        assert!(patterns.phone.is_match("123456789"));
        assert!(!patterns.phone.is_match("12345"));
        assert!(!patterns.phone.is_match("+44 7911 123456"));
    }

    #[test]
    fn email_pattern_requires_domain() {
        let patterns = Patterns::compile().expect("patterns compile");

        assert!(patterns.email.is_match("ada.lovelace+shop@example.co.uk"));
        assert!(!patterns.email.is_match("ada@localhost"));
        assert!(!patterns.email.is_match("not-an-email"));
        assert!(!patterns.email.is_match("two@@example.com"));
    }
}
