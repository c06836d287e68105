//! Accounts Config

use clap::Args;
use storefront_app::accounts::{
    AccountsConfig,
    config::{DEFAULT_COMMON_PASSWORDS, DEFAULT_DISPOSABLE_DOMAINS, DEFAULT_RESERVED_USERNAMES},
};

/// Deny-list overrides. Each replaces the built-in list when set.
#[derive(Debug, Args)]
pub struct AccountsSettings {
    /// Comma-separated email domains rejected at sign-up
    #[arg(long, env = "DISPOSABLE_EMAIL_DOMAINS", value_delimiter = ',')]
    pub disposable_domains: Option<Vec<String>>,

    /// Comma-separated usernames that cannot be registered
    #[arg(long, env = "RESERVED_USERNAMES", value_delimiter = ',')]
    pub reserved_usernames: Option<Vec<String>>,

    /// Comma-separated passwords rejected as too common
    #[arg(long, env = "COMMON_PASSWORDS", value_delimiter = ',', hide_env_values = true)]
    pub common_passwords: Option<Vec<String>>,
}

impl AccountsSettings {
    /// Build the account form configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a form pattern fails to compile.
    pub fn to_accounts_config(&self) -> Result<AccountsConfig, regex::Error> {
        AccountsConfig::with_lists(
            list_or_default(self.disposable_domains.as_deref(), DEFAULT_DISPOSABLE_DOMAINS),
            list_or_default(self.reserved_usernames.as_deref(), DEFAULT_RESERVED_USERNAMES),
            list_or_default(self.common_passwords.as_deref(), DEFAULT_COMMON_PASSWORDS),
        )
    }
}

fn list_or_default<'a>(configured: Option<&'a [String]>, default: &'a [&'a str]) -> Vec<&'a str> {
    match configured {
        Some(values) => values.iter().map(String::as_str).collect(),
        None => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() -> Result<(), regex::Error> {
        let settings = AccountsSettings {
            disposable_domains: None,
            reserved_usernames: Some(vec!["Owner".to_string()]),
            common_passwords: None,
        };

        let config = settings.to_accounts_config()?;

        assert!(config.reserved_usernames.contains("owner"));
        assert!(!config.reserved_usernames.contains("admin"));
        assert!(config.disposable_domains.contains("mailinator.com"));

        Ok(())
    }
}
