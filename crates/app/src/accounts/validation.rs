//! Form validation.
//!
//! A form is checked against a table of [`FieldRule`]s and then a table of
//! [`CrossFieldRule`]s by [`Validator::validate`]. Every field reports at most
//! its first failing rule. Cross-field rules only look at fields that passed
//! their own rules, and only the first failing one is reported, under
//! [`NON_FIELD_ERRORS`].
//!
//! Apart from [`Rule::Required`] and [`Rule::Accepted`], rules pass on blank
//! values so optional fields are only checked when filled in.

use std::collections::BTreeMap;

use serde::Serialize;
use smallvec::SmallVec;

use crate::accounts::config::AccountsConfig;

/// Key under which form-level errors are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A raw form value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    fn text(self) -> &'a str {
        match self {
            Self::Text(text) => text,
            Self::Flag(_) => "",
        }
    }

    fn is_blank(self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Flag(flag) => !flag,
        }
    }
}

/// Something with named fields to validate.
pub trait Form {
    /// Value of `field`. Unknown fields read as blank text.
    fn value(&self, field: &str) -> FieldValue<'_>;
}

/// Configurable deny-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyList {
    DisposableDomains,
    ReservedUsernames,
    CommonPasswords,
}

/// Compiled patterns from [`AccountsConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Email,
    Username,
    Name,
    Phone,
}

/// Storage facts looked up before validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fact {
    EmailTaken,
    UsernameTaken,
}

/// Answers to every [`Fact`] for one form submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facts {
    pub email_taken: bool,
    pub username_taken: bool,
}

impl Facts {
    fn holds(self, fact: Fact) -> bool {
        match fact {
            Fact::EmailTaken => self.email_taken,
            Fact::UsernameTaken => self.username_taken,
        }
    }
}

/// A single-field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// A flag that must be set.
    Accepted,
    MinChars(usize),
    MaxChars(usize),
    Matches(Pattern),
    NoWhitespace,
    HasUppercase,
    HasLowercase,
    HasDigit,
    HasSymbol,
    /// The lower-cased value is not on the list.
    NotDenied(DenyList),
    /// The lower-cased domain of an email address is not on the list.
    DomainNotDenied(DenyList),
    /// Fails when the fact holds.
    Unless(Fact),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

/// A check relating two fields. Passes when either field is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossRule {
    Equal {
        field: &'static str,
        other: &'static str,
    },
    /// `field` does not contain `part`, ignoring case.
    Excludes {
        field: &'static str,
        part: &'static str,
    },
}

impl CrossRule {
    fn fields(self) -> [&'static str; 2] {
        match self {
            Self::Equal { field, other } => [field, other],
            Self::Excludes { field, part } => [field, part],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossFieldRule {
    pub rule: CrossRule,
    pub message: &'static str,
}

/// Messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages reported for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message reported for `field`.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

/// Evaluates rule tables against forms.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a AccountsConfig,
    facts: Facts,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(config: &'a AccountsConfig, facts: Facts) -> Self {
        Self { config, facts }
    }

    /// Run `field_rules` then `cross_rules` over `form`.
    ///
    /// # Errors
    ///
    /// Returns every failure found.
    pub fn validate<F: Form + ?Sized>(
        &self,
        form: &F,
        field_rules: &[FieldRule],
        cross_rules: &[CrossFieldRule],
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut failed: SmallVec<[&'static str; 8]> = SmallVec::new();

        for rule in field_rules {
            if failed.contains(&rule.field) {
                continue;
            }

            if !self.passes(rule.rule, form.value(rule.field)) {
                errors.add(rule.field, rule.message);
                failed.push(rule.field);
            }
        }

        for rule in cross_rules {
            if rule.rule.fields().iter().any(|field| failed.contains(field)) {
                continue;
            }

            if !cross_passes(rule.rule, form) {
                errors.add(NON_FIELD_ERRORS, rule.message);
                break;
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn passes(&self, rule: Rule, value: FieldValue<'_>) -> bool {
        let text = value.text();

        match rule {
            Rule::Required => !value.is_blank(),
            Rule::Accepted => value == FieldValue::Flag(true),
            _ if value.is_blank() => true,
            Rule::MinChars(min) => text.chars().count() >= min,
            Rule::MaxChars(max) => text.chars().count() <= max,
            Rule::Matches(pattern) => self.pattern_matches(pattern, text),
            Rule::NoWhitespace => !text.chars().any(char::is_whitespace),
            Rule::HasUppercase => text.chars().any(|c| c.is_ascii_uppercase()),
            Rule::HasLowercase => text.chars().any(|c| c.is_ascii_lowercase()),
            Rule::HasDigit => text.chars().any(|c| c.is_ascii_digit()),
            Rule::HasSymbol => self.config.patterns.symbol.is_match(text),
            Rule::NotDenied(list) => !self.denies(list, text),
            Rule::DomainNotDenied(list) => text
                .rsplit_once('@')
                .is_none_or(|(_, domain)| !self.denies(list, domain)),
            Rule::Unless(fact) => !self.facts.holds(fact),
        }
    }

    fn pattern_matches(&self, pattern: Pattern, text: &str) -> bool {
        let patterns = &self.config.patterns;

        match pattern {
            Pattern::Email => patterns.email.is_match(text),
            Pattern::Username => patterns.username.is_match(text),
            Pattern::Name => patterns.name.is_match(text),
            Pattern::Phone => patterns.phone.is_match(text),
        }
    }

    fn denies(&self, list: DenyList, value: &str) -> bool {
        let entries = match list {
            DenyList::DisposableDomains => &self.config.disposable_domains,
            DenyList::ReservedUsernames => &self.config.reserved_usernames,
            DenyList::CommonPasswords => &self.config.common_passwords,
        };

        entries.contains(&value.to_lowercase())
    }
}

fn cross_passes<F: Form + ?Sized>(rule: CrossRule, form: &F) -> bool {
    let [field, other] = rule.fields();
    let (left, right) = (form.value(field), form.value(other));

    if left.is_blank() || right.is_blank() {
        return true;
    }

    match rule {
        CrossRule::Equal { .. } => left == right,
        CrossRule::Excludes { .. } => !left
            .text()
            .to_lowercase()
            .contains(&right.text().to_lowercase()),
    }
}
