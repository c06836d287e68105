//! Account form rules.

use crate::accounts::{
    config::AccountsConfig,
    data::{LoginCredentials, LoginForm, NewUser, ProfileForm, ProfileUpdate, SignUpForm},
    records::UserUuid,
    validation::{
        CrossFieldRule, CrossRule, DenyList, Fact, Facts, FieldRule, Pattern, Rule,
        ValidationErrors, Validator,
    },
};

const fn rule(field: &'static str, rule: Rule, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        rule,
        message,
    }
}

const EMAIL_REQUIRED: &str = "Email address is required.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";
const EMAIL_TAKEN: &str = "An account with this email address already exists.";

pub const SIGN_UP_RULES: &[FieldRule] = &[
    rule("email", Rule::Required, EMAIL_REQUIRED),
    rule("email", Rule::Matches(Pattern::Email), EMAIL_INVALID),
    rule("email", Rule::Unless(Fact::EmailTaken), EMAIL_TAKEN),
    rule(
        "email",
        Rule::DomainNotDenied(DenyList::DisposableDomains),
        "Please use a permanent email address.",
    ),
    rule("username", Rule::Required, "Username is required."),
    rule(
        "username",
        Rule::MinChars(3),
        "Username must be at least 3 characters long.",
    ),
    rule(
        "username",
        Rule::MaxChars(30),
        "Username cannot be longer than 30 characters.",
    ),
    rule(
        "username",
        Rule::Matches(Pattern::Username),
        "Username can only contain letters, numbers, and @/./+/-/_ characters.",
    ),
    rule(
        "username",
        Rule::Unless(Fact::UsernameTaken),
        "This username is already taken. Please choose another.",
    ),
    rule(
        "username",
        Rule::NotDenied(DenyList::ReservedUsernames),
        "This username is reserved. Please choose another.",
    ),
    rule("first_name", Rule::Required, "First name is required."),
    rule(
        "first_name",
        Rule::MinChars(2),
        "First name must be at least 2 characters long.",
    ),
    rule(
        "first_name",
        Rule::MaxChars(30),
        "First name cannot be longer than 30 characters.",
    ),
    rule(
        "first_name",
        Rule::Matches(Pattern::Name),
        "First name can only contain letters, spaces, hyphens, and apostrophes.",
    ),
    rule("last_name", Rule::Required, "Last name is required."),
    rule(
        "last_name",
        Rule::MinChars(2),
        "Last name must be at least 2 characters long.",
    ),
    rule(
        "last_name",
        Rule::MaxChars(30),
        "Last name cannot be longer than 30 characters.",
    ),
    rule(
        "last_name",
        Rule::Matches(Pattern::Name),
        "Last name can only contain letters, spaces, hyphens, and apostrophes.",
    ),
    rule("password", Rule::Required, "Password is required."),
    rule(
        "password",
        Rule::MinChars(8),
        "Password must be at least 8 characters long.",
    ),
    rule(
        "password",
        Rule::MaxChars(12),
        "Password must be between 8 to 12 characters.",
    ),
    rule(
        "password",
        Rule::NoWhitespace,
        "Password must not contain any spaces.",
    ),
    rule(
        "password",
        Rule::HasUppercase,
        "Password must have upper and lower case letters.",
    ),
    rule(
        "password",
        Rule::HasLowercase,
        "Password must have upper and lower case letters.",
    ),
    rule(
        "password",
        Rule::HasDigit,
        "Password must have at least one number.",
    ),
    rule(
        "password",
        Rule::HasSymbol,
        "Password must have at least one special character (@, #, $, &, *, -, +, ?, =, !).",
    ),
    rule(
        "password",
        Rule::NotDenied(DenyList::CommonPasswords),
        "This password is too common. Please choose a more secure password.",
    ),
    rule(
        "password_confirmation",
        Rule::Required,
        "Please confirm your password.",
    ),
    rule(
        "terms_accepted",
        Rule::Accepted,
        "You must accept the terms and conditions to register.",
    ),
];

pub const SIGN_UP_CROSS_RULES: &[CrossFieldRule] = &[
    CrossFieldRule {
        rule: CrossRule::Equal {
            field: "password",
            other: "password_confirmation",
        },
        message: "The two password fields didn't match.",
    },
    CrossFieldRule {
        rule: CrossRule::Excludes {
            field: "password",
            part: "first_name",
        },
        message: "Password cannot contain your first name.",
    },
    CrossFieldRule {
        rule: CrossRule::Excludes {
            field: "password",
            part: "last_name",
        },
        message: "Password cannot contain your last name.",
    },
    CrossFieldRule {
        rule: CrossRule::Excludes {
            field: "password",
            part: "username",
        },
        message: "Password cannot contain your username.",
    },
];

pub const LOGIN_RULES: &[FieldRule] = &[
    rule("email", Rule::Required, EMAIL_REQUIRED),
    rule("email", Rule::Matches(Pattern::Email), EMAIL_INVALID),
    rule("password", Rule::Required, "Password is required."),
];

pub const PROFILE_RULES: &[FieldRule] = &[
    rule("first_name", Rule::Required, "First name is required."),
    rule(
        "first_name",
        Rule::MinChars(2),
        "First name must be at least 2 characters long.",
    ),
    rule(
        "first_name",
        Rule::MaxChars(30),
        "First name cannot be longer than 30 characters.",
    ),
    rule(
        "first_name",
        Rule::Matches(Pattern::Name),
        "First name can only contain letters, spaces, hyphens, and apostrophes.",
    ),
    rule("last_name", Rule::Required, "Last name is required."),
    rule(
        "last_name",
        Rule::MinChars(2),
        "Last name must be at least 2 characters long.",
    ),
    rule(
        "last_name",
        Rule::MaxChars(30),
        "Last name cannot be longer than 30 characters.",
    ),
    rule(
        "last_name",
        Rule::Matches(Pattern::Name),
        "Last name can only contain letters, spaces, hyphens, and apostrophes.",
    ),
    rule("email", Rule::Required, EMAIL_REQUIRED),
    rule("email", Rule::Matches(Pattern::Email), EMAIL_INVALID),
    rule("email", Rule::Unless(Fact::EmailTaken), EMAIL_TAKEN),
    rule(
        "phone_number",
        Rule::MaxChars(17),
        "Ensure this value has at most 17 characters.",
    ),
    rule(
        "phone_number",
        Rule::Matches(Pattern::Phone),
        "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.",
    ),
    rule(
        "address_line_1",
        Rule::MaxChars(255),
        "Ensure this value has at most 255 characters.",
    ),
    rule(
        "address_line_2",
        Rule::MaxChars(255),
        "Ensure this value has at most 255 characters.",
    ),
    rule(
        "city",
        Rule::MaxChars(100),
        "Ensure this value has at most 100 characters.",
    ),
    rule(
        "state",
        Rule::MaxChars(100),
        "Ensure this value has at most 100 characters.",
    ),
    rule(
        "country",
        Rule::MaxChars(100),
        "Ensure this value has at most 100 characters.",
    ),
    rule(
        "postal_code",
        Rule::MaxChars(20),
        "Ensure this value has at most 20 characters.",
    ),
];

/// Validate and normalize a registration.
///
/// # Errors
///
/// Returns the field and form errors found.
pub fn validate_sign_up(
    form: &SignUpForm,
    config: &AccountsConfig,
    facts: Facts,
) -> Result<NewUser, ValidationErrors> {
    Validator::new(config, facts).validate(form, SIGN_UP_RULES, SIGN_UP_CROSS_RULES)?;

    Ok(NewUser {
        uuid: UserUuid::new(),
        email: form.normalized_email(),
        username: form.username.trim().to_string(),
        first_name: title_case(form.first_name.trim()),
        last_name: title_case(form.last_name.trim()),
        password: form.password.clone(),
    })
}

/// Validate login input.
///
/// # Errors
///
/// Returns the field errors found.
pub fn validate_login(
    form: &LoginForm,
    config: &AccountsConfig,
) -> Result<LoginCredentials, ValidationErrors> {
    Validator::new(config, Facts::default()).validate(form, LOGIN_RULES, &[])?;

    Ok(LoginCredentials {
        email: form.email.trim().to_lowercase(),
        password: form.password.clone(),
        remember_me: form.remember_me,
    })
}

/// Validate and normalize a profile update.
///
/// # Errors
///
/// Returns the field errors found.
pub fn validate_profile(
    form: &ProfileForm,
    config: &AccountsConfig,
    facts: Facts,
) -> Result<ProfileUpdate, ValidationErrors> {
    Validator::new(config, facts).validate(form, PROFILE_RULES, &[])?;

    Ok(ProfileUpdate {
        first_name: title_case(form.first_name.trim()),
        last_name: title_case(form.last_name.trim()),
        email: form.normalized_email(),
        phone_number: form.phone_number.trim().to_string(),
        date_of_birth: form.date_of_birth,
        address_line_1: form.address_line_1.trim().to_string(),
        address_line_2: form.address_line_2.trim().to_string(),
        city: form.city.trim().to_string(),
        state: form.state.trim().to_string(),
        country: form.country.trim().to_string(),
        postal_code: form.postal_code.trim().to_string(),
    })
}

/// Upper-case the first letter of every word and lower-case the rest. A word
/// starts after any character that is not a letter, so `o'neil` becomes
/// `O'Neil`.
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }

            in_word = true;
        } else {
            titled.push(c);
            in_word = false;
        }
    }

    titled
}
