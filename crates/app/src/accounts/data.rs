//! Account Data

use jiff::civil::Date;

use crate::accounts::{
    records::UserUuid,
    validation::{FieldValue, Form},
};

/// Registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirmation: String,
    pub terms_accepted: bool,
}

impl SignUpForm {
    /// Email as it is stored and compared.
    #[must_use]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

impl Form for SignUpForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "email" => FieldValue::Text(self.email.trim()),
            "username" => FieldValue::Text(self.username.trim()),
            "first_name" => FieldValue::Text(self.first_name.trim()),
            "last_name" => FieldValue::Text(self.last_name.trim()),
            "password" => FieldValue::Text(&self.password),
            "password_confirmation" => FieldValue::Text(&self.password_confirmation),
            "terms_accepted" => FieldValue::Flag(self.terms_accepted),
            _ => FieldValue::Text(""),
        }
    }
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl Form for LoginForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "email" => FieldValue::Text(self.email.trim()),
            "password" => FieldValue::Text(&self.password),
            "remember_me" => FieldValue::Flag(self.remember_me),
            _ => FieldValue::Text(""),
        }
    }
}

/// Profile update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<Date>,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl ProfileForm {
    #[must_use]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

impl Form for ProfileForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        let text = match field {
            "first_name" => self.first_name.as_str(),
            "last_name" => self.last_name.as_str(),
            "email" => self.email.as_str(),
            "phone_number" => self.phone_number.as_str(),
            "address_line_1" => self.address_line_1.as_str(),
            "address_line_2" => self.address_line_2.as_str(),
            "city" => self.city.as_str(),
            "state" => self.state.as_str(),
            "country" => self.country.as_str(),
            "postal_code" => self.postal_code.as_str(),
            _ => "",
        };

        FieldValue::Text(text.trim())
    }
}

/// A validated, normalized registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// A validated, normalized profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<Date>,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}
