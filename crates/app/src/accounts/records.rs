//! Account Records

use jiff::{Timestamp, civil::Date};

use crate::{accounts::token::SessionTokenVersion, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub date_of_birth: Option<Date>,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Non-empty address parts joined with commas.
    #[must_use]
    pub fn full_address(&self) -> String {
        [
            self.address_line_1.as_str(),
            self.address_line_2.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Password hash and status needed to check a login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
    pub is_active: bool,
}

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Session Record
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// A freshly issued session with its one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
    pub user: UserRecord,
}
