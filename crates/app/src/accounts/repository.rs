//! Accounts Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    accounts::{
        data::{NewUser, ProfileUpdate},
        records::{SessionRecord, SessionUuid, UserCredentials, UserRecord, UserUuid},
        token::SessionTokenVersion,
    },
    domain::rows::try_get_timestamp,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const EMAIL_EXISTS_SQL: &str = include_str!("sql/email_exists.sql");
const USERNAME_EXISTS_SQL: &str = include_str!("sql/username_exists.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

/// Session row to insert. Only the token digest is stored.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Whether another account uses `email`, ignoring `excluding`.
    pub(crate) async fn email_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        excluding: Option<UserUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(EMAIL_EXISTS_SQL)
            .bind(email)
            .bind(excluding.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn username_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(USERNAME_EXISTS_SQL)
            .bind(username)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        profile: &ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.email)
            .bind(&profile.phone_number)
            .bind(profile.date_of_birth.map(SqlxDate::from))
            .bind(&profile.address_line_1)
            .bind(&profile.address_line_2)
            .bind(&profile.city)
            .bind(&profile.state)
            .bind(&profile.country)
            .bind(&profile.postal_code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &NewSession,
    ) -> Result<SessionRecord, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(CREATE_SESSION_SQL)
            .bind(session.uuid.into_uuid())
            .bind(session.user_uuid.into_uuid())
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(SqlxTimestamp::from(session.expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Unrevoked, unexpired session of an active user matching the digest.
    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        version: SessionTokenVersion,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(FIND_ACTIVE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(version.as_i16())
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        Ok(query(REVOKE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(token_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone_number: row.try_get("phone_number")?,
            date_of_birth: row
                .try_get::<Option<SqlxDate>, _>("date_of_birth")?
                .map(SqlxDate::to_jiff),
            address_line_1: row.try_get("address_line_1")?,
            address_line_2: row.try_get("address_line_2")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            country: row.try_get("country")?,
            postal_code: row.try_get("postal_code")?,
            is_active: row.try_get("is_active")?,
            is_email_verified: row.try_get("is_email_verified")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version = SessionTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(
            |e| sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            },
        )?;

        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version,
            created_at: try_get_timestamp(row, "created_at")?,
            expires_at: try_get_timestamp(row, "expires_at")?,
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
