//! Accounts service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::info;

use crate::{
    accounts::{
        config::AccountsConfig,
        data::{LoginForm, ProfileForm, SignUpForm},
        errors::AccountsServiceError,
        forms::{validate_login, validate_profile, validate_sign_up},
        passwords::{hash_password_blocking, verify_password_blocking},
        records::{IssuedSession, SessionUuid, UserRecord, UserUuid},
        repository::{NewSession, PgAccountsRepository},
        token::{
            SessionTokenVersion, format_session_token, generate_session_secret,
            hash_session_token, parse_session_token,
        },
        validation::Facts,
    },
    database::Db,
};

/// Session lifetime when the user asked to be remembered.
pub const REMEMBERED_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 30);

/// Session lifetime otherwise.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    config: AccountsConfig,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db, config: AccountsConfig) -> Self {
        Self {
            db,
            config,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    #[tracing::instrument(name = "accounts.service.register", skip_all, err)]
    async fn register(&self, form: SignUpForm) -> Result<UserRecord, AccountsServiceError> {
        let facts = {
            let mut tx = self.db.begin_transaction().await?;

            Facts {
                email_taken: self
                    .repository
                    .email_exists(&mut tx, &form.normalized_email(), None)
                    .await?,
                username_taken: self
                    .repository
                    .username_exists(&mut tx, form.username.trim())
                    .await?,
            }
        };

        let new_user = validate_sign_up(&form, &self.config, facts)?;

        // No transaction is held while hashing; a racing sign-up is caught by
        // the unique indexes on insert.
        let password_hash = hash_password_blocking(new_user.password.clone()).await??;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .create_user(&mut tx, &new_user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, "registered account");

        Ok(user)
    }

    #[tracing::instrument(name = "accounts.service.login", skip_all, err)]
    async fn login(&self, form: LoginForm) -> Result<IssuedSession, AccountsServiceError> {
        let credentials = validate_login(&form, &self.config)?;

        let account = {
            let mut tx = self.db.begin_transaction().await?;

            self.repository
                .find_credentials_by_email(&mut tx, &credentials.email)
                .await?
                .ok_or(AccountsServiceError::NoAccount)?
        };

        if !account.is_active {
            return Err(AccountsServiceError::AccountDeactivated);
        }

        let verified =
            verify_password_blocking(credentials.password.clone(), account.password_hash.clone())
                .await??;

        if !verified {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        let mut tx = self.db.begin_transaction().await?;

        let ttl = if credentials.remember_me {
            REMEMBERED_SESSION_TTL
        } else {
            SESSION_TTL
        };

        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid.into_uuid(), version, &secret);

        let session = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: account.uuid,
                    version,
                    token_hash: hash_session_token(&token),
                    expires_at: Timestamp::now().checked_add(ttl)?,
                },
            )
            .await?;

        let user = self.repository.get_user(&mut tx, account.uuid).await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, session_uuid = %session.uuid, "issued session");

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AccountsServiceError> {
        let Ok(parsed) = parse_session_token(bearer_token) else {
            return Err(AccountsServiceError::NotFound);
        };

        let mut tx = self.db.begin_transaction().await?;

        let session = self
            .repository
            .find_active_session(
                &mut tx,
                SessionUuid::from_uuid(parsed.session_uuid),
                parsed.version,
                &hash_session_token(bearer_token),
            )
            .await?
            .ok_or(AccountsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(session.user_uuid)
    }

    #[tracing::instrument(name = "accounts.service.logout", skip_all, err)]
    async fn logout(&self, bearer_token: &str) -> Result<(), AccountsServiceError> {
        let Ok(parsed) = parse_session_token(bearer_token) else {
            return Err(AccountsServiceError::NotFound);
        };

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .revoke_session(
                &mut tx,
                SessionUuid::from_uuid(parsed.session_uuid),
                &hash_session_token(bearer_token),
            )
            .await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(session_uuid = %parsed.session_uuid, "revoked session");

        Ok(())
    }

    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    #[tracing::instrument(
        name = "accounts.service.update_profile",
        skip(self, form),
        fields(user_uuid = %user),
        err
    )]
    async fn update_profile(
        &self,
        user: UserUuid,
        form: ProfileForm,
    ) -> Result<UserRecord, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let facts = Facts {
            email_taken: self
                .repository
                .email_exists(&mut tx, &form.normalized_email(), Some(user))
                .await?,
            username_taken: false,
        };

        let profile = validate_profile(&form, &self.config, facts)?;

        let updated = self.repository.update_profile(&mut tx, user, &profile).await?;

        tx.commit().await?;

        info!("updated profile");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Validate a sign-up form and create the account.
    async fn register(&self, form: SignUpForm) -> Result<UserRecord, AccountsServiceError>;

    /// Check credentials and issue a session token.
    async fn login(&self, form: LoginForm) -> Result<IssuedSession, AccountsServiceError>;

    /// Resolve a bearer token to the user owning a live session.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<UserUuid, AccountsServiceError>;

    /// Revoke the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AccountsServiceError>;

    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, AccountsServiceError>;

    /// Validate a profile form and apply it.
    async fn update_profile(
        &self,
        user: UserUuid,
        form: ProfileForm,
    ) -> Result<UserRecord, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn sign_up(email: &str, username: &str) -> SignUpForm {
        SignUpForm {
            email: email.to_string(),
            username: username.to_string(),
            first_name: "ada".to_string(),
            last_name: "lovelace".to_string(),
            password: "Passw0rd!".to_string(),
            password_confirmation: "Passw0rd!".to_string(),
            terms_accepted: true,
        }
    }

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn register_stores_normalized_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .accounts
            .register(sign_up("Ada@Example.com", "countess"))
            .await?;

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert!(user.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_used_email_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let result = ctx
            .accounts
            .register(sign_up("ADA@example.com", "another"))
            .await;

        let Err(AccountsServiceError::Validation(errors)) = result else {
            panic!("expected validation error, got {result:?}");
        };

        assert_eq!(
            errors.first("email"),
            Some("An account with this email address already exists.")
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_taken_username() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let result = ctx
            .accounts
            .register(sign_up("other@example.com", "countess"))
            .await;

        let Err(AccountsServiceError::Validation(errors)) = result else {
            panic!("expected validation error, got {result:?}");
        };

        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn username_index_ignores_case() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "Countess"))
            .await?;

        // A sign-up that passed the existence check before the first one
        // committed still lands on the index.
        let result = sqlx::query(
            "INSERT INTO users (uuid, email, username, first_name, last_name, password_hash) \
             VALUES ($1, 'other@example.com', 'countess', 'Other', 'User', 'unusable')",
        )
        .bind(UserUuid::new().into_uuid())
        .execute(ctx.db.pool())
        .await
        .map_err(AccountsServiceError::from);

        assert!(
            matches!(result, Err(AccountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_issues_token_that_authenticates() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let issued = ctx
            .accounts
            .login(login("ADA@example.com", "Passw0rd!"))
            .await?;

        assert_eq!(issued.user.uuid, user.uuid);
        assert!(issued.token.starts_with("sf_v1_"));

        let ttl = issued.session.expires_at.duration_since(issued.session.created_at);

        assert!(ttl <= SESSION_TTL + SignedDuration::from_mins(1));
        assert!(ttl > SignedDuration::from_hours(23));

        let authenticated = ctx.accounts.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn remembered_login_lasts_thirty_days() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let issued = ctx
            .accounts
            .login(LoginForm {
                remember_me: true,
                ..login("ada@example.com", "Passw0rd!")
            })
            .await?;

        let ttl = issued.session.expires_at.duration_since(issued.session.created_at);

        assert!(ttl > SignedDuration::from_hours(24 * 29));

        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let missing = ctx
            .accounts
            .login(login("nobody@example.com", "Passw0rd!"))
            .await;

        assert!(matches!(missing, Err(AccountsServiceError::NoAccount)));

        let wrong = ctx
            .accounts
            .login(login("ada@example.com", "Passw0rd?"))
            .await;

        assert!(matches!(wrong, Err(AccountsServiceError::InvalidCredentials)));

        let invalid = ctx.accounts.login(login("not-an-email", "")).await;

        assert!(matches!(invalid, Err(AccountsServiceError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_account_cannot_log_in() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        ctx.deactivate_user(user.uuid).await?;

        let result = ctx
            .accounts
            .login(login("ada@example.com", "Passw0rd!"))
            .await;

        assert!(matches!(result, Err(AccountsServiceError::AccountDeactivated)));

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let issued = ctx
            .accounts
            .login(login("ada@example.com", "Passw0rd!"))
            .await?;

        ctx.accounts.logout(&issued.token).await?;

        let result = ctx.accounts.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AccountsServiceError::NotFound)));

        let again = ctx.accounts.logout(&issued.token).await;

        assert!(matches!(again, Err(AccountsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_does_not_authenticate() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        let issued = ctx
            .accounts
            .login(login("ada@example.com", "Passw0rd!"))
            .await?;

        let mut tampered = issued.token.clone();
        let last = if tampered.ends_with('0') { '1' } else { '0' };
        tampered.pop();
        tampered.push(last);

        let result = ctx.accounts.authenticate_bearer(&tampered).await;

        assert!(matches!(result, Err(AccountsServiceError::NotFound)));

        let garbage = ctx.accounts.authenticate_bearer("garbage").await;

        assert!(matches!(garbage, Err(AccountsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn profile_update_normalizes_and_checks_email() -> TestResult {
        let ctx = TestContext::new().await;

        let ada = ctx
            .accounts
            .register(sign_up("ada@example.com", "countess"))
            .await?;

        ctx.accounts
            .register(sign_up("grace@example.com", "admiral"))
            .await?;

        let form = ProfileForm {
            first_name: "augusta ada".to_string(),
            last_name: "king".to_string(),
            email: "Ada@Example.com".to_string(),
            phone_number: "+441234567890".to_string(),
            city: " London ".to_string(),
            ..ProfileForm::default()
        };

        let updated = ctx.accounts.update_profile(ada.uuid, form.clone()).await?;

        assert_eq!(updated.first_name, "Augusta Ada");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.city, "London");
        assert_eq!(updated.phone_number, "+441234567890");

        let taken = ctx
            .accounts
            .update_profile(
                ada.uuid,
                ProfileForm {
                    email: "GRACE@example.com".to_string(),
                    ..form
                },
            )
            .await;

        let Err(AccountsServiceError::Validation(errors)) = taken else {
            panic!("expected validation error, got {taken:?}");
        };

        assert_eq!(
            errors.first("email"),
            Some("An account with this email address already exists.")
        );

        let profile = ctx.accounts.get_profile(ada.uuid).await?;

        assert_eq!(profile.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.accounts.get_profile(UserUuid::new()).await;

        assert!(matches!(result, Err(AccountsServiceError::NotFound)));
    }
}
