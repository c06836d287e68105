//! Update Profile Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::accounts::{ValidationErrors, data::ProfileForm};

use crate::{
    accounts::{errors::into_api_error, profile::UserResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Profile Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,

    /// `YYYY-MM-DD`; blank clears it
    pub date_of_birth: Option<String>,

    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl TryFrom<UpdateProfileRequest> for ProfileForm {
    type Error = ValidationErrors;

    fn try_from(request: UpdateProfileRequest) -> Result<Self, Self::Error> {
        let date_of_birth = match request.date_of_birth.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let Ok(date) = raw.parse::<Date>() else {
                    let mut errors = ValidationErrors::default();

                    errors.add("date_of_birth", "Enter a valid date.");

                    return Err(errors);
                };

                Some(date)
            }
        };

        Ok(ProfileForm {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            date_of_birth,
            address_line_1: request.address_line_1,
            address_line_2: request.address_line_2,
            city: request.city,
            state: request.state,
            country: request.country,
            postal_code: request.postal_code,
        })
    }
}

/// Profile Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileUpdatedResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Update Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
    ),
)]
#[tracing::instrument(
    name = "accounts.update_profile",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let form = ProfileForm::try_from(json.into_inner()).map_err(ApiError::Validation)?;

    let updated = state
        .app
        .accounts
        .update_profile(user, form)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Your profile has been updated successfully!".to_string(),
        user: updated.into(),
    }))
}
