use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app_state::AppState;
use crate::error::AppError;
use crate::store::models::User;
use crate::store::repositories::UserRepository;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The acting user, resolved from the `users` collection via the
/// `X-User-Id` header. Authentication beyond the lookup (sessions, tokens)
/// lives outside this service.
pub struct CurrentActor(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("missing X-User-Id header".to_string()))?;

        let user = UserRepository::find(&state.store, user_id)
            .await?
            .ok_or_else(|| AppError::Authentication(format!("unknown user {user_id}")))?;

        Ok(CurrentActor(user))
    }
}
