use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kernel::model::id::UserId;
use shared::error::AppError;

/// Caller identity taken from the `x-user-id` header put there by the
/// authenticating reverse proxy. The scheduler treats it as an opaque
/// string and never inspects it beyond equality.
pub struct RequestedUser(UserId);

impl RequestedUser {
    pub fn id(&self) -> UserId {
        self.0.clone()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::UnauthenticatedUser)?;
        Ok(Self(UserId::new(user_id)))
    }
}
