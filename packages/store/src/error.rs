//! Error taxonomy for the client.
//!
//! [`ApiError`] is the transport-level error every [`crate::DietApi`] method
//! returns; it lives here so the trait does not pull an HTTP crate into the
//! domain core. The remaining types map one operation family each: session
//! operations fail with [`AuthError`], fetching the meal list with
//! [`LoadError`], create/update with [`SubmitError`] (which also carries the
//! pre-network [`ValidationError`]), and delete with [`DeleteError`].
//!
//! A 401 on the "who am I" check is not an error: it is the normal
//! unauthenticated signal and is handled inside
//! [`crate::SessionStore::load_current_user`]. No error is retried
//! automatically; the user re-triggers the action.

use chrono::NaiveDate;
use thiserror::Error;

/// Transport-level failure from the remote API.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 401 for an operation that requires a session.
    #[error("not authenticated")]
    Unauthorized,
    /// Any other non-success HTTP status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
}

/// Failure of a session operation (sign-in, sign-up, sign-out, delete-account).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication failed: {0}")]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Map a login failure: a 401 means bad credentials, everything else is
    /// a server-side problem.
    pub(crate) fn from_login(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => AuthError::InvalidCredentials,
            other => AuthError::Api(other),
        }
    }
}

/// The meal list could not be fetched. Previously loaded data is kept.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("could not load meals: {0}")]
pub struct LoadError(#[from] pub ApiError);

/// A meal draft was rejected before any network call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("meal date {date} is in the future")]
    FutureDate { date: NaiveDate },
}

/// A meal create or update did not go through.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("the server rejected the meal: {0}")]
    Api(#[from] ApiError),
}

/// A meal delete did not go through. Local state is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("could not delete the meal: {0}")]
pub struct DeleteError(#[from] pub ApiError);
