//! The client-side contract with the remote Daily Diet API.
//!
//! Every store goes through [`DietApi`], so the same session and meal logic
//! works against the real HTTP backend (the `api` crate) or against
//! [`crate::MemoryApi`] in tests. Session transport is an opaque cookie owned
//! by the implementation; nothing above this trait ever sees a token.

use crate::error::ApiError;
use crate::models::{Meal, MealDraft, NewAccount, User};

/// Async interface over the remote REST API.
pub trait DietApi {
    /// `GET /users` — the current session's user, or `None` when the session
    /// is anonymous (an empty list and a 401 both mean unauthenticated).
    fn current_user(&self) -> impl std::future::Future<Output = Result<Option<User>, ApiError>>;

    /// `POST /users/login` — establish a session cookie.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;

    /// `POST /users` — create an account. Does not itself establish a session.
    fn register(
        &self,
        account: &NewAccount,
    ) -> impl std::future::Future<Output = Result<(), ApiError>>;

    /// `POST /users/logout` — clear the session cookie.
    fn logout(&self) -> impl std::future::Future<Output = Result<(), ApiError>>;

    /// `DELETE /users` — delete the signed-in account.
    fn delete_account(&self) -> impl std::future::Future<Output = Result<(), ApiError>>;

    /// `GET /meals` — the signed-in user's full meal list. The server does no
    /// date filtering; the weekly window is computed client-side.
    fn list_meals(&self) -> impl std::future::Future<Output = Result<Vec<Meal>, ApiError>>;

    /// `POST /meals` — create a meal and return the canonical record.
    fn create_meal(
        &self,
        draft: &MealDraft,
    ) -> impl std::future::Future<Output = Result<Meal, ApiError>>;

    /// `PUT /meals/{id}` — update a meal and return the canonical record.
    fn update_meal(
        &self,
        id: u64,
        draft: &MealDraft,
    ) -> impl std::future::Future<Output = Result<Meal, ApiError>>;

    /// `DELETE /meals/{id}`.
    fn delete_meal(&self, id: u64) -> impl std::future::Future<Output = Result<(), ApiError>>;
}
