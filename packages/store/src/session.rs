//! Session lifecycle: the single source of truth for "who is logged in".
//!
//! [`SessionStore`] owns the cached [`User`] and a `loading` flag, and proxies
//! every mutating operation to the backend through [`DietApi`]. The loading
//! discipline is the module's one hard invariant: `loading` is `true` for the
//! entire duration of any operation that can change the user, and returns to
//! `false` exactly when the outcome is known, success or failure. Consumers
//! (the route guard, pages) must not render protected content while it is
//! `true`, or the user sees a flash of the logged-out state before the initial
//! session check resolves.

use crate::api::DietApi;
use crate::error::{ApiError, AuthError};
use crate::models::{NewAccount, User};

/// Client-side session state over a cookie-bearing remote API.
///
/// The client never sees a token; the session rides on an opaque cookie
/// managed by the [`DietApi`] implementation.
#[derive(Clone, Debug)]
pub struct SessionStore<A: DietApi> {
    api: A,
    user: Option<User>,
    loading: bool,
}

impl<A: DietApi> SessionStore<A> {
    /// A fresh session: unauthenticated, with `loading` already `true` so the
    /// guard shows its placeholder until the first
    /// [`load_current_user`](Self::load_current_user) resolves.
    pub fn new(api: A) -> Self {
        Self {
            api,
            user: None,
            loading: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Flip the loading flag on ahead of an operation.
    ///
    /// Views that run session operations on a cloned store publish this state
    /// first, so guards see `loading` while the request is in flight.
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Ask the server who is signed in. Idempotent.
    ///
    /// A 401 or an empty user list is the normal unauthenticated answer, not
    /// an error. Any other failure surfaces as [`AuthError`] with the session
    /// left unauthenticated.
    pub async fn load_current_user(&mut self) -> Result<(), AuthError> {
        self.loading = true;
        let result = match self.api.current_user().await {
            Ok(user) => {
                self.user = user;
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                self.user = None;
                Ok(())
            }
            Err(err) => {
                self.user = None;
                Err(AuthError::Api(err))
            }
        };
        self.loading = false;
        result
    }

    /// Send credentials, then reload the current-user record.
    ///
    /// On any failure the session stays unauthenticated; a 401 maps to
    /// [`AuthError::InvalidCredentials`].
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.loading = true;
        let result = self.sign_in_inner(email, password).await;
        if result.is_err() {
            self.user = None;
        }
        self.loading = false;
        result
    }

    async fn sign_in_inner(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.api
            .login(email, password)
            .await
            .map_err(AuthError::from_login)?;
        self.user = self.api.current_user().await?;
        Ok(())
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// Registration does not itself establish a session on this backend, so a
    /// successful sign-up ends authenticated via the follow-up sign-in.
    pub async fn sign_up(&mut self, account: NewAccount) -> Result<(), AuthError> {
        self.loading = true;
        let result = async {
            self.api.register(&account).await?;
            Ok(())
        }
        .await;
        self.loading = false;

        match result {
            Ok(()) => self.sign_in(&account.email, &account.password).await,
            Err(err) => Err(AuthError::Api(err)),
        }
    }

    /// Invalidate the session. The local user is cleared unconditionally; the
    /// server notification is best-effort and its failure is still returned so
    /// the caller may log it.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.loading = true;
        let result = self.api.logout().await;
        self.user = None;
        self.loading = false;
        result.map_err(AuthError::Api)
    }

    /// Request deletion of the signed-in account.
    ///
    /// On success the session is cleared. On failure the user is left in
    /// place: the account's server-side state is unknown, and keeping the
    /// session lets the user retry.
    pub async fn delete_account(&mut self) -> Result<(), AuthError> {
        self.loading = true;
        let result = self.api.delete_account().await;
        if result.is_ok() {
            self.user = None;
        }
        self.loading = false;
        result.map_err(AuthError::Api)
    }
}
