//! # API crate — the HTTP client for the Daily Diet backend
//!
//! [`HttpApi`] implements [`store::DietApi`] against the remote REST API.
//! The session rides on an opaque cookie: on native targets the client keeps
//! a cookie store, on WASM every request is sent with
//! `credentials: include` so the browser attaches the session cookie itself.
//! The client never reads or stores a token.
//!
//! Endpoints follow the backend contract:
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/users` | `{users: [...]}`; the first element is the signed-in user; 401 and an empty list both mean "anonymous", not an error |
//! | `POST` | `/users/login` | `{email, password}`; sets the session cookie |
//! | `POST` | `/users` | create an account |
//! | `POST` | `/users/logout` | clears the session cookie |
//! | `DELETE` | `/users` | deletes the signed-in account |
//! | `GET` | `/meals` | `{meals: [...]}` for the signed-in user |
//! | `POST` / `PUT` / `DELETE` | `/meals`, `/meals/{id}` | bodies mirror [`store::Meal`] |

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use store::{ApiError, DietApi, Meal, MealDraft, NewAccount, User};

/// Base URL baked in at compile time, overridable with `DIET_API_URL`.
const DEFAULT_BASE_URL: &str = "/api/v1";

/// HTTP implementation of [`DietApi`].
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::from_env()
    }
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client");
        #[cfg(target_arch = "wasm32")]
        let client = Client::new();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Client pointed at `DIET_API_URL` (compile-time), or `/api/v1`.
    pub fn from_env() -> Self {
        Self::new(option_env!("DIET_API_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        // The browser only attaches the session cookie when asked to.
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(transport)?;
        check_status(response).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Vec<Meal>,
}

impl DietApi for HttpApi {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let response = self
            .request(Method::GET, "/users")
            .send()
            .await
            .map_err(transport)?;
        // A 401 here is the normal "anonymous session" answer.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let response = check_status(response).await?;
        let envelope: UsersEnvelope = response.json().await.map_err(transport)?;
        Ok(envelope.users.into_iter().next())
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.send(
            self.request(Method::POST, "/users/login")
                .json(&LoginRequest { email, password }),
        )
        .await?;
        Ok(())
    }

    async fn register(&self, account: &NewAccount) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, "/users").json(account))
            .await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, "/users/logout")).await?;
        Ok(())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, "/users")).await?;
        Ok(())
    }

    async fn list_meals(&self) -> Result<Vec<Meal>, ApiError> {
        let response = self.send(self.request(Method::GET, "/meals")).await?;
        let envelope: MealsEnvelope = response.json().await.map_err(transport)?;
        Ok(envelope.meals)
    }

    async fn create_meal(&self, draft: &MealDraft) -> Result<Meal, ApiError> {
        let response = self
            .send(self.request(Method::POST, "/meals").json(draft))
            .await?;
        response.json().await.map_err(transport)
    }

    async fn update_meal(&self, id: u64, draft: &MealDraft) -> Result<Meal, ApiError> {
        let response = self
            .send(self.request(Method::PUT, &format!("/meals/{id}")).json(draft))
            .await?;
        response.json().await.map_err(transport)
    }

    async fn delete_meal(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/meals/{id}")))
            .await?;
        Ok(())
    }
}
