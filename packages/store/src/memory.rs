use std::sync::{Arc, Mutex};

use crate::api::DietApi;
use crate::error::ApiError;
use crate::models::{Meal, MealDraft, NewAccount, User};

/// In-memory DietApi for testing.
///
/// Behaves like the real backend seen through the wire contract: a session is
/// either present or not, meal ids are assigned server-side, and created or
/// updated records are echoed back canonically. Every trait call bumps a
/// request counter so tests can assert that client-side validation short-
/// circuits before the network, and [`fail_next`](MemoryApi::fail_next)
/// injects a one-shot failure.
#[derive(Clone, Debug, Default)]
pub struct MemoryApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    /// Signed-in user id; the stand-in for the session cookie.
    session: Option<String>,
    meals: Vec<Meal>,
    next_meal_id: u64,
    requests: u32,
    fail_next: Option<ApiError>,
}

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account without signing it in.
    pub fn with_account(self, user: User, password: &str) -> Self {
        self.inner.lock().unwrap().accounts.push(Account {
            user,
            password: password.to_string(),
        });
        self
    }

    /// Put a meal on the "server" directly, bypassing the request counter.
    pub fn seed_meal(&self, meal: Meal) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_meal_id = inner.next_meal_id.max(meal.id);
        inner.meals.push(meal);
    }

    /// Make the next trait call fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.inner.lock().unwrap().fail_next = Some(err);
    }

    /// How many requests have reached the "server".
    pub fn request_count(&self) -> u32 {
        self.inner.lock().unwrap().requests
    }
}

impl Inner {
    fn begin(&mut self) -> Result<(), ApiError> {
        self.requests += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn require_session(&self) -> Result<&str, ApiError> {
        self.session.as_deref().ok_or(ApiError::Unauthorized)
    }
}

impl DietApi for MemoryApi {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        let Some(id) = inner.session.clone() else {
            return Ok(None);
        };
        Ok(inner
            .accounts
            .iter()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        let account = inner
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
            .ok_or(ApiError::Unauthorized)?;
        let id = account.user.id.clone();
        inner.session = Some(id);
        Ok(())
    }

    async fn register(&self, account: &NewAccount) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        if inner.accounts.iter().any(|a| a.user.email == account.email) {
            return Err(ApiError::Status {
                status: 409,
                message: "email already registered".to_string(),
            });
        }
        let user = User {
            id: format!("u{}", inner.accounts.len() + 1),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            photo_url: account.photo_url.clone(),
            weight: None,
            height: None,
            goal: None,
        };
        inner.accounts.push(Account {
            user,
            password: account.password.clone(),
        });
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        inner.session = None;
        Ok(())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        let id = inner.require_session()?.to_string();
        inner.accounts.retain(|a| a.user.id != id);
        inner.session = None;
        inner.meals.clear();
        Ok(())
    }

    async fn list_meals(&self) -> Result<Vec<Meal>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        inner.require_session()?;
        Ok(inner.meals.clone())
    }

    async fn create_meal(&self, draft: &MealDraft) -> Result<Meal, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        inner.require_session()?;
        inner.next_meal_id += 1;
        let meal = Meal {
            id: inner.next_meal_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            date: draft.date,
            time: draft.time,
            on_diet: draft.on_diet,
            calories: draft.calories,
        };
        inner.meals.push(meal.clone());
        Ok(meal)
    }

    async fn update_meal(&self, id: u64, draft: &MealDraft) -> Result<Meal, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        inner.require_session()?;
        let slot = inner
            .meals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "meal not found".to_string(),
            })?;
        *slot = Meal {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            date: draft.date,
            time: draft.time,
            on_diet: draft.on_diet,
            calories: draft.calories,
        };
        Ok(slot.clone())
    }

    async fn delete_meal(&self, id: u64) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;
        inner.require_session()?;
        if !inner.meals.iter().any(|m| m.id == id) {
            return Err(ApiError::Status {
                status: 404,
                message: "meal not found".to_string(),
            });
        }
        inner.meals.retain(|m| m.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, SubmitError, ValidationError};
    use crate::meals::{ChangeKind, MealStore};
    use crate::session::SessionStore;
    use chrono::{NaiveDate, NaiveTime};

    fn ada() -> User {
        User {
            id: "u1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@b.com".to_string(),
            photo_url: None,
            weight: Some(62.0),
            height: Some(170.0),
            goal: Some("keep weight".to_string()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, day: NaiveDate, h: u32, min: u32) -> MealDraft {
        MealDraft {
            name: name.to_string(),
            description: String::new(),
            date: day,
            time: NaiveTime::from_hms_opt(h, min, 0).unwrap(),
            on_diet: true,
            calories: Some(500),
        }
    }

    async fn signed_in_store(api: &MemoryApi) -> MealStore<MemoryApi> {
        let mut session = SessionStore::new(api.clone());
        session.sign_in("a@b.com", "x").await.unwrap();
        MealStore::new(api.clone())
    }

    #[tokio::test]
    async fn test_initial_session_check() {
        let api = MemoryApi::new();
        let mut session = SessionStore::new(api);

        // Before the first check resolves the session reports loading.
        assert!(session.is_loading());
        session.load_current_user().await.unwrap();
        assert!(!session.is_loading());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_and_reload() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut session = SessionStore::new(api);

        session.sign_in("a@b.com", "x").await.unwrap();
        assert_eq!(session.user().unwrap().email, "a@b.com");
        assert!(!session.is_loading());

        // The session survives an idempotent re-check.
        session.load_current_user().await.unwrap();
        assert!(session.user().is_some());
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut session = SessionStore::new(api);

        let err = session.sign_in("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(session.user().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_sign_up_auto_authenticates() {
        let api = MemoryApi::new();
        let mut session = SessionStore::new(api);

        session
            .sign_up(NewAccount {
                email: "new@b.com".to_string(),
                password: "secret".to_string(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                photo_url: None,
            })
            .await
            .unwrap();
        assert_eq!(session.user().unwrap().first_name, "Grace");
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut session = SessionStore::new(api);

        let err = session
            .sign_up(NewAccount {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Again".to_string(),
                photo_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Api(ApiError::Status { status: 409, .. })));
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_user_even_when_server_errs() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut session = SessionStore::new(api.clone());
        session.sign_in("a@b.com", "x").await.unwrap();

        api.fail_next(ApiError::Network("connection reset".to_string()));
        assert!(session.sign_out().await.is_err());
        assert!(session.user().is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_delete_account_failure_keeps_session() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut session = SessionStore::new(api.clone());
        session.sign_in("a@b.com", "x").await.unwrap();

        api.fail_next(ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(session.delete_account().await.is_err());
        assert!(session.user().is_some());

        session.delete_account().await.unwrap();
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_future_dated_drafts_never_reach_the_server() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);
        let before = api.request_count();

        let err = meals
            .add_meal_on(draft("Dinner", date(2025, 3, 13), 19, 0), today)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmitError::Validation(ValidationError::FutureDate {
                date: date(2025, 3, 13)
            })
        );
        let err = meals
            .update_meal_on(1, draft("Dinner", date(2025, 4, 1), 19, 0), today)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));

        assert_eq!(api.request_count(), before);
        assert!(meals.meals().is_empty());
        assert!(meals.history().is_empty());
    }

    #[tokio::test]
    async fn test_add_meal_lands_sorted_in_its_day_bucket() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        meals.add_meal_on(draft("Breakfast", today, 8, 0), today).await.unwrap();
        meals.add_meal_on(draft("Dinner", today, 19, 30), today).await.unwrap();
        let lunch = meals.add_meal_on(draft("Lunch", today, 12, 30), today).await.unwrap();

        assert_eq!(meals.meals().len(), 3);
        assert_eq!(meals.meals().iter().filter(|m| m.id == lunch.id).count(), 1);

        let view = meals.view_for(today);
        let bucket = view.days.iter().find(|d| d.date == today).unwrap();
        assert_eq!(bucket.meals.len(), 3);
        assert_eq!(bucket.meals[1].id, lunch.id);
        let total: usize = view.days.iter().map(|d| d.meals.len()).sum();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_update_meal_replaces_by_id() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        let breakfast = meals.add_meal_on(draft("Breakfast", today, 8, 0), today).await.unwrap();
        meals.add_meal_on(draft("Lunch", today, 12, 0), today).await.unwrap();

        // Moving breakfast to the evening re-sorts it behind lunch.
        let moved = meals
            .update_meal_on(breakfast.id, draft("Late breakfast", today, 21, 0), today)
            .await
            .unwrap();
        assert_eq!(moved.id, breakfast.id);
        assert_eq!(meals.meals().len(), 2);
        assert_eq!(meals.meals()[1].id, breakfast.id);
        assert_eq!(meals.meals()[1].name, "Late breakfast");
    }

    #[tokio::test]
    async fn test_update_deleted_meal_propagates_the_404() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        let err = meals
            .update_meal_on(99, draft("Ghost", today, 9, 0), today)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Api(ApiError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_delete_meal_removes_everywhere_and_records_history() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        let lunch = meals.add_meal_on(draft("Lunch", today, 12, 30), today).await.unwrap();
        meals.delete_meal(&lunch).await.unwrap();

        assert!(meals.meals().iter().all(|m| m.id != lunch.id));
        assert!(!meals.view_for(today).contains(lunch.id));

        let entry = meals.history().last().unwrap();
        assert_eq!(entry.kind, ChangeKind::Deleted);
        assert_eq!(entry.meal, lunch);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_local_state_alone() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        let lunch = meals.add_meal_on(draft("Lunch", today, 12, 30), today).await.unwrap();
        let history_len = meals.history().len();

        api.fail_next(ApiError::Network("timeout".to_string()));
        assert!(meals.delete_meal(&lunch).await.is_err());
        assert_eq!(meals.meals().len(), 1);
        assert_eq!(meals.history().len(), history_len);
    }

    #[tokio::test]
    async fn test_load_week_failure_keeps_stale_data() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        meals.add_meal_on(draft("Lunch", today, 12, 0), today).await.unwrap();
        meals.load_week(0).await.unwrap();
        assert!(meals.is_loaded());

        api.fail_next(ApiError::Network("offline".to_string()));
        assert!(meals.load_week(-1).await.is_err());
        assert_eq!(meals.meals().len(), 1);
    }

    #[tokio::test]
    async fn test_week_offset_changes_do_not_refetch() {
        let api = MemoryApi::new().with_account(ada(), "x");
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        meals.add_meal_on(draft("Lunch", today, 12, 0), today).await.unwrap();
        let before = api.request_count();

        meals.set_week_offset(-1);
        let last_week = meals.view_for(today);
        meals.set_week_offset(0);
        let this_week = meals.view_for(today);

        assert_eq!(api.request_count(), before);
        assert!(last_week.days.iter().all(|d| d.meals.is_empty()));
        assert!(this_week.contains(meals.meals()[0].id));
    }

    #[tokio::test]
    async fn test_load_week_is_idempotent() {
        let api = MemoryApi::new().with_account(ada(), "x");
        api.seed_meal(Meal {
            id: 7,
            name: "Soup".to_string(),
            description: String::new(),
            date: date(2025, 3, 12),
            time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            on_diet: true,
            calories: None,
        });
        let mut meals = signed_in_store(&api).await;
        let today = date(2025, 3, 12);

        meals.load_week(0).await.unwrap();
        let first = meals.view_for(today);
        meals.load_week(0).await.unwrap();
        let second = meals.view_for(today);
        assert_eq!(first, second);
    }
}
