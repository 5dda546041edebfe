//! The weekly meal view-model: a local mirror of the server's meal list plus
//! its derived 7-day projection.
//!
//! [`MealStore`] keeps one flat list, sorted by `(date, time, id)`, and
//! reconciles it in place after every create/update/delete instead of
//! refetching. [`set_week_offset`](MealStore::set_week_offset) only moves the
//! window: the projection is recomputed from the already-loaded list, and the
//! network is hit again only on an explicit refresh. `GET /meals` returns the
//! full list, so no offset can point at meals the store has not seen.
//!
//! Every local change is recorded in a modification history
//! ([`HistoryEntry`]) for the audit panel.

use chrono::{NaiveDate, NaiveDateTime, Weekday};

use crate::api::DietApi;
use crate::error::{DeleteError, LoadError, SubmitError};
use crate::models::{Meal, MealDraft};
use crate::week::{self, WeeklyView};

/// What a [`HistoryEntry`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }
}

/// One local audit record: the kind of change, a snapshot of the meal as it
/// was when the change succeeded, and when it happened.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub kind: ChangeKind,
    pub meal: Meal,
    pub at: NaiveDateTime,
}

/// In-memory meal list for the signed-in user, windowed by week.
#[derive(Clone, Debug)]
pub struct MealStore<A: DietApi> {
    api: A,
    /// Flat list mirroring server state, sorted by `(date, time, id)`.
    meals: Vec<Meal>,
    week_offset: i32,
    week_starts_on: Weekday,
    history: Vec<HistoryEntry>,
    loaded: bool,
}

impl<A: DietApi> MealStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            meals: Vec::new(),
            week_offset: 0,
            week_starts_on: Weekday::Mon,
            history: Vec::new(),
            loaded: false,
        }
    }

    /// Change which weekday opens the 7-day window (default Monday).
    pub fn with_week_start(mut self, weekday: Weekday) -> Self {
        self.week_starts_on = weekday;
        self
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn week_offset(&self) -> i32 {
        self.week_offset
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Whether the first fetch has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the full meal list and point the window at `offset`.
    ///
    /// On failure the previously loaded list is kept and the error goes back
    /// to the caller. Stale data beats an empty page.
    pub async fn load_week(&mut self, offset: i32) -> Result<(), LoadError> {
        self.week_offset = offset;
        let mut meals = self.api.list_meals().await.map_err(LoadError)?;
        meals.sort_by_key(Meal::sort_key);
        self.meals = meals;
        self.loaded = true;
        Ok(())
    }

    /// Move the 7-day window. Never refetches; the projection is recomputed
    /// from the loaded list.
    pub fn set_week_offset(&mut self, offset: i32) {
        self.week_offset = offset;
    }

    /// The current 7-day projection.
    pub fn weekly_view(&self) -> WeeklyView {
        self.view_for(week::today())
    }

    /// The projection with the clock pinned — the testable form of
    /// [`weekly_view`](Self::weekly_view).
    pub fn view_for(&self, today: NaiveDate) -> WeeklyView {
        WeeklyView::project(&self.meals, today, self.week_offset, self.week_starts_on)
    }

    /// Validate, post, and splice the server's canonical record into the list.
    pub async fn add_meal(&mut self, draft: MealDraft) -> Result<Meal, SubmitError> {
        self.add_meal_on(draft, week::today()).await
    }

    /// [`add_meal`](Self::add_meal) with the clock pinned for tests.
    pub async fn add_meal_on(
        &mut self,
        draft: MealDraft,
        today: NaiveDate,
    ) -> Result<Meal, SubmitError> {
        draft.validate(today)?;
        let meal = self.api.create_meal(&draft).await?;
        self.insert_sorted(meal.clone());
        self.record(ChangeKind::Created, meal.clone());
        Ok(meal)
    }

    /// Validate, put, and replace the matching record by id.
    ///
    /// Editing a meal that was deleted server-side concurrently is not
    /// special: the server's 404 comes back as [`SubmitError::Api`] and local
    /// state is untouched.
    pub async fn update_meal(&mut self, id: u64, draft: MealDraft) -> Result<Meal, SubmitError> {
        self.update_meal_on(id, draft, week::today()).await
    }

    /// [`update_meal`](Self::update_meal) with the clock pinned for tests.
    pub async fn update_meal_on(
        &mut self,
        id: u64,
        draft: MealDraft,
        today: NaiveDate,
    ) -> Result<Meal, SubmitError> {
        draft.validate(today)?;
        let meal = self.api.update_meal(id, &draft).await?;
        self.meals.retain(|m| m.id != id);
        self.insert_sorted(meal.clone());
        self.record(ChangeKind::Updated, meal.clone());
        Ok(meal)
    }

    /// Delete on the server, then drop the meal from the list and record a
    /// history entry with the snapshot. Local state is unchanged on failure.
    pub async fn delete_meal(&mut self, meal: &Meal) -> Result<(), DeleteError> {
        self.api.delete_meal(meal.id).await.map_err(DeleteError)?;
        self.meals.retain(|m| m.id != meal.id);
        self.record(ChangeKind::Deleted, meal.clone());
        Ok(())
    }

    /// Insert keeping the `(date, time, id)` order, so day buckets come out
    /// sorted by time without a second pass.
    fn insert_sorted(&mut self, meal: Meal) {
        let at = self
            .meals
            .partition_point(|m| m.sort_key() < meal.sort_key());
        self.meals.insert(at, meal);
    }

    fn record(&mut self, kind: ChangeKind, meal: Meal) {
        self.history.push(HistoryEntry {
            kind,
            meal,
            at: chrono::Local::now().naive_local(),
        });
    }
}
