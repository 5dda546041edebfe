pub mod api;
pub mod error;
pub mod meals;
pub mod models;
pub mod session;
pub mod week;

mod memory;
pub use memory::MemoryApi;

pub use api::DietApi;
pub use error::{ApiError, AuthError, DeleteError, LoadError, SubmitError, ValidationError};
pub use meals::{ChangeKind, HistoryEntry, MealStore};
pub use models::{Meal, MealDraft, NewAccount, User};
pub use session::SessionStore;
pub use week::{DayBucket, WeeklyView};
