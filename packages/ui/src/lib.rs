//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{
    delete_account, redirect, sign_in, sign_out, sign_up, use_auth, AuthProvider, LogoutButton,
    Session,
};

mod guard;
pub use guard::RequireAuth;

mod navbar;
pub use navbar::Navbar;

mod meal_form;
pub use meal_form::MealForm;

mod week_view;
pub use week_view::{WeekNav, WeekView};

mod history_panel;
pub use history_panel::{HistoryPanel, HistoryToggle};
