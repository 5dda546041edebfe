mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod meals;
pub use meals::Meals;

mod profile;
pub use profile::Profile;

mod not_found;
pub use not_found::NotFound;
