//! Domain models for the admin panel.

mod app;
mod config_form;
mod event;
mod new_user;
mod users;

pub use app::{App, AppState, Command, Key, Notice, Page};
pub use config_form::{ConfigField, ConfigFieldError, ConfigPage};
pub use event::AppEvent;
pub use new_user::{NewUserField, NewUserForm, ValidationError};
pub use users::{UserCounters, UsersPage};
