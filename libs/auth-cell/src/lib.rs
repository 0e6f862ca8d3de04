pub mod login;

pub use login::{landing_page, LoginForm, LoginRedirect};
