//! Authentication UI module
//!
//! Session context plus the login and registration forms.

mod context;
mod login_form;
mod register_form;

pub use context::{AuthContext, REGISTRATION_FAILED, provide_auth_context, use_auth_context};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
