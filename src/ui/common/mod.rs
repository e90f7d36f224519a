//! Common reusable UI components
//!
//! Form fields, dialogs, spinners and banners shared by the pages.

pub mod form;
pub mod message;
pub mod modal;
pub mod spinner;

pub use form::{FormField, SelectField, TextAreaField};
pub use message::{EmptyState, ErrorMessage, QueryError};
pub use modal::{BaseModal, ConfirmDialog};
pub use spinner::{InlineSpinner, LoadingSpinner, Spinner, SpinnerSize};
