//! Framework-free domain logic: records, REST access, caching and form rules

pub mod aar_form;
pub mod analytics;
pub mod api;
#[cfg(feature = "ssr")]
pub mod config;
pub mod events;
pub mod models;
pub mod notification;
pub mod pricing;
#[cfg(feature = "ssr")]
pub mod proxy;
pub mod query_cache;
pub mod registration;
pub mod session;
pub mod units;
pub mod validation;

pub use models::*;
pub use notification::{Notification, NotificationType};
