pub mod auth;
pub mod common;
pub mod header;
pub mod icon;
pub mod layout;
pub mod notifications;
pub mod pages;
pub mod query;
pub mod sidebar;

pub use icon::{Icon, icons};
pub use layout::AppLayout;
pub use notifications::{NotificationsContainer, provide_notifications};
pub use query::provide_query_client;
