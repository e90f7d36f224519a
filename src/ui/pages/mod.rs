//! Application pages module
//!
//! - Login and register (signed out)
//! - Dashboard, events admin, units, AARs, new AAR and pricing (signed in)

mod aars;
mod dashboard;
mod events;
mod login;
mod new_aar;
mod not_found;
mod pricing;
mod register;
mod units;

pub use aars::AarsPage;
pub use dashboard::DashboardPage;
pub use events::EventsAdminPage;
pub use login::LoginPage;
pub use new_aar::NewAarPage;
pub use not_found::NotFoundPage;
pub use pricing::PricingPage;
pub use register::RegisterPage;
pub use units::UnitsPage;
