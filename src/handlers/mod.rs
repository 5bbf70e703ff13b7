pub mod auth;
pub mod backoffice;
pub mod dashboard;
pub mod page;

pub use auth::auth_config;
pub use backoffice::backoffice_config;
pub use dashboard::dashboard_config;
