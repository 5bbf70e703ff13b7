pub mod auth_service;
pub mod backoffice_service;
pub mod notification_service;
pub mod user_service;

pub use auth_service::*;
pub use backoffice_service::*;
pub use notification_service::*;
pub use user_service::*;
