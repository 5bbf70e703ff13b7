pub mod backoffice;
pub mod dashboard;
pub mod fleet;
pub mod form;
pub mod notification;
pub mod page;
pub mod payment;
pub mod trip;
pub mod user;

pub use backoffice::*;
pub use dashboard::*;
pub use fleet::*;
pub use form::*;
pub use notification::*;
pub use page::*;
pub use payment::*;
pub use trip::*;
pub use user::*;
