pub mod identity;
pub mod pagination;
pub mod password;
pub mod phone;

pub use identity::*;
pub use pagination::*;
pub use password::*;
pub use phone::*;
