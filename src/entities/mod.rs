pub mod matatus;
pub mod notification_recipients;
pub mod notification_saccos;
pub mod notifications;
pub mod passenger_trips;
pub mod payments;
pub mod routes;
pub mod rules;
pub mod saccos;
pub mod sessions;
pub mod trips;
pub mod users;

pub use matatus as matatu_entity;
pub use notifications as notification_entity;
pub use passenger_trips as passenger_trip_entity;
pub use payments as payment_entity;
pub use routes as route_entity;
pub use saccos as sacco_entity;
pub use sessions as session_entity;
pub use trips as trip_entity;
pub use users as user_entity;
