use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{NotificationResponse, UserResponse};
use crate::entities::user_entity::UserType;

/// The role dashboards, one per user type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Passenger,
    Conductor,
    Driver,
    Sacco,
    Admin,
}

impl Dashboard {
    pub fn for_user_type(user_type: UserType) -> Self {
        match user_type {
            UserType::Passenger => Dashboard::Passenger,
            UserType::Conductor => Dashboard::Conductor,
            UserType::Driver => Dashboard::Driver,
            UserType::SaccoAdmin => Dashboard::Sacco,
            UserType::SuperAdmin => Dashboard::Admin,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Dashboard::Passenger => "passenger/dashboard.html",
            Dashboard::Conductor => "conductor/dashboard.html",
            Dashboard::Driver => "driver/dashboard.html",
            Dashboard::Sacco => "sacco/dashboard.html",
            Dashboard::Admin => "admin/dashboard.html",
        }
    }

    /// Super admins may open every dashboard; everybody else only their own.
    pub fn admits(&self, user_type: UserType) -> bool {
        user_type == UserType::SuperAdmin || Self::for_user_type(user_type) == *self
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardContext {
    pub user: UserResponse,
    pub role: String,
    pub notifications: Vec<NotificationResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboards_admit_their_own_role() {
        assert!(Dashboard::Driver.admits(UserType::Driver));
        assert!(Dashboard::Sacco.admits(UserType::SaccoAdmin));
        assert!(!Dashboard::Driver.admits(UserType::Conductor));
        assert!(!Dashboard::Admin.admits(UserType::SaccoAdmin));
        assert!(!Dashboard::Passenger.admits(UserType::Driver));
    }

    #[test]
    fn test_super_admin_opens_everything() {
        for dashboard in [
            Dashboard::Passenger,
            Dashboard::Conductor,
            Dashboard::Driver,
            Dashboard::Sacco,
            Dashboard::Admin,
        ] {
            assert!(dashboard.admits(UserType::SuperAdmin));
        }
    }

    #[test]
    fn test_templates_follow_roles() {
        assert_eq!(
            Dashboard::for_user_type(UserType::Driver).template(),
            "driver/dashboard.html"
        );
        assert_eq!(
            Dashboard::for_user_type(UserType::SaccoAdmin).template(),
            "sacco/dashboard.html"
        );
    }
}
