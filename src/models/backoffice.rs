use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::AppError;
use crate::utils::PaginationParams;

/// Models exposed in the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminModel {
    Users,
    Saccos,
    Matatus,
    Routes,
    Trips,
    PassengerTrips,
    Payments,
    Notifications,
}

impl AdminModel {
    pub const ALL: [AdminModel; 8] = [
        AdminModel::Users,
        AdminModel::Saccos,
        AdminModel::Matatus,
        AdminModel::Routes,
        AdminModel::Trips,
        AdminModel::PassengerTrips,
        AdminModel::Payments,
        AdminModel::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminModel::Users => "users",
            AdminModel::Saccos => "saccos",
            AdminModel::Matatus => "matatus",
            AdminModel::Routes => "routes",
            AdminModel::Trips => "trips",
            AdminModel::PassengerTrips => "passenger_trips",
            AdminModel::Payments => "payments",
            AdminModel::Notifications => "notifications",
        }
    }

    pub fn admin(&self) -> ModelAdmin {
        let (list_display, list_filter, search_fields, ordering): (
            &'static [&'static str],
            &'static [&'static str],
            &'static [&'static str],
            &'static str,
        ) = match self {
            AdminModel::Users => (
                &["phone_number", "first_name", "last_name", "user_type", "is_verified"],
                &["user_type", "is_active", "is_verified"],
                &["phone_number", "id_number", "email"],
                "-date_joined",
            ),
            AdminModel::Matatus => (
                &["plate_number", "fleet_number", "sacco_id", "vehicle_type", "current_driver_id"],
                &["vehicle_type", "sacco_id"],
                &["plate_number", "fleet_number"],
                "plate_number",
            ),
            AdminModel::Saccos => (
                &["name", "registration_number", "contact_phone"],
                &[],
                &["name", "registration_number"],
                "name",
            ),
            AdminModel::Trips => (
                &["matatu_id", "route_id", "status", "scheduled_departure"],
                &["status", "route_id"],
                &[],
                "-scheduled_departure",
            ),
            AdminModel::Routes
            | AdminModel::PassengerTrips
            | AdminModel::Payments
            | AdminModel::Notifications => (&[], &[], &[], "-id"),
        };

        ModelAdmin {
            model: *self,
            list_display,
            list_filter,
            search_fields,
            ordering,
        }
    }
}

impl FromStr for AdminModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("No back-office model named '{s}'")))
    }
}

/// List configuration for one model.
///
/// An empty `list_display` shows every column. `ordering` names a column,
/// prefixed with `-` for descending order.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub model: AdminModel,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub ordering: &'static str,
}

/// Parsed `?page=&per_page=&q=&<filter>=` query of a list request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub pagination: PaginationParams,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn from_params(params: HashMap<String, String>) -> Result<Self, AppError> {
        let mut query = ListQuery::default();
        for (key, value) in params {
            match key.as_str() {
                "page" => query.pagination.page = Some(parse_number(&key, &value)?),
                "per_page" => query.pagination.per_page = Some(parse_number(&key, &value)?),
                "q" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        query.search = Some(term.to_string());
                    }
                }
                _ => {
                    query.filters.insert(key, value);
                }
            }
        }
        Ok(query)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, AppError> {
    value
        .parse()
        .map_err(|_| AppError::ValidationError(format!("{key} must be a positive number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names_round_trip() {
        for model in AdminModel::ALL {
            assert_eq!(model.as_str().parse::<AdminModel>().unwrap(), model);
        }
        assert!("wallets".parse::<AdminModel>().is_err());
    }

    #[test]
    fn test_user_admin_configuration() {
        let admin = AdminModel::Users.admin();
        assert_eq!(admin.list_filter, ["user_type", "is_active", "is_verified"]);
        assert!(admin.search_fields.contains(&"id_number"));
        assert!(AdminModel::Payments.admin().list_display.is_empty());
    }

    #[test]
    fn test_list_query_splits_reserved_keys() {
        let params = HashMap::from([
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "  KDA ".to_string()),
            ("vehicle_type".to_string(), "bus".to_string()),
        ]);
        let query = ListQuery::from_params(params).unwrap();
        assert_eq!(query.pagination.page, Some(2));
        assert_eq!(query.search.as_deref(), Some("KDA"));
        assert_eq!(query.filters.get("vehicle_type").map(String::as_str), Some("bus"));

        let bad = HashMap::from([("per_page".to_string(), "lots".to_string())]);
        assert!(ListQuery::from_params(bad).is_err());
    }
}
