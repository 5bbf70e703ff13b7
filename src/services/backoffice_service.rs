use std::str::FromStr;

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ColumnType, Condition, DatabaseConnection,
    EntityTrait, IntoActiveModel, Order, PaginatorTrait, PrimaryKeyTrait, QueryFilter,
    QueryOrder, Value,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::entities::{
    matatu_entity as matatus, notification_entity as notifications,
    passenger_trip_entity as passenger_trips, payment_entity as payments, route_entity as routes,
    sacco_entity as saccos, trip_entity as trips, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::PaginatedResponse;

/// Generic list/detail/create/delete over the registered models.
#[derive(Clone)]
pub struct BackofficeService {
    pool: DatabaseConnection,
}

impl BackofficeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub fn registrations(&self) -> Vec<ModelAdmin> {
        AdminModel::ALL.iter().map(AdminModel::admin).collect()
    }

    pub async fn list(
        &self,
        model: AdminModel,
        query: &ListQuery,
    ) -> AppResult<PaginatedResponse<Json>> {
        let admin = model.admin();
        let db = &self.pool;
        match model {
            AdminModel::Users => list_rows::<users::Entity>(db, &admin, query).await,
            AdminModel::Saccos => list_rows::<saccos::Entity>(db, &admin, query).await,
            AdminModel::Matatus => list_rows::<matatus::Entity>(db, &admin, query).await,
            AdminModel::Routes => list_rows::<routes::Entity>(db, &admin, query).await,
            AdminModel::Trips => list_rows::<trips::Entity>(db, &admin, query).await,
            AdminModel::PassengerTrips => {
                list_rows::<passenger_trips::Entity>(db, &admin, query).await
            }
            AdminModel::Payments => list_rows::<payments::Entity>(db, &admin, query).await,
            AdminModel::Notifications => {
                list_rows::<notifications::Entity>(db, &admin, query).await
            }
        }
    }

    pub async fn get(&self, model: AdminModel, id: i32) -> AppResult<Json> {
        let db = &self.pool;
        match model {
            AdminModel::Users => get_row::<users::Entity>(db, model, id).await,
            AdminModel::Saccos => get_row::<saccos::Entity>(db, model, id).await,
            AdminModel::Matatus => get_row::<matatus::Entity>(db, model, id).await,
            AdminModel::Routes => get_row::<routes::Entity>(db, model, id).await,
            AdminModel::Trips => get_row::<trips::Entity>(db, model, id).await,
            AdminModel::PassengerTrips => get_row::<passenger_trips::Entity>(db, model, id).await,
            AdminModel::Payments => get_row::<payments::Entity>(db, model, id).await,
            AdminModel::Notifications => get_row::<notifications::Entity>(db, model, id).await,
        }
    }

    /// Users come in through signup and notifications through publish; the
    /// other models are created from their JSON representation.
    pub async fn create(&self, model: AdminModel, body: Json) -> AppResult<Json> {
        let db = &self.pool;
        let row = match model {
            AdminModel::Saccos => create_row::<NewSacco, saccos::ActiveModel>(db, body).await?,
            AdminModel::Matatus => create_row::<NewMatatu, matatus::ActiveModel>(db, body).await?,
            AdminModel::Routes => create_row::<NewRoute, routes::ActiveModel>(db, body).await?,
            AdminModel::Trips => create_row::<NewTrip, trips::ActiveModel>(db, body).await?,
            AdminModel::PassengerTrips => {
                create_row::<NewPassengerTrip, passenger_trips::ActiveModel>(db, body).await?
            }
            AdminModel::Payments => {
                create_row::<NewPayment, payments::ActiveModel>(db, body).await?
            }
            AdminModel::Users | AdminModel::Notifications => {
                return Err(AppError::ValidationError(format!(
                    "{} cannot be created here",
                    model.as_str()
                )));
            }
        };
        log::info!("Back-office created a {} row", model.as_str());
        Ok(row)
    }

    pub async fn delete(&self, model: AdminModel, id: i32) -> AppResult<()> {
        let db = &self.pool;
        let deleted = match model {
            AdminModel::Users => users::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::Saccos => saccos::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::Matatus => matatus::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::Routes => routes::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::Trips => trips::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::PassengerTrips => {
                passenger_trips::Entity::delete_by_id(id).exec(db).await?
            }
            AdminModel::Payments => payments::Entity::delete_by_id(id).exec(db).await?,
            AdminModel::Notifications => notifications::Entity::delete_by_id(id).exec(db).await?,
        };
        if deleted.rows_affected == 0 {
            return Err(not_found(model, id));
        }
        log::info!("Back-office deleted {} {id}", model.as_str());
        Ok(())
    }
}

async fn list_rows<E>(
    db: &DatabaseConnection,
    admin: &ModelAdmin,
    query: &ListQuery,
) -> AppResult<PaginatedResponse<Json>>
where
    E: EntityTrait,
    E::Model: Serialize + Send + Sync,
{
    let mut select = E::find();

    for (field, raw) in &query.filters {
        if !admin.list_filter.contains(&field.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Cannot filter {} by {field}",
                admin.model.as_str()
            )));
        }
        let column = column::<E>(field)?;
        select = select.filter(column.eq(filter_value(column, field, raw)?));
    }

    if let Some(term) = &query.search {
        if admin.search_fields.is_empty() {
            return Err(AppError::ValidationError(format!(
                "{} is not searchable",
                admin.model.as_str()
            )));
        }
        // case-insensitive on every backend
        let pattern = format!("%{}%", term.to_lowercase());
        let mut any = Condition::any();
        for field in admin.search_fields {
            let column = column::<E>(field)?;
            any = any.add(
                Expr::expr(Func::lower(Expr::col((E::default(), column)))).like(pattern.as_str()),
            );
        }
        select = select.filter(any);
    }

    let (field, order) = match admin.ordering.strip_prefix('-') {
        Some(field) => (field, Order::Desc),
        None => (admin.ordering, Order::Asc),
    };
    select = select.order_by(column::<E>(field)?, order);

    let per_page = query.pagination.get_per_page();
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(query.pagination.get_page() - 1).await?;

    let items = rows
        .into_iter()
        .map(|row| project(serde_json::to_value(row)?, admin.list_display))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(PaginatedResponse::new(items, &query.pagination, total))
}

async fn get_row<E>(db: &DatabaseConnection, model: AdminModel, id: i32) -> AppResult<Json>
where
    E: EntityTrait,
    E::Model: Serialize,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let row = E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(model, id))?;
    Ok(serde_json::to_value(row)?)
}

async fn create_row<D, A>(db: &DatabaseConnection, body: Json) -> AppResult<Json>
where
    D: DeserializeOwned + IntoActiveModel<A>,
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Serialize,
{
    let new: D = serde_json::from_value(body)
        .map_err(|e| AppError::ValidationError(format!("Invalid body: {e}")))?;
    let row = new.into_active_model().insert(db).await?;
    Ok(serde_json::to_value(row)?)
}

fn column<E: EntityTrait>(field: &str) -> AppResult<E::Column> {
    E::Column::from_str(field)
        .map_err(|_| AppError::InternalError(format!("Unknown column {field}")))
}

/// Converts a query-string value to the column's type.
fn filter_value<C: ColumnTrait>(column: C, field: &str, raw: &str) -> AppResult<Value> {
    let invalid = || AppError::ValidationError(format!("Invalid value for {field}: {raw}"));
    let value = match column.def().get_column_type() {
        ColumnType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Value::from(true),
            "0" | "false" | "no" => Value::from(false),
            _ => return Err(invalid()),
        },
        ColumnType::Integer | ColumnType::SmallInteger | ColumnType::TinyInteger => {
            Value::from(raw.parse::<i32>().map_err(|_| invalid())?)
        }
        ColumnType::BigInteger => Value::from(raw.parse::<i64>().map_err(|_| invalid())?),
        ColumnType::Double | ColumnType::Float => {
            Value::from(raw.parse::<f64>().map_err(|_| invalid())?)
        }
        _ => Value::from(raw.to_string()),
    };
    Ok(value)
}

/// Keeps `id` plus the displayed fields; an empty list keeps everything.
fn project(row: Json, list_display: &[&str]) -> AppResult<Json> {
    if list_display.is_empty() {
        return Ok(row);
    }
    let Json::Object(mut fields) = row else {
        return Err(AppError::InternalError(
            "Row did not serialize to an object".to_string(),
        ));
    };
    let mut out = serde_json::Map::new();
    for key in std::iter::once("id").chain(list_display.iter().copied()) {
        if let Some(value) = fields.remove(key) {
            out.insert(key.to_string(), value);
        }
    }
    Ok(Json::Object(out))
}

fn not_found(model: AdminModel, id: i32) -> AppError {
    AppError::NotFound(format!("{} {id} not found", model.as_str()))
}
