//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use devhub_app::ports::DeviceRepository;
use devhub_domain::device::{Device, DeviceFilter, DevicePatch, DeviceStatus, DeviceType};
use devhub_domain::error::DevHubError;
use devhub_domain::id::DeviceId;
use devhub_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_type: String = row.try_get("device_type")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id,
            name: row.try_get("name")?,
            device_type: DeviceType::from(device_type),
            house_id: row.try_get("house_id")?,
            protocol: row.try_get("protocol")?,
            driver: row.try_get("driver")?,
            location: row.try_get("location")?,
            status: DeviceStatus::from(status),
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn encode_timestamp(at: Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

const INSERT: &str = "INSERT INTO devices (id, name, device_type, house_id, protocol, driver, location, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices";
const ORDER_NEWEST_FIRST: &str = " ORDER BY created_at DESC, rowid DESC";
const UPDATE_RETURNING: &str = "UPDATE devices SET name = COALESCE(?, name), location = COALESCE(?, location), status = COALESCE(?, status), updated_at = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device registry.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(device.device_type.as_str())
                .bind(&device.house_id)
                .bind(&device.protocol)
                .bind(&device.driver)
                .bind(&device.location)
                .bind(device.status.as_str())
                .bind(encode_timestamp(device.created_at))
                .bind(encode_timestamp(device.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find(
        &self,
        filter: DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DevHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut query = QueryBuilder::<Sqlite>::new(SELECT_ALL);
            let mut separator = " WHERE ";
            if let Some(house_id) = filter.house_id {
                query.push(separator).push("house_id = ").push_bind(house_id);
                separator = " AND ";
            }
            if let Some(device_type) = filter.device_type {
                query
                    .push(separator)
                    .push("device_type = ")
                    .push_bind(String::from(device_type));
            }
            query.push(ORDER_NEWEST_FIRST);

            let rows: Vec<Wrapper> = query
                .build_query_as()
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        id: DeviceId,
        patch: DevicePatch,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<Device>, DevHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            // Single statement: the write lock is taken up front.
            let row: Option<Wrapper> = sqlx::query_as(UPDATE_RETURNING)
                .bind(patch.name)
                .bind(patch.location)
                .bind(patch.status.map(String::from))
                .bind(encode_timestamp(at))
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, DevHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
