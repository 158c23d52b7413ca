//! Query interface over the ports, port_usage and ships tables

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::DatabaseConfig;
use crate::db::models::{
    NewPort, NewShip, Port, PortPatch, PortUsage, PortWithUsage, Ship, ShipFilter, ShipPatch,
    UsageFields,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::Result;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the configured database. Foreign keys are enforced.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.foreign_keys(true);

        // Every connection to an in-memory database is a separate database,
        // so those pools hold exactly one connection for their whole life.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(url = %config.url, "Connected to database");
        Ok(Self::new(pool))
    }

    /// Fresh in-memory store with the schema applied
    pub async fn in_memory() -> Result<Self> {
        let store = Self::connect(&DatabaseConfig::in_memory()).await?;
        store.init_schema().await?;
        Ok(store)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<()> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // Ports

    pub async fn list_ports(&self) -> Result<Vec<Port>> {
        let ports = sqlx::query_as::<_, Port>("SELECT * FROM ports ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ports)
    }

    pub async fn get_port(&self, id: i64) -> Result<Option<Port>> {
        let port = sqlx::query_as::<_, Port>("SELECT * FROM ports WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(port)
    }

    pub async fn port_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ports WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// All ports, each joined with its usage row
    pub async fn list_ports_with_usage(&self) -> Result<Vec<PortWithUsage>> {
        let ports = self.list_ports().await?;
        let mut usage: HashMap<i64, PortUsage> = self
            .list_port_usage()
            .await?
            .into_iter()
            .map(|u| (u.port_id, u))
            .collect();

        Ok(ports
            .into_iter()
            .map(|port| PortWithUsage {
                port_usage: usage.remove(&port.id),
                port,
            })
            .collect())
    }

    /// One port joined with its usage row, looked up by the usage foreign key
    pub async fn get_port_with_usage(&self, id: i64) -> Result<Option<PortWithUsage>> {
        let Some(port) = self.get_port(id).await? else {
            return Ok(None);
        };
        let port_usage = self.usage_for_port(port.id).await?;
        Ok(Some(PortWithUsage { port, port_usage }))
    }

    /// Insert a port and its usage row in one transaction
    pub async fn create_port(&self, new: &NewPort) -> Result<PortWithUsage> {
        let mut tx = self.pool.begin().await?;

        let port = sqlx::query_as::<_, Port>(
            r#"
            INSERT INTO ports (
                port_name, port_locode, port_max_vessel_size, port_total_ships, port_country
            ) VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new.port_name)
        .bind(&new.port_locode)
        .bind(&new.port_max_vessel_size)
        .bind(new.port_total_ships)
        .bind(&new.port_country)
        .fetch_one(&mut *tx)
        .await?;

        let usage = insert_usage(&mut *tx, port.id, &new.port_usage).await?;
        tx.commit().await?;

        Ok(PortWithUsage {
            port,
            port_usage: Some(usage),
        })
    }

    pub async fn update_port(&self, id: i64, patch: &PortPatch) -> Result<Option<Port>> {
        let port = sqlx::query_as::<_, Port>(
            r#"
            UPDATE ports SET
                port_max_vessel_size = COALESCE(?, port_max_vessel_size),
                port_total_ships = COALESCE(?, port_total_ships),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(patch.port_max_vessel_size.as_deref())
        .bind(patch.port_total_ships)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(port)
    }

    /// Delete a port's usage row, then the port, in one transaction.
    /// Returns false (and changes nothing) when no such port exists.
    pub async fn delete_port(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM port_usage WHERE port_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM ports WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    // Port usage

    pub async fn list_port_usage(&self) -> Result<Vec<PortUsage>> {
        let usage = sqlx::query_as::<_, PortUsage>("SELECT * FROM port_usage ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(usage)
    }

    pub async fn usage_for_port(&self, port_id: i64) -> Result<Option<PortUsage>> {
        let usage = sqlx::query_as::<_, PortUsage>("SELECT * FROM port_usage WHERE port_id = ?")
            .bind(port_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usage)
    }

    /// Overwrite all nine categories of the usage row owned by `port_id`
    pub async fn replace_usage(
        &self,
        port_id: i64,
        fields: &UsageFields,
    ) -> Result<Option<PortUsage>> {
        let usage = sqlx::query_as::<_, PortUsage>(
            r#"
            UPDATE port_usage SET
                cargo_vessels = ?,
                fishing_vessels = ?,
                various_vessels = ?,
                tanker_vessels = ?,
                tug_offshore_supply_vessels = ?,
                passenger_vessels = ?,
                authority_military_vessels = ?,
                sailing_vessels = ?,
                aid_to_nav_vessels = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE port_id = ?
            RETURNING *
            "#,
        )
        .bind(&fields.cargo_vessels)
        .bind(&fields.fishing_vessels)
        .bind(&fields.various_vessels)
        .bind(&fields.tanker_vessels)
        .bind(&fields.tug_offshore_supply_vessels)
        .bind(&fields.passenger_vessels)
        .bind(&fields.authority_military_vessels)
        .bind(&fields.sailing_vessels)
        .bind(&fields.aid_to_nav_vessels)
        .bind(port_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usage)
    }

    // Ships

    pub async fn list_ships(&self, filter: &ShipFilter) -> Result<Vec<Ship>> {
        let ships = sqlx::query_as::<_, Ship>(
            r#"
            SELECT * FROM ships
            WHERE (? IS NULL OR ship_name = ?)
              AND (? IS NULL OR ship_current_port = ?)
            ORDER BY id
            "#,
        )
        .bind(filter.name.as_deref())
        .bind(filter.name.as_deref())
        .bind(filter.port)
        .bind(filter.port)
        .fetch_all(&self.pool)
        .await?;
        Ok(ships)
    }

    pub async fn get_ship(&self, id: i64) -> Result<Option<Ship>> {
        let ship = sqlx::query_as::<_, Ship>("SELECT * FROM ships WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ship)
    }

    pub async fn create_ship(&self, new: &NewShip) -> Result<Ship> {
        let ship = sqlx::query_as::<_, Ship>(
            r#"
            INSERT INTO ships (
                ship_name, ship_country, ship_type, ship_length, ship_imo,
                ship_status, ship_mmsi_callsign, ship_current_port
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new.ship_name)
        .bind(&new.ship_country)
        .bind(&new.ship_type)
        .bind(&new.ship_length)
        .bind(&new.ship_imo)
        .bind(&new.ship_status)
        .bind(&new.ship_mmsi_callsign)
        .bind(new.ship_current_port)
        .fetch_one(&self.pool)
        .await?;
        Ok(ship)
    }

    pub async fn update_ship(&self, id: i64, patch: &ShipPatch) -> Result<Option<Ship>> {
        let ship = sqlx::query_as::<_, Ship>(
            r#"
            UPDATE ships SET
                ship_country = COALESCE(?, ship_country),
                ship_type = COALESCE(?, ship_type),
                ship_status = COALESCE(?, ship_status),
                ship_current_port = COALESCE(?, ship_current_port),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(patch.ship_country.as_deref())
        .bind(patch.ship_type.as_deref())
        .bind(patch.ship_status.as_deref())
        .bind(patch.ship_current_port)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ship)
    }

    pub async fn delete_ship(&self, id: i64) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM ships WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}

async fn insert_usage(
    conn: &mut SqliteConnection,
    port_id: i64,
    fields: &UsageFields,
) -> std::result::Result<PortUsage, sqlx::Error> {
    sqlx::query_as::<_, PortUsage>(
        r#"
        INSERT INTO port_usage (
            cargo_vessels, fishing_vessels, various_vessels, tanker_vessels,
            tug_offshore_supply_vessels, passenger_vessels, authority_military_vessels,
            sailing_vessels, aid_to_nav_vessels, port_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&fields.cargo_vessels)
    .bind(&fields.fishing_vessels)
    .bind(&fields.various_vessels)
    .bind(&fields.tanker_vessels)
    .bind(&fields.tug_offshore_supply_vessels)
    .bind(&fields.passenger_vessels)
    .bind(&fields.authority_military_vessels)
    .bind(&fields.sailing_vessels)
    .bind(&fields.aid_to_nav_vessels)
    .bind(port_id)
    .fetch_one(conn)
    .await
}
