use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use common::CountryName;

use crate::{
    Country, CountryFilter, Result, SortOrder,
    store::{CountryStore, StoreStatus},
};

const COLUMNS: &str = "name, capital, region, population, currency_code, \
                       exchange_rate, estimated_gdp, flag_url, last_refreshed_at";

/// PostgreSQL-backed country store implementation.
#[derive(Clone)]
pub struct PgCountryStore {
    pool: PgPool,
}

impl PgCountryStore {
    /// Creates a new PostgreSQL country store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_country(row: PgRow) -> Result<Country> {
        Ok(Country {
            name: CountryName::new(row.try_get::<String, _>("name")?),
            capital: row.try_get("capital")?,
            region: row.try_get("region")?,
            population: row.try_get("population")?,
            currency_code: row.try_get("currency_code")?,
            exchange_rate: row.try_get("exchange_rate")?,
            estimated_gdp: row.try_get("estimated_gdp")?,
            flag_url: row.try_get("flag_url")?,
            last_refreshed_at: row.try_get::<DateTime<Utc>, _>("last_refreshed_at")?,
        })
    }
}

#[async_trait]
impl CountryStore for PgCountryStore {
    async fn upsert_batch(&self, records: Vec<Country>) -> Result<()> {
        // One transaction for the whole batch; nothing is visible unless
        // every record lands.
        let mut tx = self.pool.begin().await?;

        for record in &records {
            // The stored display name is the identity and is deliberately
            // left out of the update set.
            sqlx::query(
                r#"
                INSERT INTO countries (name_key, name, capital, region, population,
                                       currency_code, exchange_rate, estimated_gdp,
                                       flag_url, last_refreshed_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (name_key) DO UPDATE SET
                    capital = EXCLUDED.capital,
                    region = EXCLUDED.region,
                    population = EXCLUDED.population,
                    currency_code = EXCLUDED.currency_code,
                    exchange_rate = EXCLUDED.exchange_rate,
                    estimated_gdp = EXCLUDED.estimated_gdp,
                    flag_url = EXCLUDED.flag_url,
                    last_refreshed_at = EXCLUDED.last_refreshed_at
                "#,
            )
            .bind(record.name.key())
            .bind(record.name.as_str())
            .bind(&record.capital)
            .bind(&record.region)
            .bind(record.population)
            .bind(&record.currency_code)
            .bind(record.exchange_rate)
            .bind(record.estimated_gdp)
            .bind(&record.flag_url)
            .bind(record.last_refreshed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list(&self, filter: CountryFilter) -> Result<Vec<Country>> {
        let mut sql = format!("SELECT {COLUMNS} FROM countries WHERE 1=1");
        let mut param_count = 0;

        // Build dynamic query
        if filter.region.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND region = ${param_count}"));
        }
        if filter.currency_code.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND currency_code = ${param_count}"));
        }

        match filter.sort {
            Some(SortOrder::EstimatedGdpDesc) => {
                sql.push_str(" ORDER BY estimated_gdp DESC NULLS LAST");
            }
            None => sql.push_str(" ORDER BY name_key ASC"),
        }

        let mut sqlx_query = sqlx::query(&sql);
        if let Some(region) = filter.region {
            sqlx_query = sqlx_query.bind(region);
        }
        if let Some(code) = filter.currency_code {
            sqlx_query = sqlx_query.bind(code);
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_country).collect()
    }

    async fn get(&self, name: &str) -> Result<Option<Country>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {COLUMNS} FROM countries WHERE name_key = $1"))
                .bind(name.to_lowercase())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Self::row_to_country).transpose()
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE name_key = $1")
            .bind(name.to_lowercase())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM countries ORDER BY estimated_gdp DESC NULLS LAST LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_country).collect()
    }

    async fn status(&self) -> Result<StoreStatus> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total, MAX(last_refreshed_at) AS last_refreshed_at FROM countries",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StoreStatus {
            total: row.try_get("total")?,
            last_refreshed_at: row.try_get("last_refreshed_at")?,
        })
    }
}
