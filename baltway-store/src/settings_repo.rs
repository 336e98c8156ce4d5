use async_trait::async_trait;
use sqlx::PgPool;

use baltway_core::repository::{SettingsRepository, StoreError};
use baltway_core::settings::SiteSettings;

/// The settings table holds exactly one row.
const SINGLETON_ID: i32 = 1;

pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    phone: String,
    address: Option<String>,
    company_name: Option<String>,
    company_description: Option<String>,
    telegram: Option<String>,
    whatsapp: Option<String>,
    instagram: Option<String>,
}

impl From<SettingsRow> for SiteSettings {
    fn from(row: SettingsRow) -> Self {
        SiteSettings {
            phone: row.phone,
            address: row.address,
            company_name: row.company_name,
            company_description: row.company_description,
            telegram: row.telegram,
            whatsapp: row.whatsapp,
            instagram: row.instagram,
        }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get(&self) -> Result<SiteSettings, StoreError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT phone, address, company_name, company_description, \
             telegram, whatsapp, instagram \
             FROM site_settings WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(row) => Ok(row.into()),
            // First read seeds the record with defaults.
            None => self.replace(SiteSettings::default()).await,
        }
    }

    async fn replace(&self, settings: SiteSettings) -> Result<SiteSettings, StoreError> {
        let row: SettingsRow = sqlx::query_as(
            "INSERT INTO site_settings \
             (id, phone, address, company_name, company_description, telegram, whatsapp, instagram) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
             phone = EXCLUDED.phone, address = EXCLUDED.address, \
             company_name = EXCLUDED.company_name, \
             company_description = EXCLUDED.company_description, \
             telegram = EXCLUDED.telegram, whatsapp = EXCLUDED.whatsapp, \
             instagram = EXCLUDED.instagram, updated_at = NOW() \
             RETURNING phone, address, company_name, company_description, \
             telegram, whatsapp, instagram",
        )
        .bind(SINGLETON_ID)
        .bind(&settings.phone)
        .bind(&settings.address)
        .bind(&settings.company_name)
        .bind(&settings.company_description)
        .bind(&settings.telegram)
        .bind(&settings.whatsapp)
        .bind(&settings.instagram)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }
}
