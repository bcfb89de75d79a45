// src/db/payment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    services::payment_service::PaymentLookup,
    models::payment::{CardBrand, PaymentDeliveryConfig, UpsertPaymentConfigPayload},
};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_config(&self, company_id: Uuid) -> Result<Option<PaymentDeliveryConfig>, AppError> {
        let config = sqlx::query_as::<_, PaymentDeliveryConfig>(
            "SELECT * FROM payment_delivery_config WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(config)
    }

    pub async fn upsert_config(
        &self,
        company_id: Uuid,
        input: &UpsertPaymentConfigPayload,
    ) -> Result<PaymentDeliveryConfig, AppError> {
        let config = sqlx::query_as::<_, PaymentDeliveryConfig>(
            r#"
            INSERT INTO payment_delivery_config
                (company_id, accept_cash, accept_pix, accept_card, ask_card_brand, pix_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (company_id)
            DO UPDATE SET
                accept_cash = EXCLUDED.accept_cash,
                accept_pix = EXCLUDED.accept_pix,
                accept_card = EXCLUDED.accept_card,
                ask_card_brand = EXCLUDED.ask_card_brand,
                pix_key = EXCLUDED.pix_key,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(input.accept_cash)
        .bind(input.accept_pix)
        .bind(input.accept_card)
        .bind(input.ask_card_brand)
        .bind(input.pix_key.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(config)
    }

    pub async fn list_card_brands(&self, company_id: Uuid) -> Result<Vec<CardBrand>, AppError> {
        let brands = sqlx::query_as::<_, CardBrand>(
            "SELECT * FROM card_brands WHERE company_id = $1 ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(brands)
    }

    pub async fn active_card_brand_names(&self, company_id: Uuid) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM card_brands WHERE company_id = $1 AND active = TRUE ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    pub async fn create_card_brand(&self, company_id: Uuid, name: &str) -> Result<CardBrand, AppError> {
        sqlx::query_as::<_, CardBrand>(
            "INSERT INTO card_brands (company_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(company_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("A bandeira '{}' já está cadastrada.", name));
                }
            }
            AppError::DatabaseError(e)
        })
    }
}

#[async_trait]
impl PaymentLookup for PaymentRepository {
    async fn payment_config(&self, company_id: Uuid) -> Result<Option<PaymentDeliveryConfig>, AppError> {
        self.find_config(company_id).await
    }

    async fn card_brand_names(&self, company_id: Uuid) -> Result<Vec<String>, AppError> {
        self.active_card_brand_names(company_id).await
    }
}
