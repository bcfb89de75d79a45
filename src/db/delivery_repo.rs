// src/db/delivery_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    services::delivery_service::DeliveryLookup,
    models::delivery::{
        CreateRegionPayload, DeliveryMethod, ServiceRegion, UpdateRegionPayload,
        UpsertDeliveryMethodPayload,
    },
};

#[derive(Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DELIVERY METHODS
    // =========================================================================

    pub async fn find_method(&self, company_id: Uuid) -> Result<Option<DeliveryMethod>, AppError> {
        let method = sqlx::query_as::<_, DeliveryMethod>(
            "SELECT * FROM delivery_methods WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(method)
    }

    // UPSERT (Insert or Update): uma linha por empresa
    pub async fn upsert_method(
        &self,
        company_id: Uuid,
        input: &UpsertDeliveryMethodPayload,
    ) -> Result<DeliveryMethod, AppError> {
        let method = sqlx::query_as::<_, DeliveryMethod>(
            r#"
            INSERT INTO delivery_methods (company_id, delivery, pickup, eat_in)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id)
            DO UPDATE SET
                delivery = EXCLUDED.delivery,
                pickup = EXCLUDED.pickup,
                eat_in = EXCLUDED.eat_in,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(input.delivery)
        .bind(input.pickup)
        .bind(input.eat_in)
        .fetch_one(&self.pool)
        .await?;
        Ok(method)
    }

    // =========================================================================
    //  REGIÕES DE ATENDIMENTO
    // =========================================================================

    pub async fn list_regions(
        &self,
        company_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<ServiceRegion>, AppError> {
        let regions = sqlx::query_as::<_, ServiceRegion>(
            r#"
            SELECT * FROM regioes_atendimento
            WHERE company_id = $1 AND ($2 = FALSE OR status = TRUE)
            ORDER BY nome
            "#,
        )
        .bind(company_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(regions)
    }

    // Aceita um executor para poder participar da transação de criação de pedido
    pub async fn find_region<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        region_id: Uuid,
    ) -> Result<Option<ServiceRegion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let region = sqlx::query_as::<_, ServiceRegion>(
            "SELECT * FROM regioes_atendimento WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(region_id)
        .fetch_optional(executor)
        .await?;
        Ok(region)
    }

    pub async fn create_region(
        &self,
        company_id: Uuid,
        input: &CreateRegionPayload,
    ) -> Result<ServiceRegion, AppError> {
        let region = sqlx::query_as::<_, ServiceRegion>(
            r#"
            INSERT INTO regioes_atendimento (company_id, nome, valor, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&input.nome)
        .bind(input.valor)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(region)
    }

    pub async fn update_region(
        &self,
        company_id: Uuid,
        region_id: Uuid,
        input: &UpdateRegionPayload,
    ) -> Result<Option<ServiceRegion>, AppError> {
        let region = sqlx::query_as::<_, ServiceRegion>(
            r#"
            UPDATE regioes_atendimento SET
                nome = COALESCE($3, nome),
                valor = COALESCE($4, valor),
                status = COALESCE($5, status)
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(region_id)
        .bind(input.nome.as_deref())
        .bind(input.valor)
        .bind(input.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(region)
    }

    /// Retorna `true` se a região existia.
    pub async fn delete_region(&self, company_id: Uuid, region_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM regioes_atendimento WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(region_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DeliveryLookup for DeliveryRepository {
    async fn active_regions(&self, company_id: Uuid) -> Result<Vec<ServiceRegion>, AppError> {
        self.list_regions(company_id, true).await
    }

    async fn delivery_method(&self, company_id: Uuid) -> Result<Option<DeliveryMethod>, AppError> {
        self.find_method(company_id).await
    }
}
