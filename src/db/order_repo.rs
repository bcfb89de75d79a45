// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::orders::{CreatePedidoPayload, Pedido, PedidoItem, PedidoStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // O número do pedido é sequencial por empresa; a subquery pega o próximo.
    // Dois inserts concorrentes podem colidir: a UNIQUE (company_id, numero) barra o segundo.
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        input: &CreatePedidoPayload,
        itens: &[PedidoItem],
        taxa_entrega: Decimal,
        total: Decimal,
    ) -> Result<Pedido, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Pedido>(
            r#"
            INSERT INTO pedidos (
                company_id, numero, tipo, cliente_nome, cliente_telefone, endereco,
                forma_pagamento, taxa_entrega, total, itens, observacoes
            )
            VALUES (
                $1,
                (SELECT COALESCE(MAX(numero), 0) + 1 FROM pedidos WHERE company_id = $1),
                $2, $3, $4, $5, $6, $7, $8, $9, $10
            )
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(input.tipo)
        .bind(input.cliente_nome.as_deref())
        .bind(input.cliente_telefone.as_deref())
        .bind(input.endereco.as_deref())
        .bind(input.forma_pagamento.as_deref())
        .bind(taxa_entrega)
        .bind(total)
        .bind(Json(itens))
        .bind(input.observacoes.as_deref())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Pedido simultâneo detectado, tente novamente.".into());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn find_order(&self, company_id: Uuid, order_id: Uuid) -> Result<Option<Pedido>, AppError> {
        let order = sqlx::query_as::<_, Pedido>(
            "SELECT * FROM pedidos WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn list_orders(
        &self,
        company_id: Uuid,
        status: Option<PedidoStatus>,
        limit: i64,
    ) -> Result<Vec<Pedido>, AppError> {
        let orders = sqlx::query_as::<_, Pedido>(
            r#"
            SELECT * FROM pedidos
            WHERE company_id = $1 AND ($2::pedido_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(company_id)
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    // Sem máquina de estados: qualquer status pode ser gravado.
    pub async fn update_status(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        status: PedidoStatus,
    ) -> Result<Option<Pedido>, AppError> {
        let order = sqlx::query_as::<_, Pedido>(
            r#"
            UPDATE pedidos SET status = $3, updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(order_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}
