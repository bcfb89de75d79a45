// src/db/menu_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::menu::{CreateProdutoPayload, Produto},
};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self, company_id: Uuid, only_active: bool) -> Result<Vec<Produto>, AppError> {
        let products = sqlx::query_as::<_, Produto>(
            r#"
            SELECT * FROM produtos
            WHERE company_id = $1 AND ($2 = FALSE OR ativo = TRUE)
            ORDER BY categoria NULLS LAST, nome
            "#,
        )
        .bind(company_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn create_product(
        &self,
        company_id: Uuid,
        input: &CreateProdutoPayload,
    ) -> Result<Produto, AppError> {
        let product = sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (company_id, nome, descricao, preco, categoria)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&input.nome)
        .bind(input.descricao.as_deref())
        .bind(input.preco)
        .bind(input.categoria.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }
}
