// src/models/menu.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Produto do cardápio
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Pizza Margherita")]
    pub nome: String,
    #[schema(example = "Molho de tomate, mussarela e manjericão")]
    pub descricao: Option<String>,
    #[schema(example = "49.90")]
    pub preco: Decimal,
    #[schema(example = "Pizzas")]
    pub categoria: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProdutoPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub nome: String,
    pub descricao: Option<String>,
    #[schema(example = "49.90")]
    pub preco: Decimal,
    pub categoria: Option<String>,
}
