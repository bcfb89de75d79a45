// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pedido_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PedidoStatus {
    Pendente,
    Confirmado,
    Preparando,
    SaiuEntrega,
    Entregue,
    Cancelado,
}

impl PedidoStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PedidoStatus::Pendente => "Pendente",
            PedidoStatus::Confirmado => "Confirmado",
            PedidoStatus::Preparando => "Em preparo",
            PedidoStatus::SaiuEntrega => "Saiu para entrega",
            PedidoStatus::Entregue => "Entregue",
            PedidoStatus::Cancelado => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pedido_tipo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PedidoTipo {
    Delivery,
    Retirada,
    Local,
}

// Item do pedido, gravado como JSONB dentro do próprio pedido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PedidoItem {
    pub produto_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O nome do item é obrigatório."))]
    #[schema(example = "Pizza Margherita")]
    pub nome: String,
    #[validate(range(min = 1, max = 999, message = "A quantidade deve estar entre 1 e 999."))]
    #[schema(example = 2)]
    pub quantidade: i32,
    #[schema(example = "49.90")]
    pub preco_unitario: Decimal,
    pub observacao: Option<String>,
}

impl PedidoItem {
    /// `None` quando a multiplicação estoura o `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.preco_unitario.checked_mul(Decimal::from(self.quantidade))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = 42)]
    pub numero: i32,
    pub status: PedidoStatus,
    pub tipo: PedidoTipo,
    pub cliente_nome: Option<String>,
    pub cliente_telefone: Option<String>,
    pub endereco: Option<String>,
    #[schema(example = "pix")]
    pub forma_pagamento: Option<String>,
    #[schema(example = "5.00")]
    pub taxa_entrega: Decimal,
    #[schema(example = "104.80")]
    pub total: Decimal,
    #[schema(value_type = Vec<PedidoItem>)]
    pub itens: Json<Vec<PedidoItem>>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePedidoPayload {
    pub tipo: PedidoTipo,
    pub cliente_nome: Option<String>,
    pub cliente_telefone: Option<String>,
    pub endereco: Option<String>,
    pub forma_pagamento: Option<String>,
    // Região escolhida (define a taxa de entrega quando tipo = delivery)
    pub regiao_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."), nested)]
    pub itens: Vec<PedidoItem>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePedidoStatusPayload {
    pub status: PedidoStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PedidoQuery {
    /// Filtra por status
    pub status: Option<PedidoStatus>,
    /// Máximo de linhas (padrão 50, máximo 500)
    pub limit: Option<i64>,
}
