// src/models/payment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Configuração de pagamento na entrega (uma linha por empresa)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDeliveryConfig {
    #[schema(ignore)]
    pub company_id: Uuid,
    pub accept_cash: bool,
    pub accept_pix: bool,
    pub accept_card: bool,
    pub ask_card_brand: bool,
    #[schema(example = "12.345.678/0001-99")]
    pub pix_key: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPaymentConfigPayload {
    pub accept_cash: bool,
    pub accept_pix: bool,
    pub accept_card: bool,
    #[serde(default)]
    pub ask_card_brand: bool,
    pub pix_key: Option<String>,
}

// Bandeiras de cartão aceitas (tabela de apoio)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardBrand {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Visa")]
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardBrandPayload {
    #[validate(length(min = 1, message = "O nome da bandeira é obrigatório."))]
    #[schema(example = "Mastercard")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Dinheiro,
    Cartao,
    Pix,
}

// Uma forma de pagamento oferecida ao cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    pub kind: PaymentMethodKind,
    #[schema(example = "Cartão")]
    pub label: String,
    pub ask_card_brand: bool,
    pub card_brands: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}
