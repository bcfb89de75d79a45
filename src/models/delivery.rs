// src/models/delivery.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. DeliveryMethod (uma linha por empresa, via UPSERT)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMethod {
    #[schema(ignore)]
    pub company_id: Uuid,
    pub delivery: bool,
    pub pickup: bool,
    pub eat_in: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDeliveryMethodPayload {
    pub delivery: bool,
    pub pickup: bool,
    pub eat_in: bool,
}

// ---
// 2. ServiceRegion (regiões de atendimento e suas taxas)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegion {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Centro")]
    pub nome: String,
    // Taxa de entrega. Zero = entrega grátis.
    #[schema(example = "5.00")]
    pub valor: Decimal,
    // Região ativa?
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegionPayload {
    #[validate(length(min = 1, message = "O nome da região é obrigatório."))]
    #[schema(example = "Centro")]
    pub nome: String,
    #[schema(example = "5.00")]
    pub valor: Decimal,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionPayload {
    pub nome: Option<String>,
    pub valor: Option<Decimal>,
    pub status: Option<bool>,
}

fn default_true() -> bool {
    true
}

// ---
// 3. Resultado do resolvedor de opções de entrega
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOptionKind {
    Delivery,
    Pickup,
    EatIn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub kind: DeliveryOptionKind,
    #[schema(example = "Entrega")]
    pub label: String,
    #[schema(example = "Taxa a partir de R$ 5,00")]
    pub description: String,
    // Menor taxa cobrada (apenas para `delivery`)
    pub fee: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySummary {
    pub has_delivery: bool,
    pub total_regions: usize,
    pub free_regions_count: usize,
    pub has_free_delivery: bool,
    pub all_regions_free: bool,
    pub some_regions_free: bool,
    pub min_fee: Option<Decimal>,
    pub max_fee: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOptions {
    pub summary: DeliverySummary,
    pub options: Vec<DeliveryOption>,
}
