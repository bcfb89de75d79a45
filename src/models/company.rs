// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "company_plan", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompanyPlan {
    Free,
    Basic,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "company_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Suspended,
}

// ---
// Company (o "Tenant")
// ---
// Um restaurante/loja. Tudo no sistema é isolado por `company_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    #[schema(example = "Pizzaria do João")]
    pub name: String,
    #[schema(example = "pizzaria-do-joao")]
    pub slug: String,
    #[schema(example = "pedidos.pizzariadojoao.com.br")]
    pub domain: Option<String>,
    #[schema(example = "São Paulo")]
    pub city: Option<String>,
    pub plan: CompanyPlan,
    pub status: CompanyStatus,
    // Instância da MegaAPI ligada ao WhatsApp da loja
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_instance: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    #[schema(example = "Pizzaria do João")]
    pub name: String,
    // Se omitido, é gerado a partir do nome
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub city: Option<String>,
    pub plan: Option<CompanyPlan>,
    pub whatsapp_instance: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub city: Option<String>,
    pub plan: Option<CompanyPlan>,
    pub status: Option<CompanyStatus>,
    pub whatsapp_instance: Option<String>,
}
