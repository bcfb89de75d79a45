// src/handlers/payment.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{Admin, RequireRole},
        tenancy::TenantContext,
    },
    models::payment::{
        CardBrand, CreateCardBrandPayload, PaymentDeliveryConfig, UpsertPaymentConfigPayload,
    },
};

// GET /api/payment/config
#[utoipa::path(
    get,
    path = "/api/payment/config",
    tag = "Payment",
    responses(
        (status = 200, description = "Configuração de pagamento na entrega", body = PaymentDeliveryConfig)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn get_config(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let config = app_state
        .payment_service
        .get_config(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(config)))
}

// PUT /api/payment/config
#[utoipa::path(
    put,
    path = "/api/payment/config",
    tag = "Payment",
    request_body = UpsertPaymentConfigPayload,
    responses(
        (status = 200, description = "Configuração salva", body = PaymentDeliveryConfig),
        (status = 403, description = "Apenas admin")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn upsert_config(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Json(payload): Json<UpsertPaymentConfigPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let config = app_state
        .payment_service
        .upsert_config(tenant.0, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(config)))
}

// GET /api/payment/card-brands
#[utoipa::path(
    get,
    path = "/api/payment/card-brands",
    tag = "Payment",
    responses(
        (status = 200, description = "Bandeiras cadastradas", body = Vec<CardBrand>)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_card_brands(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let brands = app_state
        .payment_service
        .list_card_brands(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(brands)))
}

// POST /api/payment/card-brands
#[utoipa::path(
    post,
    path = "/api/payment/card-brands",
    tag = "Payment",
    request_body = CreateCardBrandPayload,
    responses(
        (status = 201, description = "Bandeira cadastrada", body = CardBrand),
        (status = 409, description = "Bandeira já cadastrada")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_card_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Json(payload): Json<CreateCardBrandPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let brand = app_state
        .payment_service
        .create_card_brand(tenant.0, &payload.name)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(brand)))
}
