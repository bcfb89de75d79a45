// src/handlers/delivery.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
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
    models::delivery::{
        CreateRegionPayload, DeliveryMethod, ServiceRegion, UpdateRegionPayload,
        UpsertDeliveryMethodPayload,
    },
};

// GET /api/delivery/methods
#[utoipa::path(
    get,
    path = "/api/delivery/methods",
    tag = "Delivery",
    responses(
        (status = 200, description = "Métodos de entrega da empresa", body = DeliveryMethod)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn get_methods(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let method = app_state
        .delivery_service
        .get_method(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(method)))
}

// PUT /api/delivery/methods
#[utoipa::path(
    put,
    path = "/api/delivery/methods",
    tag = "Delivery",
    request_body = UpsertDeliveryMethodPayload,
    responses(
        (status = 200, description = "Métodos de entrega salvos", body = DeliveryMethod),
        (status = 403, description = "Apenas admin")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn upsert_methods(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Json(payload): Json<UpsertDeliveryMethodPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let method = app_state
        .delivery_service
        .upsert_method(tenant.0, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(method)))
}

// GET /api/delivery/regions
#[utoipa::path(
    get,
    path = "/api/delivery/regions",
    tag = "Delivery",
    responses(
        (status = 200, description = "Regiões de atendimento (ativas e inativas)", body = Vec<ServiceRegion>)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_regions(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let regions = app_state
        .delivery_service
        .list_regions(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(regions)))
}

// POST /api/delivery/regions
#[utoipa::path(
    post,
    path = "/api/delivery/regions",
    tag = "Delivery",
    request_body = CreateRegionPayload,
    responses(
        (status = 201, description = "Região criada", body = ServiceRegion),
        (status = 400, description = "Dados inválidos")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_region(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Json(payload): Json<CreateRegionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let region = app_state
        .delivery_service
        .create_region(tenant.0, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(region)))
}

// PUT /api/delivery/regions/{id}
#[utoipa::path(
    put,
    path = "/api/delivery/regions/{id}",
    tag = "Delivery",
    request_body = UpdateRegionPayload,
    responses(
        (status = 200, description = "Região atualizada", body = ServiceRegion),
        (status = 404, description = "Região não encontrada")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID da região")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_region(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Path(region_id): Path<Uuid>,
    Json(payload): Json<UpdateRegionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let region = app_state
        .delivery_service
        .update_region(tenant.0, region_id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(region)))
}

// DELETE /api/delivery/regions/{id}
#[utoipa::path(
    delete,
    path = "/api/delivery/regions/{id}",
    tag = "Delivery",
    responses(
        (status = 204, description = "Região removida"),
        (status = 404, description = "Região não encontrada")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID da região")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_region(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Path(region_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .delivery_service
        .delete_region(tenant.0, region_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
