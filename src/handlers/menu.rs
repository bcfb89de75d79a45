// src/handlers/menu.rs

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
    models::menu::{CreateProdutoPayload, Produto},
};

// GET /api/menu/products (inclui inativos)
#[utoipa::path(
    get,
    path = "/api/menu/products",
    tag = "Menu",
    responses(
        (status = 200, description = "Produtos da empresa", body = Vec<Produto>)
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .menu_service
        .list_products(tenant.0, false)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(products)))
}

// POST /api/menu/products
#[utoipa::path(
    post,
    path = "/api/menu/products",
    tag = "Menu",
    request_body = CreateProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 400, description = "Dados inválidos")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _guard: RequireRole<Admin>,
    Json(payload): Json<CreateProdutoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let product = app_state
        .menu_service
        .create_product(tenant.0, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(product)))
}
