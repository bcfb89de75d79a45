// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::orders::{CreatePedidoPayload, Pedido, PedidoQuery, UpdatePedidoStatusPayload},
    services::order_service::PedidoPix,
};

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos mais recentes primeiro", body = Vec<Pedido>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        PedidoQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<PedidoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_orders(tenant.0, query.status, query.limit)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(orders)))
}

// POST /api/orders (PDV)
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreatePedidoPayload,
    responses(
        (status = 201, description = "Pedido criado", body = Pedido),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Região não encontrada")
    ),
    params(("x-company-id" = Uuid, Header, description = "ID da Empresa")),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CreatePedidoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let order = app_state
        .order_service
        .create_order(tenant.0, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedido", body = Pedido),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .get_order(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(order)))
}

// PATCH /api/orders/{id}/status
// Qualquer status pode ser aplicado; não há máquina de estados.
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdatePedidoStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Pedido),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdatePedidoStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .update_status(tenant.0, order_id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(order)))
}

// GET /api/orders/{id}/pix
#[utoipa::path(
    get,
    path = "/api/orders/{id}/pix",
    tag = "Orders",
    responses(
        (status = 200, description = "Pix copia e cola + QR em SVG", body = PedidoPix),
        (status = 404, description = "Pedido não encontrado ou empresa sem chave Pix")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order_pix(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pix = app_state
        .document_service
        .order_pix(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(pix)))
}

// GET /api/orders/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/orders/{id}/receipt",
    tag = "Orders",
    responses(
        (status = 200, description = "Comanda em PDF", content_type = "application/pdf"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_order_pdf(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    // Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"pedido_{}.pdf\"", order_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
