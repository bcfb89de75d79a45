// src/handlers/public.rs
//
// Rotas do cardápio digital. Sem autenticação; a empresa vem do slug.

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
    middleware::i18n::Locale,
    models::{
        company::Company,
        delivery::DeliveryOptions,
        menu::Produto,
        orders::{CreatePedidoPayload, Pedido},
        payment::PaymentOption,
    },
    services::order_service::PedidoPix,
};

async fn active_company(app_state: &AppState, slug: &str, locale: &Locale) -> Result<Company, ApiError> {
    app_state
        .company_service
        .get_active_by_slug(slug)
        .await
        .map_err(|app_err| app_err.to_api_error(locale))
}

#[utoipa::path(
    get,
    path = "/api/public/companies/{slug}",
    tag = "Cardápio",
    responses(
        (status = 200, description = "Dados públicos da empresa", body = Company),
        (status = 404, description = "Empresa não encontrada ou inativa")
    ),
    params(("slug" = String, Path, description = "Slug da empresa"))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = active_company(&app_state, &slug, &locale).await?;
    Ok((StatusCode::OK, Json(company)))
}

#[utoipa::path(
    get,
    path = "/api/public/companies/{slug}/menu",
    tag = "Cardápio",
    responses(
        (status = 200, description = "Produtos ativos", body = Vec<Produto>),
        (status = 404, description = "Empresa não encontrada ou inativa")
    ),
    params(("slug" = String, Path, description = "Slug da empresa"))
)]
pub async fn get_menu(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = active_company(&app_state, &slug, &locale).await?;

    let products = app_state
        .menu_service
        .list_products(company.id, true)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(products)))
}

// Nunca falha depois de achar a empresa: o resolvedor devolve o padrão em caso de erro
#[utoipa::path(
    get,
    path = "/api/public/companies/{slug}/delivery-options",
    tag = "Cardápio",
    responses(
        (status = 200, description = "Resumo de regiões e opções de entrega", body = DeliveryOptions),
        (status = 404, description = "Empresa não encontrada ou inativa")
    ),
    params(("slug" = String, Path, description = "Slug da empresa"))
)]
pub async fn get_delivery_options(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = active_company(&app_state, &slug, &locale).await?;
    let options = app_state.delivery_service.resolve_options(company.id).await;
    Ok((StatusCode::OK, Json(options)))
}

#[utoipa::path(
    get,
    path = "/api/public/companies/{slug}/payment-options",
    tag = "Cardápio",
    responses(
        (status = 200, description = "Formas de pagamento aceitas", body = Vec<PaymentOption>),
        (status = 404, description = "Empresa não encontrada ou inativa")
    ),
    params(("slug" = String, Path, description = "Slug da empresa"))
)]
pub async fn get_payment_options(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = active_company(&app_state, &slug, &locale).await?;
    let options = app_state.payment_service.resolve_options(company.id).await;
    Ok((StatusCode::OK, Json(options)))
}

#[utoipa::path(
    post,
    path = "/api/public/companies/{slug}/orders",
    tag = "Cardápio",
    request_body = CreatePedidoPayload,
    responses(
        (status = 201, description = "Pedido criado", body = Pedido),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Empresa ou região não encontrada")
    ),
    params(("slug" = String, Path, description = "Slug da empresa"))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
    Json(payload): Json<CreatePedidoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let company = active_company(&app_state, &slug, &locale).await?;

    let order = app_state
        .order_service
        .create_order(company.id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/public/companies/{slug}/orders/{id}/pix",
    tag = "Cardápio",
    responses(
        (status = 200, description = "Pix copia e cola do pedido", body = PedidoPix),
        (status = 404, description = "Pedido não encontrado ou empresa sem chave Pix")
    ),
    params(
        ("slug" = String, Path, description = "Slug da empresa"),
        ("id" = Uuid, Path, description = "ID do pedido")
    )
)]
pub async fn get_order_pix(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((slug, order_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let company = active_company(&app_state, &slug, &locale).await?;

    let pix = app_state
        .document_service
        .order_pix(company.id, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(pix)))
}
