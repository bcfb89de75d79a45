// src/handlers/conversations.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::conversation::{AiConversationLog, ConversationQuery},
    services::order_service::clamp_limit,
};

// GET /api/conversations?phone=&limit=
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "Conversations",
    responses(
        (status = 200, description = "Log das conversas do assistente, mais recentes primeiro", body = Vec<AiConversationLog>)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da Empresa"),
        ConversationQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_conversations(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<ConversationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let phone = query.phone.as_deref().map(str::trim).filter(|p| !p.is_empty());

    let logs = app_state
        .conversation_repo
        .list_logs(tenant.0, phone, clamp_limit(query.limit))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(logs)))
}
