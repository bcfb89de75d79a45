// src/handlers/functions.rs
//
// Funções "stateless": recebem JSON, chamam um serviço externo e respondem
// `{ success, ... }`. Erros viram `{ success: false, error }`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::{
    common::error::{AppError, FunctionError},
    config::AppState,
    models::functions::{
        AiChatRequest, AiChatResponse, GeocodeRequest, GeocodeResponse, MegaApiWebhook, WebhookAck,
    },
};

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, FunctionError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()).into())
}

// POST /api/functions/whatsapp-webhook
#[utoipa::path(
    post,
    path = "/api/functions/whatsapp-webhook",
    tag = "Functions",
    request_body = MegaApiWebhook,
    responses(
        (status = 200, description = "Mensagem recebida (processed = false quando ignorada)", body = WebhookAck),
        (status = 500, description = "Falha ao gerar ou enviar a resposta")
    )
)]
pub async fn whatsapp_webhook(
    State(app_state): State<AppState>,
    payload: Result<Json<MegaApiWebhook>, JsonRejection>,
) -> Result<Json<WebhookAck>, FunctionError> {
    let webhook = parse_body(payload)?;

    let processed = app_state.assistant_service.handle_whatsapp(&webhook).await?;

    Ok(Json(WebhookAck { success: true, processed }))
}

// POST /api/functions/ai-chat
#[utoipa::path(
    post,
    path = "/api/functions/ai-chat",
    tag = "Functions",
    request_body = AiChatRequest,
    responses(
        (status = 200, description = "Resposta do assistente", body = AiChatResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Falha na OpenAI ou empresa inexistente")
    )
)]
pub async fn ai_chat(
    State(app_state): State<AppState>,
    payload: Result<Json<AiChatRequest>, JsonRejection>,
) -> Result<Json<AiChatResponse>, FunctionError> {
    let request = parse_body(payload)?;
    request.validate().map_err(AppError::ValidationError)?;

    let reply = app_state
        .assistant_service
        .chat_direct(request.company_id, &request.customer_phone, &request.message)
        .await?;

    Ok(Json(AiChatResponse {
        success: true,
        reply: reply.content,
        tokens_used: reply.tokens_used,
        response_time_ms: reply.response_time_ms,
    }))
}

// POST /api/functions/geocode
#[utoipa::path(
    post,
    path = "/api/functions/geocode",
    tag = "Functions",
    request_body = GeocodeRequest,
    responses(
        (status = 200, description = "Endereço geocodificado", body = GeocodeResponse),
        (status = 400, description = "Endereço inválido ou não encontrado"),
        (status = 500, description = "Falha no Google Maps")
    )
)]
pub async fn geocode(
    State(app_state): State<AppState>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodeResponse>, FunctionError> {
    let request = parse_body(payload)?;
    request.validate().map_err(AppError::ValidationError)?;

    let result = app_state.maps_client.geocode(request.address.trim()).await?;

    Ok(Json(result))
}
