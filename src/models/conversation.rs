// src/models/conversation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    User,
    Assistant,
}

// Linha do log (append-only) das conversas com o assistente de IA
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiConversationLog {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "5511999998888")]
    pub customer_phone: String,
    pub message_type: MessageType,
    pub message_content: String,
    pub tokens_used: Option<i32>,
    pub response_time_ms: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Uma linha a ser gravada.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversationLog {
    pub company_id: Uuid,
    pub customer_phone: String,
    pub message_type: MessageType,
    pub message_content: String,
    pub tokens_used: Option<i32>,
    pub response_time_ms: Option<i32>,
}

/// Um turno completo: a pergunta do cliente e a resposta do assistente.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub company_id: Uuid,
    pub customer_phone: String,
    pub user_message: String,
    pub assistant_reply: String,
    pub tokens_used: Option<i32>,
    pub response_time_ms: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversationQuery {
    /// Filtra por telefone do cliente
    pub phone: Option<String>,
    /// Máximo de linhas (padrão 50, máximo 500)
    pub limit: Option<i64>,
}
