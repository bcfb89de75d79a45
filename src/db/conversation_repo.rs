// src/db/conversation_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::conversation::{AiConversationLog, NewConversationLog},
    services::conversation_logger::ConversationLogStore,
};

#[derive(Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_log(&self, entry: &NewConversationLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO ai_conversation_logs
                (company_id, customer_phone, message_type, message_content, tokens_used, response_time_ms)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.company_id)
        .bind(&entry.customer_phone)
        .bind(entry.message_type)
        .bind(&entry.message_content)
        .bind(entry.tokens_used)
        .bind(entry.response_time_ms)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_logs(
        &self,
        company_id: Uuid,
        phone: Option<&str>,
        limit: i64,
    ) -> Result<Vec<AiConversationLog>, AppError> {
        let logs = sqlx::query_as::<_, AiConversationLog>(
            r#"
            SELECT * FROM ai_conversation_logs
            WHERE company_id = $1 AND ($2::text IS NULL OR customer_phone = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(company_id)
        .bind(phone)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    /// Últimas `limit` mensagens da conversa, da mais antiga para a mais nova.
    pub async fn recent_history(
        &self,
        company_id: Uuid,
        phone: &str,
        limit: i64,
    ) -> Result<Vec<AiConversationLog>, AppError> {
        let mut logs = self.list_logs(company_id, Some(phone), limit).await?;
        logs.reverse();
        Ok(logs)
    }
}

#[async_trait]
impl ConversationLogStore for ConversationRepository {
    async fn insert(&self, entry: NewConversationLog) -> Result<(), AppError> {
        self.insert_log(&entry).await
    }
}
