// src/services/conversation_logger.rs

use std::sync::Arc;

use async_trait::async_trait;
use crate::{
    common::error::AppError,
    models::conversation::{ConversationTurn, MessageType, NewConversationLog},
};

/// Destino das linhas de log. Em produção é o `ConversationRepository`.
#[async_trait]
pub trait ConversationLogStore: Send + Sync {
    async fn insert(&self, entry: NewConversationLog) -> Result<(), AppError>;
}

/// Grava cada turno da conversa como duas linhas independentes
/// (`user` e depois `assistant`). Não há transação entre elas: se a segunda
/// falhar, a primeira fica gravada sozinha.
#[derive(Clone)]
pub struct ConversationLogger {
    store: Arc<dyn ConversationLogStore>,
}

impl ConversationLogger {
    pub fn new(store: Arc<dyn ConversationLogStore>) -> Self {
        Self { store }
    }

    /// Retorna quantas linhas foram gravadas (0, 1 ou 2). Erros só são logados.
    pub async fn log_turn(&self, turn: ConversationTurn) -> usize {
        let user_entry = NewConversationLog {
            company_id: turn.company_id,
            customer_phone: turn.customer_phone.clone(),
            message_type: MessageType::User,
            message_content: turn.user_message,
            tokens_used: None,
            response_time_ms: None,
        };

        if let Err(e) = self.store.insert(user_entry).await {
            tracing::error!(
                "❌ Falha ao gravar mensagem do cliente {} (empresa {}): {}",
                turn.customer_phone, turn.company_id, e
            );
            return 0;
        }

        let assistant_entry = NewConversationLog {
            company_id: turn.company_id,
            customer_phone: turn.customer_phone.clone(),
            message_type: MessageType::Assistant,
            message_content: turn.assistant_reply,
            tokens_used: turn.tokens_used,
            response_time_ms: turn.response_time_ms,
        };

        if let Err(e) = self.store.insert(assistant_entry).await {
            tracing::error!(
                "❌ Falha ao gravar resposta para {} (empresa {}): {}",
                turn.customer_phone, turn.company_id, e
            );
            return 1;
        }

        2
    }

    /// Dispara a gravação em segundo plano; quem chamou segue sem esperar.
    pub fn spawn_log_turn(&self, turn: ConversationTurn) {
        let logger = self.clone();
        tokio::spawn(async move {
            logger.log_turn(turn).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Guarda as linhas em memória; pode falhar a partir da N-ésima inserção.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<NewConversationLog>>,
        fail_from: Option<usize>,
    }

    #[async_trait]
    impl ConversationLogStore for MemoryStore {
        async fn insert(&self, entry: NewConversationLog) -> Result<(), AppError> {
            let mut rows = self.rows.lock().unwrap();
            if self.fail_from.is_some_and(|n| rows.len() >= n) {
                return Err(AppError::InternalServerError(anyhow::anyhow!("banco fora do ar")));
            }
            rows.push(entry);
            Ok(())
        }
    }

    fn turn() -> ConversationTurn {
        ConversationTurn {
            company_id: Uuid::new_v4(),
            customer_phone: "5511999998888".into(),
            user_message: "Vocês entregam no Centro?".into(),
            assistant_reply: "Entregamos sim, a taxa é R$ 5,00.".into(),
            tokens_used: Some(87),
            response_time_ms: Some(1240),
        }
    }

    #[tokio::test]
    async fn successful_turn_writes_user_then_assistant() {
        let store = Arc::new(MemoryStore::default());
        let logger = ConversationLogger::new(store.clone());

        assert_eq!(logger.log_turn(turn()).await, 2);

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message_type, MessageType::User);
        assert_eq!(rows[0].message_content, "Vocês entregam no Centro?");
        assert_eq!(rows[0].tokens_used, None);
        assert_eq!(rows[1].message_type, MessageType::Assistant);
        assert_eq!(rows[1].tokens_used, Some(87));
        assert_eq!(rows[1].response_time_ms, Some(1240));
        assert_eq!(rows[0].company_id, rows[1].company_id);
    }

    #[tokio::test]
    async fn failure_on_first_insert_writes_nothing() {
        let store = Arc::new(MemoryStore { fail_from: Some(0), ..Default::default() });
        let logger = ConversationLogger::new(store.clone());

        assert_eq!(logger.log_turn(turn()).await, 0);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_on_second_insert_leaves_user_row() {
        let store = Arc::new(MemoryStore { fail_from: Some(1), ..Default::default() });
        let logger = ConversationLogger::new(store.clone());

        assert_eq!(logger.log_turn(turn()).await, 1);

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message_type, MessageType::User);
    }
}
