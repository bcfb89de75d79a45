// src/models/functions.rs
//
// Payloads das rotas "function" (webhooks e chamadas diretas).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Webhook da MegaAPI (mensagem recebida no WhatsApp)
// ---
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MegaApiWebhook {
    #[serde(alias = "instance_key")]
    pub instance_key: Option<String>,
    pub message_type: Option<String>,
    pub key: Option<MegaApiMessageKey>,
    pub push_name: Option<String>,
    #[schema(value_type = Object)]
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MegaApiMessageKey {
    #[schema(example = "5511999998888@s.whatsapp.net")]
    pub remote_jid: String,
    #[serde(default)]
    pub from_me: bool,
    pub id: Option<String>,
}

/// Mensagem de texto já extraída do webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingText {
    pub instance_key: String,
    pub phone: String,
    pub push_name: Option<String>,
    pub text: String,
}

impl MegaApiWebhook {
    /// Extrai a mensagem de texto de um cliente.
    /// Ignora mensagens enviadas pela própria loja, grupos e mídias.
    pub fn incoming_text(&self) -> Option<IncomingText> {
        let key = self.key.as_ref()?;
        if key.from_me || key.remote_jid.ends_with("@g.us") {
            return None;
        }

        let message = self.message.as_ref()?;
        let text = message
            .get("conversation")
            .and_then(|v| v.as_str())
            .or_else(|| {
                message
                    .get("extendedTextMessage")
                    .and_then(|m| m.get("text"))
                    .and_then(|v| v.as_str())
            })?
            .trim();

        if text.is_empty() {
            return None;
        }

        let phone = key.remote_jid.split('@').next().unwrap_or_default().to_string();
        if phone.is_empty() {
            return None;
        }

        Some(IncomingText {
            instance_key: self.instance_key.clone()?,
            phone,
            push_name: self.push_name.clone(),
            text: text.to_string(),
        })
    }
}

// ---
// Chat direto com o assistente
// ---
fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("A mensagem não pode ser vazia.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiChatRequest {
    pub company_id: Uuid,
    #[validate(length(min = 8, max = 20, message = "Telefone inválido."))]
    #[schema(example = "5511999998888")]
    pub customer_phone: String,
    #[validate(
        length(max = 4000, message = "A mensagem é longa demais."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Quais pizzas vocês têm?")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiChatResponse {
    pub success: bool,
    pub reply: String,
    pub tokens_used: Option<i32>,
    pub response_time_ms: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub success: bool,
    // `false` quando a mensagem foi ignorada (grupo, mídia, loja inativa...)
    pub processed: bool,
}

// ---
// Geocodificação de endereço
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeRequest {
    #[validate(length(min = 3, message = "Endereço inválido."))]
    #[schema(example = "Av. Paulista, 1000, São Paulo")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    pub success: bool,
    pub formatted_address: String,
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(message: &str) -> AiChatRequest {
        AiChatRequest {
            company_id: Uuid::new_v4(),
            customer_phone: "5511999998888".into(),
            message: message.into(),
        }
    }

    #[test]
    fn blank_chat_message_is_rejected() {
        let errors = chat("   \n\t ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
        assert!(chat("").validate().is_err());
    }

    #[test]
    fn regular_chat_message_passes() {
        assert!(chat("  Tem pizza de calabresa?  ").validate().is_ok());
    }
}
