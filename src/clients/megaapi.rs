// src/clients/megaapi.rs
//
// Gateway de WhatsApp (MegaAPI). Só usamos o envio de texto.

use reqwest::Client;
use serde_json::json;

use crate::common::error::AppError;

const SERVICE: &str = "MegaAPI";

#[derive(Clone)]
pub struct MegaApiClient {
    http: Client,
    base_url: Option<String>,
    token: Option<String>,
}

/// "5511999998888" -> "5511999998888@s.whatsapp.net"
pub fn to_jid(phone: &str) -> String {
    if phone.contains('@') {
        return phone.to_string();
    }
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}@s.whatsapp.net", digits)
}

impl MegaApiClient {
    pub fn new(http: Client, base_url: Option<String>, token: Option<String>) -> Self {
        Self { http, base_url, token }
    }

    pub async fn send_text(&self, instance_key: &str, phone: &str, text: &str) -> Result<(), AppError> {
        let (Some(base_url), Some(token)) = (self.base_url.as_deref(), self.token.as_deref()) else {
            return Err(AppError::MissingConfiguration(SERVICE));
        };

        let url = format!(
            "{}/rest/sendMessage/{}/text",
            base_url.trim_end_matches('/'),
            instance_key
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({
                "messageData": {
                    "to": to_jid(phone),
                    "text": text,
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService {
                service: SERVICE,
                message: format!("status {}: {}", status, body),
            });
        }

        tracing::debug!("📤 Mensagem enviada para {} via {}", phone, instance_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jid_keeps_only_digits() {
        assert_eq!(to_jid("+55 (11) 99999-8888"), "5511999998888@s.whatsapp.net");
        assert_eq!(to_jid("5511999998888@s.whatsapp.net"), "5511999998888@s.whatsapp.net");
    }
}
