// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Slug já existe: {0}")]
    SlugAlreadyExists(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Configuração ausente: {0}")]
    MissingConfiguration(&'static str),

    #[error("Falha no serviço externo {service}: {message}")]
    ExternalService { service: &'static str, message: String },

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de HTTP: {0}")]
    HttpClientError(#[from] reqwest::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro já "pronto para a resposta": status + mensagem traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::SlugAlreadyExists(_)
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::CompanyNotFound
            | AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExternalService { .. } | AppError::HttpClientError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno numa resposta traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let en = locale.is_english();
        let status = self.status();

        let error = match &self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| Value::from(m.to_string())))
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                return ApiError {
                    status,
                    error: pick(en, "One or more fields are invalid.", "Um ou mais campos são inválidos."),
                    details: Some(Value::Object(details)),
                };
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::EmailAlreadyExists => {
                pick(en, "This e-mail is already in use.", "Este e-mail já está em uso.")
            }
            AppError::SlugAlreadyExists(slug) => match en {
                true => format!("The slug '{}' is already in use.", slug),
                false => format!("O slug '{}' já está em uso.", slug),
            },
            AppError::InvalidCredentials => {
                pick(en, "Invalid e-mail or password.", "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => pick(
                en,
                "Invalid or missing authentication token.",
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::Forbidden => pick(
                en,
                "You do not have access to this resource.",
                "Você não tem acesso a este recurso.",
            ),
            AppError::UserNotFound => pick(en, "User not found.", "Usuário não encontrado."),
            AppError::CompanyNotFound => pick(en, "Company not found.", "Empresa não encontrada."),
            AppError::ResourceNotFound(what) => match en {
                true => format!("{} not found.", what),
                false => format!("{} não encontrado.", what),
            },
            AppError::Conflict(msg) => msg.clone(),
            AppError::ExternalService { service, .. } | AppError::MissingConfiguration(service) => {
                tracing::error!("Falha em integração externa: {}", self);
                match en {
                    true => format!("The {} integration is unavailable.", service),
                    false => format!("A integração com {} está indisponível.", service),
                }
            }
            AppError::HttpClientError(_) => {
                tracing::error!("Falha em integração externa: {}", self);
                pick(en, "An external service is unavailable.", "Um serviço externo está indisponível.")
            }
            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                pick(en, "An unexpected error occurred.", "Ocorreu um erro inesperado.")
            }
        };

        ApiError { status, error, details: None }
    }
}

fn pick(en: bool, english: &str, portuguese: &str) -> String {
    let text = if en { english } else { portuguese };
    text.to_string()
}

// Usado pelos middlewares, onde ainda não temos o idioma do cliente.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

/// Erro das rotas "function" (webhooks): sempre `{ success: false, error }`.
#[derive(Debug)]
pub struct FunctionError(pub AppError);

impl From<AppError> for FunctionError {
    fn from(err: AppError) -> Self {
        FunctionError(err)
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Função falhou: {}", self.0);
        let body = Json(json!({ "success": false, "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_kind() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::CompanyNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::SlugAlreadyExists("pizzaria".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::MissingConfiguration("OpenAI").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_localised() {
        let pt = AppError::UserNotFound.to_api_error(&Locale("pt".into()));
        let en = AppError::UserNotFound.to_api_error(&Locale("en".into()));
        assert_eq!(pt.error, "Usuário não encontrado.");
        assert_eq!(en.error, "User not found.");
    }

    #[tokio::test]
    async fn function_error_body_has_success_false() {
        let response = FunctionError(AppError::InvalidInput("mensagem vazia".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Entrada inválida: mensagem vazia");
    }
}
