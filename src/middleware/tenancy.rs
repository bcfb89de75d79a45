// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;
use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

// O nome do nosso cabeçalho HTTP customizado
pub const COMPANY_ID_HEADER: &str = "x-company-id";

pub fn company_id_from_headers(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let value = headers
        .get(COMPANY_ID_HEADER)
        .ok_or_else(|| AppError::InvalidInput("O cabeçalho x-company-id é obrigatório.".into()))?;

    let value_str = value
        .to_str()
        .map_err(|_| AppError::InvalidInput("Cabeçalho x-company-id contém caracteres inválidos.".into()))?;

    Uuid::parse_str(value_str.trim())
        .map_err(|_| AppError::InvalidInput("Cabeçalho x-company-id inválido (não é um UUID).".into()))
}

// Empresa (tenant) da requisição, já validada pelo `tenant_guard`.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(tenant) = parts.extensions.get::<TenantContext>() {
            return Ok(*tenant);
        }
        // Rota sem tenant_guard: é um erro de montagem do router
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();
        Err(AppError::InvalidInput("Contexto da empresa não encontrado.".into()).to_api_error(&locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_is_required_and_must_be_uuid() {
        let mut headers = HeaderMap::new();
        assert!(matches!(company_id_from_headers(&headers), Err(AppError::InvalidInput(_))));

        headers.insert(COMPANY_ID_HEADER, HeaderValue::from_static("loja-1"));
        assert!(matches!(company_id_from_headers(&headers), Err(AppError::InvalidInput(_))));

        let id = Uuid::new_v4();
        headers.insert(COMPANY_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(company_id_from_headers(&headers).unwrap(), id);
    }
}
