// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{User, UserRole},
};

/// 1. O Trait que define quais papéis passam pelo guardião
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
}

/// 2. O Extractor (Guardião). Entrega o usuário já autorizado.
pub struct RequireRole<T>(pub User, pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !T::allows(user.role) {
            let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();
            tracing::warn!("⛔ Papel {:?} sem permissão para {}", user.role, parts.uri.path());
            return Err(AppError::Forbidden.to_api_error(&locale));
        }

        Ok(RequireRole(user, PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct Superadmin;
impl RoleDef for Superadmin {
    fn allows(role: UserRole) -> bool {
        role == UserRole::Superadmin
    }
}

// Admin da loja (ou superadmin)
pub struct Admin;
impl RoleDef for Admin {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Superadmin | UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_hierarchy() {
        assert!(Superadmin::allows(UserRole::Superadmin));
        assert!(!Superadmin::allows(UserRole::Admin));
        assert!(Admin::allows(UserRole::Superadmin));
        assert!(Admin::allows(UserRole::Admin));
        assert!(!Admin::allows(UserRole::Staff));
    }
}
