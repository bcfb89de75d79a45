// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User, UserRole},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    // O bcrypt é caro; roda fora do executor assíncrono
    async fn hash_password(password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    /// Cadastra um membro da equipe na empresa de quem está cadastrando.
    /// Apenas superadmins podem criar outros superadmins.
    pub async fn register_user(
        &self,
        creator: &User,
        company_id: Uuid,
        email: &str,
        password: &str,
        name: Option<&str>,
        role: UserRole,
    ) -> Result<User, AppError> {
        if creator.role == UserRole::Staff {
            return Err(AppError::Forbidden);
        }
        if role == UserRole::Superadmin && !creator.is_superadmin() {
            return Err(AppError::Forbidden);
        }

        let hashed_password = Self::hash_password(password).await?;
        let company = (role != UserRole::Superadmin).then_some(company_id);

        let user = self
            .user_repo
            .create_user(&email.to_lowercase(), &hashed_password, name, role, company)
            .await?;

        tracing::info!("👤 Usuário {} criado com papel {:?}", user.email, user.role);
        Ok(user)
    }

    /// Cria um superadmin, ou promove o usuário existente e troca a senha.
    pub async fn ensure_superadmin(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        let email = email.to_lowercase();
        let hashed_password = Self::hash_password(password).await?;

        match self.user_repo.find_by_email(&email).await? {
            Some(existing) => {
                self.user_repo
                    .set_role_and_password(existing.id, UserRole::Superadmin, &hashed_password)
                    .await
            }
            None => {
                self.user_repo
                    .create_user(&email, &hashed_password, name, UserRole::Superadmin, None)
                    .await
            }
        }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let user_id = self.decode_token(token)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn decode_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims.sub)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(secret: &str) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/cardapio_test")
            .unwrap();
        AuthService::new(UserRepository::new(pool), secret.to_string())
    }

    #[tokio::test]
    async fn token_round_trips_the_user_id() {
        let auth = service("segredo-de-teste");
        let user_id = Uuid::new_v4();

        let token = auth.create_token(user_id).unwrap();
        assert_eq!(auth.decode_token(&token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let token = service("segredo-a").create_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service("segredo-b").decode_token(&token),
            Err(AppError::InvalidToken)
        ));
    }
}
