// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

/// Linha do relatório de `verify-users`.
#[derive(Debug, sqlx::FromRow)]
pub struct RoleCount {
    pub role: UserRole,
    pub total: i64,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        name: Option<&str>,
        role: UserRole,
        company_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, role, company_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .bind(name)
        .bind(role)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    /// Promove um usuário existente (usado pelo `create-superadmin`).
    pub async fn set_role_and_password(
        &self,
        id: Uuid,
        role: UserRole,
        hashed_password: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn count_by_role(&self) -> Result<Vec<RoleCount>, AppError> {
        let rows = sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS total FROM users GROUP BY role ORDER BY role",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Usuários que não são superadmin e não têm empresa (ou cuja empresa sumiu).
    pub async fn find_orphans(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            LEFT JOIN companies c ON c.id = u.company_id
            WHERE u.role <> 'superadmin' AND c.id IS NULL
            ORDER BY u.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
