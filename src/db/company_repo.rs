// src/db/company_repo.rs

use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::company::{Company, CompanyPlan, UpdateCompanyPayload},
};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_company(
        &self,
        name: &str,
        slug: &str,
        domain: Option<&str>,
        city: Option<&str>,
        plan: CompanyPlan,
        whatsapp_instance: Option<&str>,
    ) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, slug, domain, city, plan, whatsapp_instance)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(domain)
        .bind(city)
        .bind(plan)
        .bind(whatsapp_instance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return match db_err.constraint() {
                        Some("companies_slug_key") => AppError::SlugAlreadyExists(slug.to_string()),
                        _ => AppError::Conflict("Domínio ou instância do WhatsApp já cadastrados.".into()),
                    };
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    /// Resolve a empresa a partir da instância da MegaAPI que recebeu a mensagem.
    pub async fn find_by_whatsapp_instance(&self, instance: &str) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE whatsapp_instance = $1",
        )
        .bind(instance)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn list_all(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    // COALESCE mantém o valor atual quando o campo não veio no payload
    pub async fn update_company(
        &self,
        id: Uuid,
        input: &UpdateCompanyPayload,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                domain = COALESCE($3, domain),
                city = COALESCE($4, city),
                plan = COALESCE($5, plan),
                status = COALESCE($6, status),
                whatsapp_instance = COALESCE($7, whatsapp_instance),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.domain.as_deref())
        .bind(input.city.as_deref())
        .bind(input.plan)
        .bind(input.status)
        .bind(input.whatsapp_instance.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }
}
