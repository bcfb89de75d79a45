// src/services/company_service.rs

use uuid::Uuid;
use crate::{
    common::{
        error::AppError,
        text::{is_valid_slug, slugify},
    },
    db::CompanyRepository,
    models::company::{Company, CompanyPlan, CreateCompanyPayload, UpdateCompanyPayload},
};

/// Slug informado (validado) ou gerado a partir do nome.
pub fn resolve_slug(name: &str, requested: Option<&str>) -> Result<String, AppError> {
    let slug = match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    };

    if !is_valid_slug(&slug) {
        return Err(AppError::InvalidInput(format!(
            "Slug inválido '{}': use letras minúsculas, números e hífens.",
            slug
        )));
    }
    Ok(slug)
}

#[derive(Clone)]
pub struct CompanyService {
    repo: CompanyRepository,
}

impl CompanyService {
    pub fn new(repo: CompanyRepository) -> Self {
        Self { repo }
    }

    pub async fn create_company(&self, input: &CreateCompanyPayload) -> Result<Company, AppError> {
        let slug = resolve_slug(&input.name, input.slug.as_deref())?;

        let company = self
            .repo
            .create_company(
                input.name.trim(),
                &slug,
                input.domain.as_deref().map(str::trim).filter(|d| !d.is_empty()),
                input.city.as_deref(),
                input.plan.unwrap_or(CompanyPlan::Free),
                input.whatsapp_instance.as_deref(),
            )
            .await?;

        tracing::info!("🏪 Empresa '{}' criada ({})", company.name, company.slug);
        Ok(company)
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        self.repo.list_all().await
    }

    pub async fn update_company(
        &self,
        id: Uuid,
        input: &UpdateCompanyPayload,
    ) -> Result<Company, AppError> {
        self.repo
            .update_company(id, input)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn get_company(&self, id: Uuid) -> Result<Company, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::CompanyNotFound)
    }

    /// Empresa ativa pelo slug (cardápio público). Inativas contam como inexistentes.
    pub async fn get_active_by_slug(&self, slug: &str) -> Result<Company, AppError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(Company::is_active)
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn find_by_whatsapp_instance(&self, instance: &str) -> Result<Option<Company>, AppError> {
        self.repo.find_by_whatsapp_instance(instance).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_generated_from_name() {
        assert_eq!(resolve_slug("Lanchonete Bom Sabor", None).unwrap(), "lanchonete-bom-sabor");
        assert_eq!(resolve_slug("Lanchonete", Some("   ")).unwrap(), "lanchonete");
    }

    #[test]
    fn requested_slug_must_be_valid() {
        assert_eq!(resolve_slug("X", Some("minha-loja")).unwrap(), "minha-loja");
        assert!(matches!(resolve_slug("X", Some("Minha Loja")), Err(AppError::InvalidInput(_))));
        assert!(matches!(resolve_slug("!!!", None), Err(AppError::InvalidInput(_))));
    }
}
