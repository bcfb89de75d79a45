// src/services/menu_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::MenuRepository,
    models::menu::{CreateProdutoPayload, Produto},
};

#[derive(Clone)]
pub struct MenuService {
    repo: MenuRepository,
}

impl MenuService {
    pub fn new(repo: MenuRepository) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self, company_id: Uuid, only_active: bool) -> Result<Vec<Produto>, AppError> {
        self.repo.list_products(company_id, only_active).await
    }

    pub async fn create_product(
        &self,
        company_id: Uuid,
        input: &CreateProdutoPayload,
    ) -> Result<Produto, AppError> {
        if input.preco < Decimal::ZERO {
            return Err(AppError::InvalidInput("O preço não pode ser negativo.".into()));
        }
        self.repo.create_product(company_id, input).await
    }
}
