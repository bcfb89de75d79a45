// src/services/payment_service.rs

use async_trait::async_trait;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::PaymentRepository,
    models::payment::{
        CardBrand, PaymentDeliveryConfig, PaymentMethodKind, PaymentOption,
        UpsertPaymentConfigPayload,
    },
};

fn option(kind: PaymentMethodKind) -> PaymentOption {
    let label = match kind {
        PaymentMethodKind::Dinheiro => "Dinheiro",
        PaymentMethodKind::Cartao => "Cartão",
        PaymentMethodKind::Pix => "Pix",
    };
    PaymentOption {
        kind,
        label: label.into(),
        ask_card_brand: false,
        card_brands: Vec::new(),
        pix_key: None,
    }
}

/// Conjunto usado quando a empresa não tem configuração (ou a consulta falhou).
pub fn default_payment_options() -> Vec<PaymentOption> {
    vec![
        option(PaymentMethodKind::Dinheiro),
        option(PaymentMethodKind::Cartao),
        option(PaymentMethodKind::Pix),
    ]
}

/// Converte a configuração gravada na lista de formas de pagamento.
/// `card_brands` só é usada quando o cartão é aceito e a bandeira é perguntada;
/// uma lista vazia é repassada como está.
pub fn build_payment_options(config: &PaymentDeliveryConfig, card_brands: Vec<String>) -> Vec<PaymentOption> {
    let mut options = Vec::with_capacity(3);

    if config.accept_cash {
        options.push(option(PaymentMethodKind::Dinheiro));
    }
    if config.accept_card {
        let mut card = option(PaymentMethodKind::Cartao);
        if config.ask_card_brand {
            card.ask_card_brand = true;
            card.card_brands = card_brands;
        }
        options.push(card);
    }
    if config.accept_pix {
        let mut pix = option(PaymentMethodKind::Pix);
        pix.pix_key = config.pix_key.clone();
        options.push(pix);
    }

    options
}

/// Leituras usadas pelo resolvedor. Em produção é o `PaymentRepository`.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    async fn payment_config(&self, company_id: Uuid) -> Result<Option<PaymentDeliveryConfig>, AppError>;
    async fn card_brand_names(&self, company_id: Uuid) -> Result<Vec<String>, AppError>;
}

/// Sem configuração (ou com erro na consulta) devolve o conjunto padrão.
/// Falha nas bandeiras vira lista vazia.
pub async fn resolve_payment_options(lookup: &dyn PaymentLookup, company_id: Uuid) -> Vec<PaymentOption> {
    let config = match lookup.payment_config(company_id).await {
        Ok(Some(config)) => config,
        Ok(None) => return default_payment_options(),
        Err(e) => {
            tracing::warn!("⚠️ Falha ao buscar config de pagamento da empresa {}: {}", company_id, e);
            return default_payment_options();
        }
    };

    let card_brands = if config.accept_card && config.ask_card_brand {
        lookup.card_brand_names(company_id).await.unwrap_or_else(|e| {
            tracing::warn!("⚠️ Falha ao buscar bandeiras da empresa {}: {}", company_id, e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    let options = build_payment_options(&config, card_brands);
    if options.is_empty() {
        tracing::warn!("⚠️ Empresa {} não aceita nenhuma forma de pagamento", company_id);
    }
    options
}

#[derive(Clone)]
pub struct PaymentService {
    repo: PaymentRepository,
}

impl PaymentService {
    pub fn new(repo: PaymentRepository) -> Self {
        Self { repo }
    }

    /// Resolvedor de formas de pagamento. Nunca falha.
    pub async fn resolve_options(&self, company_id: Uuid) -> Vec<PaymentOption> {
        resolve_payment_options(&self.repo, company_id).await
    }

    /// Configuração atual; sem linha gravada, tudo aceito e sem pergunta de bandeira.
    pub async fn get_config(&self, company_id: Uuid) -> Result<PaymentDeliveryConfig, AppError> {
        let config = self.repo.find_config(company_id).await?;
        Ok(config.unwrap_or(PaymentDeliveryConfig {
            company_id,
            accept_cash: true,
            accept_pix: true,
            accept_card: true,
            ask_card_brand: false,
            pix_key: None,
            updated_at: None,
        }))
    }

    /// Chave Pix para cobrança, só quando a empresa aceita Pix e cadastrou a chave.
    pub async fn pix_key(&self, company_id: Uuid) -> Result<Option<String>, AppError> {
        let config = self.repo.find_config(company_id).await?;
        Ok(config
            .filter(|c| c.accept_pix)
            .and_then(|c| c.pix_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    pub async fn upsert_config(
        &self,
        company_id: Uuid,
        input: &UpsertPaymentConfigPayload,
    ) -> Result<PaymentDeliveryConfig, AppError> {
        self.repo.upsert_config(company_id, input).await
    }

    pub async fn list_card_brands(&self, company_id: Uuid) -> Result<Vec<CardBrand>, AppError> {
        self.repo.list_card_brands(company_id).await
    }

    pub async fn create_card_brand(&self, company_id: Uuid, name: &str) -> Result<CardBrand, AppError> {
        self.repo.create_card_brand(company_id, name.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cash: bool, card: bool, pix: bool, ask_brand: bool) -> PaymentDeliveryConfig {
        PaymentDeliveryConfig {
            company_id: Uuid::nil(),
            accept_cash: cash,
            accept_pix: pix,
            accept_card: card,
            ask_card_brand: ask_brand,
            pix_key: Some("contato@pizzaria.com.br".into()),
            updated_at: None,
        }
    }

    fn kinds(options: &[PaymentOption]) -> Vec<PaymentMethodKind> {
        options.iter().map(|o| o.kind).collect()
    }

    #[test]
    fn default_set_has_three_options() {
        assert_eq!(
            kinds(&default_payment_options()),
            vec![PaymentMethodKind::Dinheiro, PaymentMethodKind::Cartao, PaymentMethodKind::Pix]
        );
    }

    #[test]
    fn only_accepted_methods_are_listed() {
        let options = build_payment_options(&config(false, true, true, false), vec![]);
        assert_eq!(kinds(&options), vec![PaymentMethodKind::Cartao, PaymentMethodKind::Pix]);
        assert_eq!(options[1].pix_key.as_deref(), Some("contato@pizzaria.com.br"));
    }

    #[test]
    fn card_brands_only_when_asked() {
        let brands = vec!["Elo".to_string(), "Visa".to_string()];

        let asked = build_payment_options(&config(true, true, false, true), brands.clone());
        assert!(asked[1].ask_card_brand);
        assert_eq!(asked[1].card_brands, brands);

        let not_asked = build_payment_options(&config(true, true, false, false), brands);
        assert!(!not_asked[1].ask_card_brand);
        assert!(not_asked[1].card_brands.is_empty());
    }

    #[test]
    fn empty_brand_list_is_passed_through() {
        let options = build_payment_options(&config(false, true, false, true), vec![]);
        assert!(options[0].ask_card_brand);
        assert!(options[0].card_brands.is_empty());
    }

    #[derive(Default)]
    struct StubLookup {
        config: Option<PaymentDeliveryConfig>,
        config_fails: bool,
        brands_fail: bool,
    }

    fn offline() -> AppError {
        AppError::InternalServerError(anyhow::anyhow!("banco fora do ar"))
    }

    #[async_trait]
    impl PaymentLookup for StubLookup {
        async fn payment_config(&self, _company_id: Uuid) -> Result<Option<PaymentDeliveryConfig>, AppError> {
            if self.config_fails {
                return Err(offline());
            }
            Ok(self.config.clone())
        }

        async fn card_brand_names(&self, _company_id: Uuid) -> Result<Vec<String>, AppError> {
            if self.brands_fail {
                return Err(offline());
            }
            Ok(vec!["Mastercard".to_string(), "Visa".to_string()])
        }
    }

    fn default_kinds() -> Vec<PaymentMethodKind> {
        vec![PaymentMethodKind::Dinheiro, PaymentMethodKind::Cartao, PaymentMethodKind::Pix]
    }

    #[tokio::test]
    async fn missing_config_row_gives_default_set() {
        let options = resolve_payment_options(&StubLookup::default(), Uuid::new_v4()).await;
        assert_eq!(kinds(&options), default_kinds());
    }

    #[tokio::test]
    async fn config_query_failure_gives_default_set() {
        let lookup = StubLookup { config_fails: true, ..Default::default() };
        let options = resolve_payment_options(&lookup, Uuid::new_v4()).await;
        assert_eq!(kinds(&options), default_kinds());
    }

    #[tokio::test]
    async fn brand_query_failure_gives_empty_brand_list() {
        let lookup = StubLookup {
            config: Some(config(true, true, false, true)),
            brands_fail: true,
            ..Default::default()
        };
        let options = resolve_payment_options(&lookup, Uuid::new_v4()).await;

        assert_eq!(kinds(&options), vec![PaymentMethodKind::Dinheiro, PaymentMethodKind::Cartao]);
        assert!(options[1].ask_card_brand);
        assert!(options[1].card_brands.is_empty());
    }

    #[tokio::test]
    async fn brands_are_loaded_when_asked() {
        let lookup = StubLookup {
            config: Some(config(false, true, true, true)),
            ..Default::default()
        };
        let options = resolve_payment_options(&lookup, Uuid::new_v4()).await;

        assert_eq!(options[0].card_brands, vec!["Mastercard".to_string(), "Visa".to_string()]);
        assert_eq!(options[1].kind, PaymentMethodKind::Pix);
    }
}
