// src/services/delivery_service.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::DeliveryRepository,
    models::delivery::{
        CreateRegionPayload, DeliveryMethod, DeliveryOption, DeliveryOptionKind, DeliveryOptions,
        DeliverySummary, ServiceRegion, UpdateRegionPayload, UpsertDeliveryMethodPayload,
    },
};

/// Formata um valor em reais: 5.5 -> "R$ 5,50".
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {:.2}", value.round_dp(2)).replace('.', ",")
}

/// Agrega as regiões ativas nas flags usadas pelo cardápio.
/// Regiões com `status = false` são ignoradas.
pub fn summarize_regions(regions: &[ServiceRegion]) -> DeliverySummary {
    let fees: Vec<Decimal> = regions.iter().filter(|r| r.status).map(|r| r.valor).collect();

    let total_regions = fees.len();
    let free_regions_count = fees.iter().filter(|v| v.is_zero()).count();
    let all_regions_free = total_regions > 0 && free_regions_count == total_regions;

    DeliverySummary {
        has_delivery: total_regions > 0,
        total_regions,
        free_regions_count,
        has_free_delivery: free_regions_count > 0,
        all_regions_free,
        some_regions_free: free_regions_count > 0 && !all_regions_free,
        min_fee: fees.iter().copied().min(),
        max_fee: fees.iter().copied().max(),
    }
}

fn pickup_option() -> DeliveryOption {
    DeliveryOption {
        kind: DeliveryOptionKind::Pickup,
        label: "Retirada no local".into(),
        description: "Retire seu pedido na loja".into(),
        fee: None,
    }
}

fn eat_in_option() -> DeliveryOption {
    DeliveryOption {
        kind: DeliveryOptionKind::EatIn,
        label: "Consumir no local".into(),
        description: "Faça seu pedido e consuma na loja".into(),
        fee: None,
    }
}

fn delivery_option(summary: &DeliverySummary) -> DeliveryOption {
    let description = if summary.all_regions_free {
        "Entrega grátis".to_string()
    } else if summary.some_regions_free {
        "Entrega grátis em algumas regiões".to_string()
    } else {
        let min = summary.min_fee.unwrap_or(Decimal::ZERO);
        format!("Taxa a partir de {}", format_brl(min))
    };

    DeliveryOption {
        kind: DeliveryOptionKind::Delivery,
        label: "Entrega".into(),
        description,
        fee: summary.min_fee,
    }
}

/// Monta a lista de opções. A retirada está sempre presente, no fim da lista.
pub fn build_delivery_options(
    regions: &[ServiceRegion],
    method: Option<&DeliveryMethod>,
) -> DeliveryOptions {
    let summary = summarize_regions(regions);
    let mut options = Vec::with_capacity(3);

    if summary.has_delivery {
        options.push(delivery_option(&summary));
    }
    if method.is_some_and(|m| m.eat_in) {
        options.push(eat_in_option());
    }
    options.push(pickup_option());

    DeliveryOptions { summary, options }
}

/// Resposta usada quando a consulta falha: só retirada.
pub fn default_delivery_options() -> DeliveryOptions {
    DeliveryOptions {
        summary: DeliverySummary::default(),
        options: vec![pickup_option()],
    }
}

/// Leituras usadas pelo resolvedor. Em produção é o `DeliveryRepository`.
#[async_trait]
pub trait DeliveryLookup: Send + Sync {
    async fn active_regions(&self, company_id: Uuid) -> Result<Vec<ServiceRegion>, AppError>;
    async fn delivery_method(&self, company_id: Uuid) -> Result<Option<DeliveryMethod>, AppError>;
}

/// Em caso de erro em qualquer consulta, loga e devolve a lista padrão.
pub async fn resolve_delivery_options(lookup: &dyn DeliveryLookup, company_id: Uuid) -> DeliveryOptions {
    let regions = match lookup.active_regions(company_id).await {
        Ok(regions) => regions,
        Err(e) => {
            tracing::warn!("⚠️ Falha ao buscar regiões da empresa {}: {}", company_id, e);
            return default_delivery_options();
        }
    };

    let method = match lookup.delivery_method(company_id).await {
        Ok(method) => method,
        Err(e) => {
            tracing::warn!("⚠️ Falha ao buscar métodos de entrega da empresa {}: {}", company_id, e);
            return default_delivery_options();
        }
    };

    build_delivery_options(&regions, method.as_ref())
}

#[derive(Clone)]
pub struct DeliveryService {
    repo: DeliveryRepository,
}

impl DeliveryService {
    pub fn new(repo: DeliveryRepository) -> Self {
        Self { repo }
    }

    /// Resolvedor de opções de entrega. Nunca falha.
    pub async fn resolve_options(&self, company_id: Uuid) -> DeliveryOptions {
        resolve_delivery_options(&self.repo, company_id).await
    }

    pub async fn get_method(&self, company_id: Uuid) -> Result<DeliveryMethod, AppError> {
        // Sem linha gravada: entrega e retirada ligadas, consumo no local desligado
        let method = self.repo.find_method(company_id).await?;
        Ok(method.unwrap_or(DeliveryMethod {
            company_id,
            delivery: true,
            pickup: true,
            eat_in: false,
            updated_at: None,
        }))
    }

    pub async fn upsert_method(
        &self,
        company_id: Uuid,
        input: &UpsertDeliveryMethodPayload,
    ) -> Result<DeliveryMethod, AppError> {
        self.repo.upsert_method(company_id, input).await
    }

    pub async fn list_regions(&self, company_id: Uuid) -> Result<Vec<ServiceRegion>, AppError> {
        self.repo.list_regions(company_id, false).await
    }

    pub async fn create_region(
        &self,
        company_id: Uuid,
        input: &CreateRegionPayload,
    ) -> Result<ServiceRegion, AppError> {
        if input.valor.is_sign_negative() {
            return Err(AppError::InvalidInput("A taxa de entrega não pode ser negativa.".into()));
        }
        self.repo.create_region(company_id, input).await
    }

    pub async fn update_region(
        &self,
        company_id: Uuid,
        region_id: Uuid,
        input: &UpdateRegionPayload,
    ) -> Result<ServiceRegion, AppError> {
        if input.valor.is_some_and(|v| v.is_sign_negative()) {
            return Err(AppError::InvalidInput("A taxa de entrega não pode ser negativa.".into()));
        }
        self.repo
            .update_region(company_id, region_id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Região".into()))
    }

    pub async fn delete_region(&self, company_id: Uuid, region_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_region(company_id, region_id).await? {
            return Err(AppError::ResourceNotFound("Região".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn region(valor: i64, status: bool) -> ServiceRegion {
        ServiceRegion {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            nome: format!("Região {}", valor),
            valor: Decimal::new(valor * 100, 2),
            status,
            created_at: Utc::now(),
        }
    }

    fn kinds(options: &DeliveryOptions) -> Vec<DeliveryOptionKind> {
        options.options.iter().map(|o| o.kind).collect()
    }

    #[test]
    fn one_free_and_one_paid_region() {
        let summary = summarize_regions(&[region(0, true), region(5, true)]);

        assert!(summary.has_delivery);
        assert_eq!(summary.total_regions, 2);
        assert_eq!(summary.free_regions_count, 1);
        assert!(summary.has_free_delivery);
        assert!(!summary.all_regions_free);
        assert!(summary.some_regions_free);
        assert_eq!(summary.min_fee, Some(Decimal::ZERO));
        assert_eq!(summary.max_fee, Some(Decimal::new(500, 2)));
    }

    #[test]
    fn zero_regions_means_pickup_only() {
        let options = build_delivery_options(&[], None);

        assert!(!options.summary.has_delivery);
        assert!(!options.summary.all_regions_free);
        assert_eq!(kinds(&options), vec![DeliveryOptionKind::Pickup]);
    }

    #[test]
    fn inactive_regions_do_not_count() {
        let options = build_delivery_options(&[region(0, false), region(7, false)], None);
        assert_eq!(options.summary.total_regions, 0);
        assert_eq!(kinds(&options), vec![DeliveryOptionKind::Pickup]);
    }

    #[test]
    fn flags_are_consistent_for_every_mix() {
        for free in 0..4 {
            for paid in 0..4 {
                let mut regions: Vec<ServiceRegion> = (0..free).map(|_| region(0, true)).collect();
                regions.extend((0..paid).map(|i| region(3 + i, true)));
                regions.push(region(0, false));

                let s = summarize_regions(&regions);
                let total = (free + paid) as usize;

                assert_eq!(s.total_regions, total);
                assert_eq!(s.has_free_delivery, s.free_regions_count > 0);
                if total > 0 {
                    assert_eq!(s.all_regions_free, s.free_regions_count == total);
                }
                assert_eq!(s.some_regions_free, s.has_free_delivery && !s.all_regions_free);

                let options = build_delivery_options(&regions, None);
                assert_eq!(options.options.last().map(|o| o.kind), Some(DeliveryOptionKind::Pickup));
            }
        }
    }

    #[test]
    fn delivery_description_follows_fees() {
        let all_free = build_delivery_options(&[region(0, true)], None);
        assert_eq!(all_free.options[0].description, "Entrega grátis");

        let paid = build_delivery_options(&[region(8, true), region(5, true)], None);
        assert_eq!(paid.options[0].description, "Taxa a partir de R$ 5,00");
        assert_eq!(paid.options[0].fee, Some(Decimal::new(500, 2)));
    }

    #[test]
    fn eat_in_comes_from_delivery_method() {
        let method = DeliveryMethod {
            company_id: Uuid::nil(),
            delivery: true,
            pickup: true,
            eat_in: true,
            updated_at: None,
        };
        let options = build_delivery_options(&[region(5, true)], Some(&method));
        assert_eq!(
            kinds(&options),
            vec![
                DeliveryOptionKind::Delivery,
                DeliveryOptionKind::EatIn,
                DeliveryOptionKind::Pickup
            ]
        );
    }

    #[derive(Default)]
    struct StubLookup {
        regions: Vec<ServiceRegion>,
        method: Option<DeliveryMethod>,
        regions_fail: bool,
        method_fail: bool,
    }

    fn offline() -> AppError {
        AppError::InternalServerError(anyhow::anyhow!("banco fora do ar"))
    }

    #[async_trait]
    impl DeliveryLookup for StubLookup {
        async fn active_regions(&self, _company_id: Uuid) -> Result<Vec<ServiceRegion>, AppError> {
            if self.regions_fail {
                return Err(offline());
            }
            Ok(self.regions.clone())
        }

        async fn delivery_method(&self, _company_id: Uuid) -> Result<Option<DeliveryMethod>, AppError> {
            if self.method_fail {
                return Err(offline());
            }
            Ok(self.method.clone())
        }
    }

    #[tokio::test]
    async fn region_query_failure_falls_back_to_pickup() {
        let lookup = StubLookup { regions_fail: true, ..Default::default() };
        let options = resolve_delivery_options(&lookup, Uuid::new_v4()).await;

        assert_eq!(kinds(&options), vec![DeliveryOptionKind::Pickup]);
        assert!(!options.summary.has_delivery);
    }

    #[tokio::test]
    async fn method_query_failure_falls_back_to_pickup() {
        let lookup = StubLookup {
            regions: vec![region(0, true), region(5, true)],
            method_fail: true,
            ..Default::default()
        };
        let options = resolve_delivery_options(&lookup, Uuid::new_v4()).await;

        assert_eq!(kinds(&options), vec![DeliveryOptionKind::Pickup]);
    }

    #[tokio::test]
    async fn resolver_uses_active_regions_and_method() {
        let lookup = StubLookup {
            regions: vec![region(0, true), region(5, true)],
            method: None,
            ..Default::default()
        };
        let options = resolve_delivery_options(&lookup, Uuid::new_v4()).await;

        assert_eq!(kinds(&options), vec![DeliveryOptionKind::Delivery, DeliveryOptionKind::Pickup]);
        assert_eq!(options.summary.free_regions_count, 1);
        assert!(options.summary.some_regions_free);
    }

    #[test]
    fn default_list_is_pickup_only() {
        assert_eq!(kinds(&default_delivery_options()), vec![DeliveryOptionKind::Pickup]);
    }

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(Decimal::new(550, 2)), "R$ 5,50");
        assert_eq!(format_brl(Decimal::new(12, 0)), "R$ 12,00");
    }
}
