// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::{DeliveryRepository, OrderRepository},
    models::{
        company::Company,
        orders::{CreatePedidoPayload, Pedido, PedidoItem, PedidoStatus, PedidoTipo},
    },
    services::pix::{self, PixCharge},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Maior valor que cabe nas colunas NUMERIC(10, 2): 99.999.999,99.
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Soma dos itens + taxa de entrega. Rejeita preços negativos e valores que
/// não cabem nas colunas de dinheiro.
pub fn compute_total(itens: &[PedidoItem], taxa_entrega: Decimal) -> Result<Decimal, AppError> {
    let max = max_amount();
    let mut total = taxa_entrega;

    for item in itens {
        if item.preco_unitario < Decimal::ZERO || item.preco_unitario > max {
            return Err(AppError::InvalidInput(format!("Preço inválido para '{}'.", item.nome)));
        }
        total = item
            .subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .filter(|sum| *sum <= max)
            .ok_or_else(|| AppError::InvalidInput("O total do pedido excede o valor máximo permitido.".into()))?;
    }

    Ok(total)
}

/// Payload Pix "copia e cola" + QR em SVG para um pedido.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PedidoPix {
    pub payload: String,
    pub qr_code_svg: String,
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    delivery_repo: DeliveryRepository,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl OrderService {
    pub fn new(repo: OrderRepository, delivery_repo: DeliveryRepository, pool: PgPool) -> Self {
        Self { repo, delivery_repo, pool }
    }

    /// Cria o pedido. Para entregas, a taxa vem da região escolhida (que precisa estar ativa).
    /// Não há proteção contra envio duplicado.
    pub async fn create_order(
        &self,
        company_id: Uuid,
        input: &CreatePedidoPayload,
    ) -> Result<Pedido, AppError> {
        let mut tx = self.pool.begin().await?;

        let taxa_entrega = match input.tipo {
            PedidoTipo::Delivery => {
                if input.endereco.as_deref().is_none_or(|e| e.trim().is_empty()) {
                    return Err(AppError::InvalidInput("O endereço é obrigatório para entrega.".into()));
                }
                let region_id = input
                    .regiao_id
                    .ok_or_else(|| AppError::InvalidInput("Escolha a região de entrega.".into()))?;

                let region = self
                    .delivery_repo
                    .find_region(&mut *tx, company_id, region_id)
                    .await?
                    .filter(|r| r.status)
                    .ok_or_else(|| AppError::ResourceNotFound("Região".into()))?;
                region.valor
            }
            PedidoTipo::Retirada | PedidoTipo::Local => Decimal::ZERO,
        };

        // O preço unitário vem do cliente; só a taxa de entrega é conferida aqui.
        let total = compute_total(&input.itens, taxa_entrega)?;

        let order = self
            .repo
            .create_order(&mut *tx, company_id, input, &input.itens, taxa_entrega, total)
            .await?;

        tx.commit().await?;

        tracing::info!("🧾 Pedido #{} criado na empresa {} (total {})", order.numero, company_id, order.total);
        Ok(order)
    }

    pub async fn get_order(&self, company_id: Uuid, order_id: Uuid) -> Result<Pedido, AppError> {
        self.repo
            .find_order(company_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".into()))
    }

    pub async fn list_orders(
        &self,
        company_id: Uuid,
        status: Option<PedidoStatus>,
        limit: Option<i64>,
    ) -> Result<Vec<Pedido>, AppError> {
        self.repo.list_orders(company_id, status, clamp_limit(limit)).await
    }

    pub async fn update_status(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        status: PedidoStatus,
    ) -> Result<Pedido, AppError> {
        let order = self
            .repo
            .update_status(company_id, order_id, status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".into()))?;

        tracing::info!("🔄 Pedido #{} agora está '{}'", order.numero, status.label());
        Ok(order)
    }

    pub fn pix_for_order(company: &Company, order: &Pedido, pix_key: &str) -> Result<PedidoPix, AppError> {
        let payload = pix::build_payload(&PixCharge {
            key: pix_key,
            merchant_name: &company.name,
            merchant_city: company.city.as_deref().unwrap_or("BRASIL"),
            amount: Some(order.total),
            txid: Some(&format!("PEDIDO{}", order.numero)),
        })?;
        let qr_code_svg = pix::payload_svg(&payload)?;
        Ok(PedidoPix { payload, qr_code_svg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn item(nome: &str, quantidade: i32, centavos: i64) -> PedidoItem {
        PedidoItem {
            produto_id: None,
            nome: nome.into(),
            quantidade,
            preco_unitario: Decimal::new(centavos, 2),
            observacao: None,
        }
    }

    #[test]
    fn total_is_items_plus_fee() {
        let itens = vec![item("Pizza Margherita", 2, 4990), item("Refrigerante 2L", 1, 1200)];
        let total = compute_total(&itens, Decimal::new(500, 2)).unwrap();
        assert_eq!(total, Decimal::new(11680, 2));
    }

    #[test]
    fn negative_price_is_rejected() {
        let itens = vec![item("Cupom", 1, -1000)];
        assert!(matches!(compute_total(&itens, Decimal::ZERO), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn huge_price_is_rejected_instead_of_overflowing() {
        let payload: CreatePedidoPayload = serde_json::from_str(
            r#"{"tipo":"retirada","itens":[{"nome":"X","quantidade":1000,"precoUnitario":1e26}]}"#,
        )
        .unwrap();

        assert!(payload.validate().is_err());
        assert!(payload.itens[0].subtotal().is_none());
        assert!(matches!(
            compute_total(&payload.itens, Decimal::ZERO),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn total_must_fit_money_columns() {
        let itens = vec![item("Banquete", 999, 9_000_000_00)];
        assert!(matches!(compute_total(&itens, Decimal::ZERO), Err(AppError::InvalidInput(_))));

        let limite = vec![item("Banquete", 1, 9_999_999_999)];
        assert_eq!(compute_total(&limite, Decimal::ZERO).unwrap(), max_amount());
        assert!(compute_total(&limite, Decimal::new(1, 2)).is_err());
    }

    #[test]
    fn quantity_has_an_upper_bound() {
        assert!(item("Esfiha", 999, 500).validate().is_ok());
        assert!(item("Esfiha", 1000, 500).validate().is_err());
        assert!(item("Esfiha", 0, 500).validate().is_err());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 500);
    }
}
