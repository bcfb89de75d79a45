// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::{company::Company, orders::{Pedido, PedidoTipo}},
    services::{
        company_service::CompanyService,
        delivery_service::format_brl,
        order_service::{OrderService, PedidoPix},
        payment_service::PaymentService,
    },
};

const FONTS_DIR: &str = "./fonts";

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

#[derive(Clone)]
pub struct DocumentService {
    companies: CompanyService,
    orders: OrderService,
    payment: PaymentService,
}

impl DocumentService {
    pub fn new(companies: CompanyService, orders: OrderService, payment: PaymentService) -> Self {
        Self { companies, orders, payment }
    }

    /// Pix "copia e cola" do pedido. Erro 404 se a empresa não aceita Pix ou não tem chave.
    pub async fn order_pix(&self, company_id: Uuid, order_id: Uuid) -> Result<PedidoPix, AppError> {
        let company = self.companies.get_company(company_id).await?;
        let order = self.orders.get_order(company_id, order_id).await?;
        let key = self
            .payment
            .pix_key(company_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Chave Pix".into()))?;
        OrderService::pix_for_order(&company, &order, &key)
    }

    /// Comprovante do pedido em PDF. Inclui o QR Pix quando a empresa tem chave cadastrada.
    pub async fn generate_order_pdf(&self, company_id: Uuid, order_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let company = self.companies.get_company(company_id).await?;
        let order = self.orders.get_order(company_id, order_id).await?;
        let pix_payload = match self.payment.pix_key(company_id).await? {
            Some(key) => Some(OrderService::pix_for_order(&company, &order, &key)?.payload),
            None => None,
        };

        // 2. Renderiza fora do runtime (genpdf é síncrono)
        tokio::task::spawn_blocking(move || {
            render_receipt(FONTS_DIR, &company, &order, pix_payload.as_deref())
        })
        .await
        .map_err(pdf_error)?
    }
}

pub fn render_receipt(
    fonts_dir: &str,
    company: &Company,
    order: &Pedido,
    pix_payload: Option<&str>,
) -> Result<Vec<u8>, AppError> {
    let font_family = genpdf::fonts::from_files(fonts_dir, "Roboto", None)
        .map_err(|_| AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", fonts_dir)))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Pedido #{}", order.numero));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(elements::Paragraph::new(company.name.clone())
        .styled(style::Style::new().bold().with_font_size(18)));
    if let Some(city) = &company.city {
        doc.push(elements::Paragraph::new(city.clone())
            .styled(style::Style::new().with_font_size(10)));
    }

    doc.push(elements::Break::new(1.5));

    doc.push(elements::Paragraph::new(format!("PEDIDO #{}", order.numero))
        .styled(style::Style::new().bold().with_font_size(14)));
    doc.push(elements::Paragraph::new(format!("Data: {}", order.created_at.format("%d/%m/%Y %H:%M"))));
    doc.push(elements::Paragraph::new(format!("Status: {}", order.status.label())));
    let cliente = order.cliente_nome.as_deref().unwrap_or("Consumidor final");
    doc.push(elements::Paragraph::new(format!("Cliente: {}", cliente)));
    if let Some(phone) = &order.cliente_telefone {
        doc.push(elements::Paragraph::new(format!("Telefone: {}", phone)));
    }
    match (order.tipo, &order.endereco) {
        (PedidoTipo::Delivery, Some(endereco)) => {
            doc.push(elements::Paragraph::new(format!("Entrega: {}", endereco)));
        }
        (PedidoTipo::Retirada, _) => doc.push(elements::Paragraph::new("Retirada no local")),
        (PedidoTipo::Local, _) => doc.push(elements::Paragraph::new("Consumo no local")),
        _ => {}
    }
    if let Some(forma) = &order.forma_pagamento {
        doc.push(elements::Paragraph::new(format!("Pagamento: {}", forma)));
    }

    doc.push(elements::Break::new(2));

    // --- TABELA DE ITENS ---
    // Pesos das colunas: Nome (4), Qtd (1), Preço (2), Total (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table.row()
        .element(elements::Paragraph::new("Produto").styled(style_bold))
        .element(elements::Paragraph::new("Qtd").styled(style_bold))
        .element(elements::Paragraph::new("Unitário").styled(style_bold))
        .element(elements::Paragraph::new("Total").styled(style_bold))
        .push()
        .map_err(pdf_error)?;

    for item in order.itens.iter() {
        let name = match &item.observacao {
            Some(obs) if !obs.is_empty() => format!("{} ({})", item.nome, obs),
            _ => item.nome.clone(),
        };
        table.row()
            .element(elements::Paragraph::new(name))
            .element(elements::Paragraph::new(item.quantidade.to_string()))
            .element(elements::Paragraph::new(format_brl(item.preco_unitario)))
            .element(elements::Paragraph::new(item.subtotal().map(format_brl).unwrap_or_default()))
            .push()
            .map_err(pdf_error)?;
    }

    doc.push(table);
    doc.push(elements::Break::new(1));

    if let Some(obs) = order.observacoes.as_deref().filter(|o| !o.is_empty()) {
        doc.push(elements::Paragraph::new(format!("Observações: {}", obs))
            .styled(style::Style::new().italic().with_font_size(9)));
        doc.push(elements::Break::new(1));
    }

    // --- TOTAIS ---
    if order.taxa_entrega > rust_decimal::Decimal::ZERO {
        let mut fee = elements::Paragraph::new(format!("Taxa de entrega: {}", format_brl(order.taxa_entrega)));
        fee.set_alignment(genpdf::Alignment::Right);
        doc.push(fee);
    }
    let mut total_paragraph = elements::Paragraph::new(format!("TOTAL: {}", format_brl(order.total)));
    total_paragraph.set_alignment(genpdf::Alignment::Right);
    doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

    // --- PIX (copia e cola + QR) ---
    if let Some(payload) = pix_payload {
        doc.push(elements::Break::new(2));
        doc.push(elements::Paragraph::new("PAGAMENTO VIA PIX")
            .styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Paragraph::new(payload.to_string())
            .styled(style::Style::new().with_font_size(7)));
        doc.push(elements::Break::new(1));

        let code = QrCode::new(payload.as_bytes()).map_err(pdf_error)?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(pdf_error)?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;

    use crate::models::{
        company::{CompanyPlan, CompanyStatus},
        orders::{PedidoItem, PedidoStatus},
    };

    #[test]
    fn missing_fonts_are_reported() {
        let company = Company {
            id: Uuid::new_v4(),
            name: "Pizzaria do João".into(),
            slug: "pizzaria-do-joao".into(),
            domain: None,
            city: None,
            plan: CompanyPlan::Free,
            status: CompanyStatus::Active,
            whatsapp_instance: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let order = Pedido {
            id: Uuid::new_v4(),
            company_id: company.id,
            numero: 1,
            status: PedidoStatus::Pendente,
            tipo: PedidoTipo::Retirada,
            cliente_nome: Some("Maria".into()),
            cliente_telefone: None,
            endereco: None,
            forma_pagamento: None,
            taxa_entrega: Decimal::ZERO,
            total: Decimal::new(4990, 2),
            itens: Json(vec![PedidoItem {
                produto_id: None,
                nome: "Pizza Margherita".into(),
                quantidade: 1,
                preco_unitario: Decimal::new(4990, 2),
                observacao: None,
            }]),
            observacoes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let result = render_receipt("/caminho/que/nao/existe", &company, &order, None);
        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
