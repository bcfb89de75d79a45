// src/services/assistant_service.rs
//
// Assistente de pedidos via WhatsApp: busca o contexto da loja, chama a OpenAI,
// responde pela MegaAPI e grava o turno no log (sem esperar a gravação).

use std::fmt::Write as _;
use std::time::Instant;

use uuid::Uuid;
use crate::{
    clients::{openai::ChatMessage, MegaApiClient, OpenAiClient},
    common::error::AppError,
    db::ConversationRepository,
    models::{
        company::Company,
        conversation::{AiConversationLog, ConversationTurn, MessageType},
        delivery::DeliveryOptions,
        functions::MegaApiWebhook,
        menu::Produto,
        payment::PaymentOption,
    },
    services::{
        conversation_logger::ConversationLogger,
        delivery_service::{format_brl, DeliveryService},
        menu_service::MenuService,
        payment_service::PaymentService,
        company_service::CompanyService,
    },
};

const HISTORY_LIMIT: i64 = 10;

/// Tudo o que o assistente precisa saber sobre a loja.
pub struct AssistantContext<'a> {
    pub company: &'a Company,
    pub products: &'a [Produto],
    pub delivery: &'a DeliveryOptions,
    pub payments: &'a [PaymentOption],
}

#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub content: String,
    pub tokens_used: Option<i32>,
    pub response_time_ms: i32,
}

pub fn build_system_prompt(ctx: &AssistantContext<'_>) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Você é o atendente virtual da loja \"{}\" no WhatsApp. Responda em português do Brasil, \
         de forma curta e simpática. Use apenas as informações abaixo; se não souber, diga que \
         vai chamar um atendente humano. Nunca invente produtos ou preços.",
        ctx.company.name
    );

    prompt.push_str("\n# Cardápio\n");
    if ctx.products.is_empty() {
        prompt.push_str("(cardápio indisponível no momento)\n");
    }
    let mut current_category: Option<&str> = None;
    for product in ctx.products {
        let category = product.categoria.as_deref().unwrap_or("Outros");
        if current_category != Some(category) {
            let _ = writeln!(prompt, "## {}", category);
            current_category = Some(category);
        }
        let _ = write!(prompt, "- {}: {}", product.nome, format_brl(product.preco));
        if let Some(desc) = product.descricao.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(prompt, " ({})", desc);
        }
        prompt.push('\n');
    }

    prompt.push_str("\n# Entrega\n");
    for option in &ctx.delivery.options {
        let _ = writeln!(prompt, "- {}: {}", option.label, option.description);
    }

    prompt.push_str("\n# Formas de pagamento\n");
    if ctx.payments.is_empty() {
        prompt.push_str("(consulte o atendente)\n");
    }
    for payment in ctx.payments {
        let _ = write!(prompt, "- {}", payment.label);
        if payment.ask_card_brand && !payment.card_brands.is_empty() {
            let _ = write!(prompt, " (bandeiras: {})", payment.card_brands.join(", "));
        }
        prompt.push('\n');
    }

    prompt
}

/// Sistema + histórico (mais antigo primeiro) + mensagem nova.
pub fn build_messages(system_prompt: String, history: &[AiConversationLog], user_message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    for entry in history {
        messages.push(match entry.message_type {
            MessageType::User => ChatMessage::user(entry.message_content.clone()),
            MessageType::Assistant => ChatMessage::assistant(entry.message_content.clone()),
        });
    }
    messages.push(ChatMessage::user(user_message));
    messages
}

#[derive(Clone)]
pub struct AssistantService {
    companies: CompanyService,
    menu: MenuService,
    delivery: DeliveryService,
    payment: PaymentService,
    conversations: ConversationRepository,
    logger: ConversationLogger,
    openai: OpenAiClient,
    megaapi: MegaApiClient,
}

impl AssistantService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        companies: CompanyService,
        menu: MenuService,
        delivery: DeliveryService,
        payment: PaymentService,
        conversations: ConversationRepository,
        logger: ConversationLogger,
        openai: OpenAiClient,
        megaapi: MegaApiClient,
    ) -> Self {
        Self { companies, menu, delivery, payment, conversations, logger, openai, megaapi }
    }

    /// Gera a resposta do assistente e dispara o log do turno.
    pub async fn reply(
        &self,
        company: &Company,
        customer_phone: &str,
        message: &str,
    ) -> Result<AssistantReply, AppError> {
        let products = self
            .menu
            .list_products(company.id, true)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Cardápio indisponível para {}: {}", company.slug, e);
                Vec::new()
            });
        let delivery = self.delivery.resolve_options(company.id).await;
        let payments = self.payment.resolve_options(company.id).await;
        let history = self
            .conversations
            .recent_history(company.id, customer_phone, HISTORY_LIMIT)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️ Histórico indisponível para {}: {}", customer_phone, e);
                Vec::new()
            });

        let system_prompt = build_system_prompt(&AssistantContext {
            company,
            products: &products,
            delivery: &delivery,
            payments: &payments,
        });
        let messages = build_messages(system_prompt, &history, message);

        let started = Instant::now();
        let completion = self.openai.chat(&messages).await?;
        let response_time_ms = i32::try_from(started.elapsed().as_millis()).unwrap_or(i32::MAX);

        tracing::info!(
            "🤖 Resposta gerada para {} ({} ms, {:?} tokens)",
            customer_phone, response_time_ms, completion.tokens_used
        );

        self.logger.spawn_log_turn(ConversationTurn {
            company_id: company.id,
            customer_phone: customer_phone.to_string(),
            user_message: message.to_string(),
            assistant_reply: completion.content.clone(),
            tokens_used: completion.tokens_used,
            response_time_ms: Some(response_time_ms),
        });

        Ok(AssistantReply {
            content: completion.content,
            tokens_used: completion.tokens_used,
            response_time_ms,
        })
    }

    /// Chat direto (sem WhatsApp). A empresa precisa existir e estar ativa.
    pub async fn chat_direct(
        &self,
        company_id: Uuid,
        customer_phone: &str,
        message: &str,
    ) -> Result<AssistantReply, AppError> {
        let company = self.companies.get_company(company_id).await?;
        if !company.is_active() {
            return Err(AppError::CompanyNotFound);
        }
        self.reply(&company, customer_phone, message.trim()).await
    }

    /// Processa o webhook da MegaAPI. Retorna `false` quando a mensagem foi ignorada.
    pub async fn handle_whatsapp(&self, webhook: &MegaApiWebhook) -> Result<bool, AppError> {
        let Some(incoming) = webhook.incoming_text() else {
            tracing::debug!("Webhook ignorado (sem texto de cliente)");
            return Ok(false);
        };

        let company = match self.companies.find_by_whatsapp_instance(&incoming.instance_key).await? {
            Some(company) if company.is_active() => company,
            Some(company) => {
                tracing::info!("Empresa {} inativa, mensagem ignorada", company.slug);
                return Ok(false);
            }
            None => {
                tracing::warn!("⚠️ Instância {} sem empresa vinculada", incoming.instance_key);
                return Ok(false);
            }
        };

        tracing::info!(
            "💬 Mensagem de {} ({}) para {}",
            incoming.phone,
            incoming.push_name.as_deref().unwrap_or("sem nome"),
            company.slug
        );

        let reply = self.reply(&company, &incoming.phone, &incoming.text).await?;
        self.megaapi
            .send_text(&incoming.instance_key, &incoming.phone, &reply.content)
            .await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::models::company::{CompanyPlan, CompanyStatus};
    use crate::services::{delivery_service::default_delivery_options, payment_service::default_payment_options};

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Pizzaria do João".into(),
            slug: "pizzaria-do-joao".into(),
            domain: None,
            city: Some("Campinas".into()),
            plan: CompanyPlan::Pro,
            status: CompanyStatus::Active,
            whatsapp_instance: Some("megacode-abc".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn produto(nome: &str, categoria: &str, centavos: i64) -> Produto {
        Produto {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            nome: nome.into(),
            descricao: None,
            preco: Decimal::new(centavos, 2),
            categoria: Some(categoria.into()),
            ativo: true,
            created_at: Utc::now(),
        }
    }

    fn log(message_type: MessageType, content: &str) -> AiConversationLog {
        AiConversationLog {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            customer_phone: "5511999998888".into(),
            message_type,
            message_content: content.into(),
            tokens_used: None,
            response_time_ms: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn prompt_lists_menu_delivery_and_payment() {
        let company = company();
        let products = vec![
            produto("Calabresa", "Pizzas", 4500),
            produto("Margherita", "Pizzas", 4990),
            produto("Guaraná 2L", "Bebidas", 1200),
        ];
        let delivery = default_delivery_options();
        let payments = default_payment_options();

        let prompt = build_system_prompt(&AssistantContext {
            company: &company,
            products: &products,
            delivery: &delivery,
            payments: &payments,
        });

        assert!(prompt.contains("\"Pizzaria do João\""));
        assert_eq!(prompt.matches("## Pizzas").count(), 1);
        assert!(prompt.contains("- Margherita: R$ 49,90"));
        assert!(prompt.contains("## Bebidas"));
        assert!(prompt.contains("- Retirada no local"));
        assert!(prompt.contains("- Pix"));
    }

    #[test]
    fn empty_menu_is_stated() {
        let company = company();
        let delivery = default_delivery_options();
        let prompt = build_system_prompt(&AssistantContext {
            company: &company,
            products: &[],
            delivery: &delivery,
            payments: &[],
        });
        assert!(prompt.contains("cardápio indisponível"));
        assert!(prompt.contains("consulte o atendente"));
    }

    #[test]
    fn messages_keep_history_order() {
        let history = vec![
            log(MessageType::User, "Oi"),
            log(MessageType::Assistant, "Olá! Como posso ajudar?"),
        ];
        let messages = build_messages("sistema".into(), &history, "Quero uma pizza");

        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages.last().unwrap().content, "Quero uma pizza");
    }
}
