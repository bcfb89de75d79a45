// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,

        // --- Users ---
        handlers::auth::get_me,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::create_company,
        handlers::companies::update_company,

        // --- Cardápio (público) ---
        handlers::public::get_company,
        handlers::public::get_menu,
        handlers::public::get_delivery_options,
        handlers::public::get_payment_options,
        handlers::public::create_order,
        handlers::public::get_order_pix,

        // --- Delivery ---
        handlers::delivery::get_methods,
        handlers::delivery::upsert_methods,
        handlers::delivery::list_regions,
        handlers::delivery::create_region,
        handlers::delivery::update_region,
        handlers::delivery::delete_region,

        // --- Payment ---
        handlers::payment::get_config,
        handlers::payment::upsert_config,
        handlers::payment::list_card_brands,
        handlers::payment::create_card_brand,

        // --- Menu ---
        handlers::menu::list_products,
        handlers::menu::create_product,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_status,
        handlers::orders::get_order_pix,
        handlers::orders::get_receipt,

        // --- Conversations ---
        handlers::conversations::list_conversations,

        // --- Functions ---
        handlers::functions::whatsapp_webhook,
        handlers::functions::ai_chat,
        handlers::functions::geocode,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Companies ---
            models::company::CompanyPlan,
            models::company::CompanyStatus,
            models::company::Company,
            models::company::CreateCompanyPayload,
            models::company::UpdateCompanyPayload,

            // --- Delivery ---
            models::delivery::DeliveryMethod,
            models::delivery::UpsertDeliveryMethodPayload,
            models::delivery::ServiceRegion,
            models::delivery::CreateRegionPayload,
            models::delivery::UpdateRegionPayload,
            models::delivery::DeliveryOptionKind,
            models::delivery::DeliveryOption,
            models::delivery::DeliverySummary,
            models::delivery::DeliveryOptions,

            // --- Payment ---
            models::payment::PaymentDeliveryConfig,
            models::payment::UpsertPaymentConfigPayload,
            models::payment::CardBrand,
            models::payment::CreateCardBrandPayload,
            models::payment::PaymentMethodKind,
            models::payment::PaymentOption,

            // --- Menu ---
            models::menu::Produto,
            models::menu::CreateProdutoPayload,

            // --- Orders ---
            models::orders::PedidoStatus,
            models::orders::PedidoTipo,
            models::orders::PedidoItem,
            models::orders::Pedido,
            models::orders::CreatePedidoPayload,
            models::orders::UpdatePedidoStatusPayload,
            services::order_service::PedidoPix,

            // --- Conversations ---
            models::conversation::MessageType,
            models::conversation::AiConversationLog,

            // --- Functions ---
            models::functions::MegaApiWebhook,
            models::functions::MegaApiMessageKey,
            models::functions::AiChatRequest,
            models::functions::AiChatResponse,
            models::functions::WebhookAck,
            models::functions::GeocodeRequest,
            models::functions::GeocodeResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e cadastro de equipe"),
        (name = "Users", description = "Dados do usuário"),
        (name = "Companies", description = "Gestão de empresas (superadmin)"),
        (name = "Cardápio", description = "Cardápio digital público"),
        (name = "Delivery", description = "Métodos de entrega e regiões de atendimento"),
        (name = "Payment", description = "Formas de pagamento na entrega"),
        (name = "Menu", description = "Produtos do cardápio"),
        (name = "Orders", description = "Pedidos (PDV), comanda e Pix"),
        (name = "Conversations", description = "Log do assistente de WhatsApp"),
        (name = "Functions", description = "Webhooks e funções (WhatsApp, OpenAI, Google Maps)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
