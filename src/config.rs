// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    clients::{GoogleMapsClient, MegaApiClient, OpenAiClient},
    db::{
        CompanyRepository, ConversationRepository, DeliveryRepository, MenuRepository,
        OrderRepository, PaymentRepository, UserRepository,
    },
    services::{
        assistant_service::AssistantService, auth::AuthService, company_service::CompanyService,
        conversation_logger::ConversationLogger, delivery_service::DeliveryService,
        document_service::DocumentService, menu_service::MenuService,
        order_service::OrderService, payment_service::PaymentService,
    },
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub megaapi_base_url: Option<String>,
    pub megaapi_token: Option<String>,
    pub google_maps_api_key: Option<String>,
}

// Variável opcional: vazia conta como ausente
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let db_max_connections = match optional("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", value))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr: optional("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            db_max_connections,
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_model: optional("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            megaapi_base_url: optional("MEGAAPI_BASE_URL"),
            megaapi_token: optional("MEGAAPI_TOKEN"),
            google_maps_api_key: optional("GOOGLE_MAPS_API_KEY"),
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub delivery_service: DeliveryService,
    pub payment_service: PaymentService,
    pub menu_service: MenuService,
    pub order_service: OrderService,
    pub document_service: DocumentService,
    pub conversation_repo: ConversationRepository,
    pub assistant_service: AssistantService,
    pub maps_client: GoogleMapsClient,
}

pub async fn connect_pool(settings: &Settings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&settings.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = connect_pool(settings).await?;
        Self::from_pool(db_pool, settings)
    }

    /// Monta o grafo de dependências sobre uma pool já criada.
    pub fn from_pool(db_pool: PgPool, settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        // --- Repositórios ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let delivery_repo = DeliveryRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let menu_repo = MenuRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let conversation_repo = ConversationRepository::new(db_pool.clone());

        // --- Clientes externos ---
        let openai = OpenAiClient::new(
            http.clone(),
            settings.openai_api_key.clone(),
            settings.openai_base_url.clone(),
            settings.openai_model.clone(),
        );
        let megaapi = MegaApiClient::new(
            http.clone(),
            settings.megaapi_base_url.clone(),
            settings.megaapi_token.clone(),
        );
        let maps_client = GoogleMapsClient::new(http, settings.google_maps_api_key.clone());

        // --- Serviços ---
        let auth_service = AuthService::new(user_repo, settings.jwt_secret.clone());
        let company_service = CompanyService::new(company_repo);
        let delivery_service = DeliveryService::new(delivery_repo.clone());
        let payment_service = PaymentService::new(payment_repo);
        let menu_service = MenuService::new(menu_repo);
        let order_service = OrderService::new(order_repo, delivery_repo, db_pool.clone());
        let document_service = DocumentService::new(
            company_service.clone(),
            order_service.clone(),
            payment_service.clone(),
        );
        let logger = ConversationLogger::new(Arc::new(conversation_repo.clone()));
        let assistant_service = AssistantService::new(
            company_service.clone(),
            menu_service.clone(),
            delivery_service.clone(),
            payment_service.clone(),
            conversation_repo.clone(),
            logger,
            openai,
            megaapi,
        );

        Ok(Self {
            db_pool,
            auth_service,
            company_service,
            delivery_service,
            payment_service,
            menu_service,
            order_service,
            document_service,
            conversation_repo,
            assistant_service,
            maps_client,
        })
    }
}
