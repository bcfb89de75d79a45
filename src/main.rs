// src/main.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod clients;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::{
    config::{connect_pool, AppState, Settings},
    db::UserRepository,
};

#[derive(Parser, Debug)]
#[command(name = "cardapio-backend")]
#[command(about = "API do cardápio digital, pedidos e assistente de WhatsApp")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sobe o servidor HTTP (padrão)
    Serve,

    /// Cria um superadmin (ou promove o usuário existente e troca a senha)
    CreateSuperadmin {
        #[arg(long, env = "SUPERADMIN_EMAIL")]
        email: String,

        #[arg(long, env = "SUPERADMIN_PASSWORD")]
        password: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// Mostra quantos usuários existem por papel e os que apontam para empresa inexistente
    VerifyUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carrega o .env antes do clap ler as variáveis
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::CreateSuperadmin { email, password, name } => {
            create_superadmin(settings, &email, &password, name.as_deref()).await
        }
        Command::VerifyUsers => verify_users(settings).await,
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let app_state = AppState::new(&settings).await?;

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados.")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = routes::build_router(app_state);

    let listener = TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", settings.server_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

async fn create_superadmin(
    settings: Settings,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> anyhow::Result<()> {
    if password.len() < 6 {
        anyhow::bail!("A senha deve ter no mínimo 6 caracteres.");
    }

    let app_state = AppState::new(&settings).await?;
    sqlx::migrate!().run(&app_state.db_pool).await?;

    let user = app_state
        .auth_service
        .ensure_superadmin(email, password, name)
        .await
        .context("Falha ao criar o superadmin")?;

    tracing::info!("👑 Superadmin pronto: {} ({})", user.email, user.id);
    Ok(())
}

async fn verify_users(settings: Settings) -> anyhow::Result<()> {
    let pool = connect_pool(&settings).await?;
    let user_repo = UserRepository::new(pool);

    let counts = user_repo.count_by_role().await.context("Falha ao contar usuários")?;
    if counts.is_empty() {
        tracing::warn!("⚠️ Nenhum usuário cadastrado");
    }
    for count in &counts {
        tracing::info!("👥 {:?}: {}", count.role, count.total);
    }

    let orphans = user_repo.find_orphans().await.context("Falha ao buscar usuários órfãos")?;
    if orphans.is_empty() {
        tracing::info!("✅ Todos os usuários apontam para empresas existentes");
    } else {
        for user in &orphans {
            tracing::warn!("⚠️ Usuário {} ({:?}) sem empresa válida", user.email, user.role);
        }
    }

    Ok(())
}
