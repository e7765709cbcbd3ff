use anyhow::Context;
use portfolio_projects_api::{
    db::postgres::{create_pool, run_migrations},
    seed_data::sample_projects,
    settings::AppConfig,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::new().context("Failed to load configuration")?;
    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database connection pool")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let state = AppState::new(pool.clone());
    let handler = &state.project_handler;

    tracing::info!("Start seeding...");

    let removed = handler.project_repo.delete_all_projects().await?;
    tracing::info!(removed, "Cleared existing projects");

    for sample in sample_projects().context("Sample projects are malformed")? {
        let project = handler.create_project(sample).await?;
        tracing::info!("Created project with id: {}", project.id);
    }

    tracing::info!("Seeding finished.");
    pool.close().await;
    Ok(())
}
