use docstream::infrastructure::{AppConfig, AppContainer};
use docstream::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tracing::info!(
        port = config.server_port,
        upload_dir = %config.upload_dir.display(),
        embed_api_url = %config.embed_api_url,
        "Starting docstream"
    );

    let container = AppContainer::new(config).await?;
    HttpServer::new(&container).run().await?;

    Ok(())
}
