use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("🚀 Starting priority vote server");

    let rocket = backend::build_rocket(rocket::Config::figment())?;
    let _ = rocket.launch().await?;
    Ok(())
}
