// smartbridge-rs/src/main.rs
// SmartBridge web UI
// Port 8501 on loopback unless SMARTBRIDGE_SERVICE_ADDR / SMARTBRIDGE_SERVICE_PORT say otherwise

use std::sync::Arc;

use anyhow::Context;
use genai_sdk::config::DEFAULT_PROVIDER;
use genai_sdk::gemini::GeminiClient;
use genai_sdk::GeminiConfig;

use smartbridge::web::{router, AppState};
use smartbridge::SmartBridge;

const SERVICE_NAME: &str = "SMARTBRIDGE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config_rs::load_dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeminiConfig::from_provider(&**DEFAULT_PROVIDER)
        .context("failed to load Gemini configuration (set SMARTBRIDGE_API_KEY or API_KEY)")?;

    let candidates: Vec<&str> = config.model_candidates.iter().map(|c| c.as_str()).collect();
    log::info!("Model candidates: {}", candidates.join(", "));

    let backend = GeminiClient::new_with_config(config.clone()).context("failed to build Gemini client")?;
    let bridge = SmartBridge::from_config(Arc::new(backend), &config);

    let state = Arc::new(AppState::new(
        bridge,
        config_rs::get_formatted_service_name(SERVICE_NAME),
    ));
    let app = router(state);

    let addr = config_rs::get_bind_address(SERVICE_NAME, config_rs::DEFAULT_UI_PORT);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    log::info!("SmartBridge listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
