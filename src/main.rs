use std::sync::Arc;

use charforge::app::App;
use charforge::logging;
use charforge::server::{self, ServerState};
use charforge::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut settings = Settings::load().unwrap_or_default();
    settings.apply_env_overrides();

    logging::init(&settings.data_dir)?;
    if let Err(err) = settings.save() {
        log::warn!("could not persist settings: {err}");
    }

    println!("Server running on port {}", settings.port);
    println!(
        "Ollama API calls using: {} (model {})",
        settings.ollama_base_url, settings.ollama_model
    );
    println!(
        "Stable Diffusion API calls using: {}",
        settings.stable_diffusion_base_url
    );
    println!(
        "If Ollama or Stable Diffusion are not running on this machine, name, backstory \
         and portrait generation will fall back or fail. Ensure they are reachable on \
         ports 11434 and 7860."
    );
    log::info!(
        "starting charforge on port {} (rules source {})",
        settings.port,
        settings.rules_api_base_url
    );

    let port = settings.port;
    let app = App::new(settings)?;
    let state = Arc::new(ServerState::new(app));
    server::serve(state, port).await?;

    Ok(())
}
