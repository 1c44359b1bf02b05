use neuq_free_classroom::config::{RenderConfig, ServerConfig};
use neuq_free_classroom::error::Result;
use neuq_free_classroom::logging;
use neuq_free_classroom::render::Renderer;
use neuq_free_classroom::server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");
    println!("🏫 NEUQ 空教室可视化系统");
    println!("==============================");

    let config = ServerConfig::from_env()?;
    let renderer = Renderer::new(RenderConfig::default())?;
    serve(config, AppState::new(renderer)).await
}
