use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = north_node_config::load_server_settings()?;
    let state = node_server::build_state(&settings)?;
    let app = node_server::router(state, &settings.cors_origins);

    let listener = tokio::net::TcpListener::bind(&settings.bind)
        .await
        .with_context(|| format!("binding {}", settings.bind))?;
    log::info!("north node service listening on {}", settings.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
