// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;
use std::sync::Arc;

use taskhub_server::{
    api::router,
    auth::TokenService,
    config::AppConfig,
    logging,
    rbac::PermissionRegistry,
    state::AppState,
    storage::{
        seed::{seed_admin_invite, seed_default_roles},
        Storage,
    },
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return Err(err.into());
        }
    };
    logging::init(config.log_format);

    let storage = Storage::new();
    seed_default_roles(&storage).await?;
    if let Some(token) = &config.seed_invite_token {
        seed_admin_invite(&storage, token).await?;
    }

    let state = AppState::new(
        storage,
        Arc::new(PermissionRegistry::standard()),
        TokenService::new(config.auth.secret.as_bytes()),
    )
    .with_token_lifetimes(config.auth.lifetimes);
    let app = router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "TaskHub server listening");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "server failed");
        return Err(err.into());
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
