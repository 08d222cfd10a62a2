//! idobata チャットサーバーのエントリポイント

use std::sync::Arc;

use clap::Parser;

use idobata_server::infrastructure::registry::WebSocketConnectionRegistry;
use idobata_server::infrastructure::repository::InMemoryMessageStore;
use idobata_server::infrastructure::session::LoggingSessionGate;
use idobata_server::ui::{AppState, Server};
use idobata_server::usecase::{
    CloseConnectionUseCase, OpenConnectionUseCase, PresenceConfig, PresenceTracker,
    SendMessageUseCase,
};
use idobata_shared::logger::setup_logger;
use idobata_shared::time::SystemClock;

#[derive(Debug, Parser)]
#[command(name = "idobata-server", about = "Realtime chat presence and broadcast server")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Grace period before a disconnected user goes offline, in seconds
    #[arg(long, default_value_t = 60)]
    grace: u32,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // 1. Infrastructure
    let registry = Arc::new(WebSocketConnectionRegistry::new());
    let store = Arc::new(InMemoryMessageStore::new());
    let sessions = Arc::new(LoggingSessionGate::new());
    let clock = Arc::new(SystemClock);

    // 2. Presence tracker (owns the timeout reaper)
    let presence = PresenceTracker::new(
        registry.clone(),
        store.clone(),
        sessions,
        PresenceConfig {
            grace_units: args.grace,
            ..PresenceConfig::default()
        },
    );

    // 3. UseCases
    let open_connection_usecase = OpenConnectionUseCase::new(
        registry.clone(),
        store.clone(),
        presence.clone(),
        clock.clone(),
    );
    let send_message_usecase = SendMessageUseCase::new(registry.clone(), store.clone(), clock);
    let close_connection_usecase = CloseConnectionUseCase::new(registry.clone(), presence.clone());

    // 4. UI
    let state = Arc::new(AppState::new(
        open_connection_usecase,
        send_message_usecase,
        close_connection_usecase,
        presence,
    ));
    let server = Server::new(args.host, args.port, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
