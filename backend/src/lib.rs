mod game;

pub use game::core::{dictionary, letters, scoring, session, validation};
pub use game::engine::{active_game, game_code, registry};
pub use game::{Dictionary, GameConfig, SessionRegistry, WordList, WordRepository, messages};

use axum::{
    Router,
    extract::{State, WebSocketUpgrade, ws::WebSocket},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

async fn health() -> &'static str {
    "ok"
}

async fn index() -> &'static str {
    "Words Collide backend is running!"
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    game::handle_connection(socket, state.registry).await;
}

pub fn app_with_config(dictionary: Arc<dyn Dictionary>, config: GameConfig) -> Router {
    let state = AppState {
        registry: Arc::new(SessionRegistry::new(dictionary, config)),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
