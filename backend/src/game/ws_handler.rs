use super::engine::SessionRegistry;
use super::ws::{ConnectionContext, ConnectionHandler, run_connection};
use crate::game::core::messages::{ClientMessage, ServerMessage};
use axum::extract::ws::WebSocket;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

impl ConnectionHandler for SessionRegistry {
    async fn handle_message(
        self: Arc<Self>,
        msg: ClientMessage,
        tx: broadcast::Sender<ServerMessage>,
        ctx: &ConnectionContext,
    ) {
        let player_id = ctx.player_id.as_str();

        match msg {
            ClientMessage::CreateGame { player_name } => {
                let reply = match self.create(player_id, &player_name, tx.clone()) {
                    Ok(state) => ServerMessage::GameCreated { state },
                    Err(err) => ServerMessage::Error {
                        message: err.to_string(),
                    },
                };
                let _ = tx.send(reply);
            }
            ClientMessage::JoinGame {
                game_code,
                player_name,
            } => {
                if let Err(err) = self.join(player_id, &game_code, &player_name, tx.clone()) {
                    debug!(player_id, game_code, %err, "Join refused");
                    let _ = tx.send(ServerMessage::Error {
                        message: err.to_string(),
                    });
                }
            }
            ClientMessage::SubmitWord { game_code, word } => {
                self.submit_word(player_id, &game_code, &word).await;
            }
            ClientMessage::PlayerReady { game_code } => {
                self.player_ready(player_id, &game_code);
            }
            ClientMessage::PlayAgain { game_code } => {
                self.play_again(player_id, &game_code);
            }
        }
    }

    fn handle_disconnect(&self, player_id: &str) {
        self.remove_player(player_id);
    }

    fn name(&self) -> &'static str {
        "game"
    }
}

pub async fn handle_connection(socket: WebSocket, registry: Arc<SessionRegistry>) {
    run_connection(socket, registry).await;
}
