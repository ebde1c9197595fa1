#![allow(dead_code)]

use futures_util::future::BoxFuture;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use words_collide::messages::{ClientMessage, GameSnapshot, ServerMessage};
use words_collide::{Dictionary, GameConfig};

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("{}/ws", self.base_url)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!(
            "http://{}{}",
            self.base_url.strip_prefix("ws://").unwrap(),
            path
        )
    }
}

/// Dictionary that knows every word
pub struct EveryWord;

impl Dictionary for EveryWord {
    fn contains<'a>(&'a self, _word: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async { true })
    }
}

/// Dictionary that knows no words
pub struct NoWords;

impl Dictionary for NoWords {
    fn contains<'a>(&'a self, _word: &'a str) -> BoxFuture<'a, bool> {
        Box::pin(async { false })
    }
}

pub async fn spawn_test_server() -> TestServer {
    spawn_test_server_with(Arc::new(EveryWord), GameConfig::default()).await
}

pub async fn spawn_test_server_with(dictionary: Arc<dyn Dictionary>, config: GameConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let app = words_collide::app_with_config(dictionary, config);
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("ws://{}", addr),
    }
}

/// Rounds that finish in a fraction of a second
pub fn quick_rounds() -> GameConfig {
    GameConfig {
        round_duration_secs: 2,
        tick_interval: Duration::from_millis(200),
    }
}

pub async fn connect(server: &TestServer) -> WsStream {
    let (ws, _) = connect_async(&server.ws_url()).await.expect("Failed to connect");
    ws
}

fn to_message(msg: &ClientMessage) -> Message {
    let json = serde_json::to_string(msg).unwrap();
    Message::Text(json.into())
}

pub fn create_game_msg(player_name: &str) -> Message {
    to_message(&ClientMessage::CreateGame {
        player_name: player_name.to_string(),
    })
}

pub fn join_game_msg(game_code: &str, player_name: &str) -> Message {
    to_message(&ClientMessage::JoinGame {
        game_code: game_code.to_string(),
        player_name: player_name.to_string(),
    })
}

pub fn submit_word_msg(game_code: &str, word: &str) -> Message {
    to_message(&ClientMessage::SubmitWord {
        game_code: game_code.to_string(),
        word: word.to_string(),
    })
}

pub fn ready_msg(game_code: &str) -> Message {
    to_message(&ClientMessage::PlayerReady {
        game_code: game_code.to_string(),
    })
}

pub fn play_again_msg(game_code: &str) -> Message {
    to_message(&ClientMessage::PlayAgain {
        game_code: game_code.to_string(),
    })
}

pub async fn recv(ws: &mut WsStream) -> ServerMessage {
    let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
        .await
        .expect("Timed out waiting for message")
        .unwrap()
        .unwrap();
    serde_json::from_str(msg.to_text().unwrap()).unwrap()
}

/// Next message that is not a timer tick
pub async fn recv_event(ws: &mut WsStream) -> ServerMessage {
    loop {
        match recv(ws).await {
            ServerMessage::TimerTick { .. } => continue,
            other => return other,
        }
    }
}

/// Next full state update, skipping timer ticks
pub async fn recv_state(ws: &mut WsStream) -> GameSnapshot {
    match recv_event(ws).await {
        ServerMessage::GameUpdate { state } => state,
        other => panic!("Expected GameUpdate, got {:?}", other),
    }
}

/// Create a game as "Alice" and return the host socket and code
pub async fn host_game(server: &TestServer) -> (WsStream, String) {
    let mut host = connect(server).await;
    host.send(create_game_msg("Alice")).await.unwrap();

    let code = match recv(&mut host).await {
        ServerMessage::GameCreated { state } => state.game_code,
        other => panic!("Expected GameCreated, got {:?}", other),
    };
    (host, code)
}

/// Host a game, join it as "Bob", and return both sockets with the first round state
pub async fn start_match(server: &TestServer) -> (WsStream, WsStream, GameSnapshot) {
    let (mut host, code) = host_game(server).await;
    let mut guest = connect(server).await;
    guest.send(join_game_msg(&code, "Bob")).await.unwrap();

    let state = recv_state(&mut host).await;
    assert_eq!(recv_state(&mut guest).await, state);
    (host, guest, state)
}

/// A five-letter word built from the round's own letters
pub fn formable_word(state: &GameSnapshot) -> String {
    state.letters[..5].iter().collect::<String>().to_lowercase()
}
