use super::session::GameStatus;
use super::validation::Rejection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateGame { player_name: String },
    JoinGame { game_code: String, player_name: String },
    SubmitWord { game_code: String, word: String },
    PlayerReady { game_code: String },
    PlayAgain { game_code: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    GameCreated { state: GameSnapshot },
    GameUpdate { state: GameSnapshot },
    TimerTick { seconds_remaining: u32 },
    WordValidated { word: String },
    InvalidWord { reason: Rejection, message: String },
    PlayerLeft { message: String },
    Error { message: String },
}

/// Full session state as seen by clients. Rebuilt from scratch for every broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_code: String,
    pub players: Vec<PlayerSnapshot>,
    pub status: GameStatus,
    pub round: u32,
    pub letters: Vec<char>,
    pub timer: u32,
    pub round_winner: Option<String>,
    pub game_winner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub total_score: u32,
    pub round_score: u32,
    pub rounds_won: u32,
    pub submitted_words: Vec<String>,
    pub ready: bool,
    pub wants_to_play_again: bool,
}

impl GameSnapshot {
    pub fn player(&self, id: &str) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}
