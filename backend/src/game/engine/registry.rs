use super::active_game::{ActiveGame, Games, TICK_INTERVAL};
use super::game_code::{generate_unique_game_code, normalize_game_code};
use crate::game::core::Dictionary;
use crate::game::core::messages::{GameSnapshot, ServerMessage};
use crate::game::core::player::Player;
use crate::game::core::session::{GameSession, GameStatus, ROUND_DURATION_SECS, SessionError};
use crate::game::core::validation::{Rejection, normalize};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

pub const OPPONENT_LEFT: &str = "Your opponent has disconnected.";

/// Round timing, overridable so tests can run short rounds
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub round_duration_secs: u32,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,
            tick_interval: TICK_INTERVAL,
        }
    }
}

/// Owns every live session, keyed by game code.
/// Each operation holds the session's map entry for its whole transition, so
/// transitions on one session never interleave.
pub struct SessionRegistry {
    dictionary: Arc<dyn Dictionary>,
    games: Games,
    player_games: DashMap<String, String>, // player_id -> game_code
    config: GameConfig,
}

impl SessionRegistry {
    pub fn new(dictionary: Arc<dyn Dictionary>, config: GameConfig) -> Self {
        Self {
            dictionary,
            games: Arc::new(DashMap::new()),
            player_games: DashMap::new(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.games.contains_key(code)
    }

    pub fn snapshot(&self, code: &str) -> Option<GameSnapshot> {
        self.games.get(code).map(|game| game.session.snapshot())
    }

    pub fn is_ticking(&self, code: &str) -> bool {
        self.games.get(code).is_some_and(|game| game.is_ticking())
    }

    fn check_new_seat<'a>(&self, player_id: &str, player_name: &'a str) -> Result<&'a str, SessionError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(SessionError::MissingName);
        }
        if self.player_games.contains_key(player_id) {
            return Err(SessionError::AlreadyInGame);
        }
        Ok(name)
    }

    /// Open a new session with the caller as its only player
    pub fn create(
        &self,
        player_id: &str,
        player_name: &str,
        tx: broadcast::Sender<ServerMessage>,
    ) -> Result<GameSnapshot, SessionError> {
        let name = self.check_new_seat(player_id, player_name)?;

        loop {
            let code = generate_unique_game_code(|code| self.games.contains_key(code));
            // Another create may have claimed the code since the check
            let Entry::Vacant(slot) = self.games.entry(code.clone()) else {
                continue;
            };

            let session = GameSession::new(
                code.clone(),
                Player::new(player_id, name),
                self.config.round_duration_secs,
            );
            let snapshot = session.snapshot();
            slot.insert(ActiveGame::new(session, player_id, tx));
            self.player_games.insert(player_id.to_string(), code.clone());

            info!(game_code = code, player_name = name, "Created game");
            return Ok(snapshot);
        }
    }

    /// Seat a second player and start the first round
    pub fn join(
        &self,
        player_id: &str,
        code: &str,
        player_name: &str,
        tx: broadcast::Sender<ServerMessage>,
    ) -> Result<(), SessionError> {
        let name = self.check_new_seat(player_id, player_name)?;
        let code = normalize_game_code(code);

        let mut game = self.games.get_mut(&code).ok_or(SessionError::NotFound)?;
        game.session.add_player(Player::new(player_id, name))?;
        game.add_channel(player_id, tx);
        self.player_games.insert(player_id.to_string(), code.clone());

        info!(game_code = code, player_name = name, "Player joined");

        game.start_round(&self.games, self.config.tick_interval);
        Ok(())
    }

    /// Validate a submission and record it if accepted.
    ///
    /// The dictionary is consulted with no session held. The word is dropped
    /// if its round closed meanwhile, otherwise re-checked and recorded.
    pub async fn submit_word(&self, player_id: &str, code: &str, raw: &str) {
        let code = normalize_game_code(code);

        let (word, deal) = {
            let Some(game) = self.games.get(&code) else {
                return;
            };
            let deal = game.session.deal();
            let word = match game.session.check_word(player_id, raw) {
                None => {
                    debug!(player_id, game_code = code, "Ignoring word outside a round");
                    return;
                }
                Some(Err(rejection)) => {
                    game.reject(player_id, rejection, &normalize(raw));
                    return;
                }
                Some(Ok(word)) => word,
            };
            (word, deal)
        };

        let known = self.dictionary.contains(&word).await;

        let Some(mut game) = self.games.get_mut(&code) else {
            return;
        };
        if game.session.deal() != deal || game.session.status() != GameStatus::Playing {
            debug!(player_id, game_code = code, word, "Round closed during dictionary lookup");
            return;
        }
        if !known {
            game.reject(player_id, Rejection::NotAWord, &word);
            return;
        }

        match game.session.accept_word(player_id, &word, deal) {
            None => {}
            Some(Err(rejection)) => game.reject(player_id, rejection, &word),
            Some(Ok(word)) => {
                debug!(player_id, game_code = code, word, "Word accepted");
                game.send_to(player_id, ServerMessage::WordValidated { word });
                game.broadcast_state();
            }
        }
    }

    /// Mark a player ready; the next round starts once both are
    pub fn player_ready(&self, player_id: &str, code: &str) {
        let code = normalize_game_code(code);
        let Some(mut game) = self.games.get_mut(&code) else {
            return;
        };
        let Some(all_ready) = game.session.mark_ready(player_id) else {
            return;
        };

        game.broadcast_state();
        if all_ready {
            game.start_round(&self.games, self.config.tick_interval);
        }
    }

    /// Record a rematch request; a fresh match starts once both agree
    pub fn play_again(&self, player_id: &str, code: &str) {
        let code = normalize_game_code(code);
        let Some(mut game) = self.games.get_mut(&code) else {
            return;
        };
        let Some(all_agreed) = game.session.request_rematch(player_id) else {
            return;
        };

        game.broadcast_state();
        if all_agreed {
            info!(game_code = code, "Rematch starting");
            game.session.reset_match();
            game.start_round(&self.games, self.config.tick_interval);
        }
    }

    /// Destroy a session, stopping its clock and freeing its code
    pub fn remove(&self, code: &str) -> Option<ActiveGame> {
        let (_, mut game) = self.games.remove(code)?;
        game.cancel_ticker();
        for player in game.session.players() {
            self.player_games.remove_if(&player.id, |_, c| c == code);
        }
        info!(game_code = code, "Removed game");
        Some(game)
    }

    /// Tear down the session of a disconnected player and tell the opponent
    pub fn remove_player(&self, player_id: &str) {
        let Some(code) = self.player_games.get(player_id).map(|c| c.clone()) else {
            return;
        };
        let Some(game) = self.remove(&code) else {
            return;
        };

        info!(player_id, game_code = code, "Player disconnected");
        game.broadcast_except(
            player_id,
            ServerMessage::PlayerLeft {
                message: OPPONENT_LEFT.to_string(),
            },
        );
    }
}
