use crate::game::core::letters::generate_letters;
use crate::game::core::messages::ServerMessage;
use crate::game::core::session::{GameSession, Tick};
use crate::game::core::validation::Rejection;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub type Games = Arc<DashMap<String, ActiveGame>>;

/// Handle to the task counting down the current round.
/// The task is aborted when the handle is cancelled or dropped.
pub struct RoundTicker {
    epoch: u64,
    handle: AbortHandle,
}

impl RoundTicker {
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for RoundTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An active game: combines pure game logic with transport channels and the round clock
pub struct ActiveGame {
    pub session: GameSession,
    channels: Vec<(String, broadcast::Sender<ServerMessage>)>,
    ticker: Option<RoundTicker>,
    ticker_epoch: u64,
}

impl ActiveGame {
    pub fn new(
        session: GameSession,
        host_id: impl Into<String>,
        host_tx: broadcast::Sender<ServerMessage>,
    ) -> Self {
        Self {
            session,
            channels: vec![(host_id.into(), host_tx)],
            ticker: None,
            ticker_epoch: 0,
        }
    }

    pub fn add_channel(&mut self, player_id: impl Into<String>, tx: broadcast::Sender<ServerMessage>) {
        self.channels.push((player_id.into(), tx));
    }

    pub fn broadcast(&self, msg: ServerMessage) {
        for (_, tx) in &self.channels {
            let _ = tx.send(msg.clone());
        }
    }

    pub fn broadcast_except(&self, player_id: &str, msg: ServerMessage) {
        for (id, tx) in &self.channels {
            if id != player_id {
                let _ = tx.send(msg.clone());
            }
        }
    }

    pub fn send_to(&self, player_id: &str, msg: ServerMessage) {
        if let Some((_, tx)) = self.channels.iter().find(|(id, _)| id == player_id) {
            let _ = tx.send(msg);
        }
    }

    /// Broadcast a freshly built snapshot of the whole session
    pub fn broadcast_state(&self) {
        self.broadcast(ServerMessage::GameUpdate {
            state: self.session.snapshot(),
        });
    }

    pub fn reject(&self, player_id: &str, rejection: Rejection, word: &str) {
        debug!(player_id, word, ?rejection, "Word rejected");
        self.send_to(
            player_id,
            ServerMessage::InvalidWord {
                reason: rejection,
                message: rejection.message_for(word),
            },
        );
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn owns_ticker(&self, epoch: u64) -> bool {
        self.ticker.as_ref().is_some_and(|t| t.epoch == epoch)
    }

    pub fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    /// Deal a new letter pool, announce the round and start its clock.
    /// Any previous clock is cancelled first.
    pub fn start_round(&mut self, games: &Games, tick_interval: Duration) {
        self.cancel_ticker();
        self.session.start_round(generate_letters(&mut rand::rng()));

        info!(
            game_code = self.session.code(),
            round = self.session.round(),
            "Round starting"
        );
        self.broadcast_state();

        self.ticker_epoch += 1;
        self.ticker = Some(spawn_round_ticker(
            games.clone(),
            self.session.code().to_string(),
            self.ticker_epoch,
            tick_interval,
        ));
    }

    /// Stop the clock, score the round and announce the result
    pub fn end_round(&mut self) {
        self.cancel_ticker();
        let Some(summary) = self.session.end_round() else {
            return;
        };

        info!(
            game_code = self.session.code(),
            round = summary.round,
            winner = summary.winner.label(),
            game_winner = ?summary.game_winner,
            "Round ended"
        );
        self.broadcast_state();
    }
}

fn spawn_round_ticker(games: Games, code: String, epoch: u64, period: Duration) -> RoundTicker {
    let handle = tokio::spawn(run_round_ticker(games, code, epoch, period)).abort_handle();
    RoundTicker { epoch, handle }
}

async fn run_round_ticker(games: Games, code: String, epoch: u64, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;

        let Some(mut game) = games.get_mut(&code) else {
            return;
        };
        // A tick that lost the race with cancellation must not touch the session
        if !game.owns_ticker(epoch) {
            return;
        }

        match game.session.tick() {
            Some(Tick::Remaining(seconds_remaining)) => {
                game.broadcast(ServerMessage::TimerTick { seconds_remaining });
            }
            Some(Tick::Expired) => {
                game.end_round();
                return;
            }
            None => return,
        }
    }
}
