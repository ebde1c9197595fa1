use super::messages::{GameSnapshot, PlayerSnapshot};
use super::player::Player;
use super::scoring::resolve_round;
use super::validation::{Rejection, check_word};
use serde::{Deserialize, Serialize};

pub const ROUND_DURATION_SECS: u32 = 120;
pub const ROUNDS_TO_WIN: u32 = 2;
pub const MAX_PLAYERS: usize = 2;

/// Reported as the round winner when the top round score is shared
pub const TIE: &str = "Tie";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Waiting,
    Playing,
    RoundEnd,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundWinner {
    Player(String),
    Tie,
}

impl RoundWinner {
    pub fn label(&self) -> &str {
        match self {
            RoundWinner::Player(name) => name,
            RoundWinner::Tie => TIE,
        }
    }
}

/// Reasons a create or join request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Game not found.")]
    NotFound,
    #[error("Game is full.")]
    Full,
    #[error("You are already in a game.")]
    AlreadyInGame,
}

/// Result of advancing the round clock by one step
#[derive(Debug, PartialEq)]
pub enum Tick {
    Remaining(u32),
    Expired,
}

/// What happened when a round was closed
#[derive(Debug, PartialEq)]
pub struct RoundSummary {
    pub round: u32,
    pub winner: RoundWinner,
    pub game_winner: Option<String>,
}

/// One match between two players (pure logic, no I/O or timers)
pub struct GameSession {
    code: String,
    players: Vec<Player>,
    status: GameStatus,
    round: u32,
    deal: u64,
    letters: Vec<char>,
    timer: u32,
    round_duration: u32,
    round_winner: Option<RoundWinner>,
    game_winner: Option<String>,
}

impl GameSession {
    pub fn new(code: impl Into<String>, host: Player, round_duration: u32) -> Self {
        Self {
            code: code.into(),
            players: vec![host],
            status: GameStatus::Waiting,
            round: 0,
            deal: 0,
            letters: Vec::new(),
            timer: 0,
            round_duration,
            round_winner: None,
            game_winner: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Number of rounds dealt over the session's life. Unlike `round` it is
    /// never reset, so it tells apart round 1 of a rematch from the first one.
    pub fn deal(&self) -> u64 {
        self.deal
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn round_winner(&self) -> Option<&RoundWinner> {
        self.round_winner.as_ref()
    }

    pub fn game_winner(&self) -> Option<&str> {
        self.game_winner.as_deref()
    }

    /// Seat a second player. Only a waiting session with a free slot accepts one.
    pub fn add_player(&mut self, player: Player) -> Result<(), SessionError> {
        if self.is_full() || self.status != GameStatus::Waiting {
            return Err(SessionError::Full);
        }
        self.players.push(player);
        Ok(())
    }

    /// Begin the next round with the given letter pool
    pub fn start_round(&mut self, letters: Vec<char>) {
        self.status = GameStatus::Playing;
        self.letters = letters;
        self.round += 1;
        self.deal += 1;
        self.timer = self.round_duration;
        self.round_winner = None;
        for player in &mut self.players {
            player.reset_round();
        }
    }

    /// Advance the round clock. `None` unless a round is in progress.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.status != GameStatus::Playing {
            return None;
        }
        if self.timer == 0 {
            return Some(Tick::Expired);
        }
        self.timer -= 1;
        Some(Tick::Remaining(self.timer))
    }

    /// Close the current round: score it, pick the round winner and decide
    /// whether the match is over. `None` unless a round is in progress.
    pub fn end_round(&mut self) -> Option<RoundSummary> {
        if self.status != GameStatus::Playing {
            return None;
        }
        self.status = GameStatus::RoundEnd;

        let submissions: Vec<&[String]> = self
            .players
            .iter()
            .map(|p| p.submitted_words.as_slice())
            .collect();
        let scores = resolve_round(&submissions);
        for (player, score) in self.players.iter_mut().zip(scores) {
            player.round_score = score;
            player.total_score += score;
        }

        let winner = match self.round_leader() {
            Some(index) => {
                let leader = &mut self.players[index];
                leader.rounds_won += 1;
                RoundWinner::Player(leader.name.clone())
            }
            None => RoundWinner::Tie,
        };
        self.round_winner = Some(winner.clone());

        if self.players.iter().any(|p| p.rounds_won >= ROUNDS_TO_WIN) {
            self.status = GameStatus::GameOver;
            self.game_winner = self
                .players
                .iter()
                .max_by_key(|p| p.rounds_won)
                .map(|p| p.name.clone());
        }

        Some(RoundSummary {
            round: self.round,
            winner,
            game_winner: self.game_winner.clone(),
        })
    }

    /// Index of the player with the strictly highest round score, if any
    fn round_leader(&self) -> Option<usize> {
        let best = self.players.iter().map(|p| p.round_score).max()?;
        let mut leaders = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.round_score == best);
        let (index, _) = leaders.next()?;
        leaders.next().is_none().then_some(index)
    }

    /// Mark a player ready for the next round. Returns whether everyone is now
    /// ready, or `None` if the session is not between rounds.
    pub fn mark_ready(&mut self, player_id: &str) -> Option<bool> {
        if self.status != GameStatus::RoundEnd {
            return None;
        }
        self.player_mut(player_id)?.ready = true;
        Some(self.is_full() && self.players.iter().all(|p| p.ready))
    }

    /// Record a player's wish for a rematch. Returns whether everyone agreed,
    /// or `None` if the match is not over.
    pub fn request_rematch(&mut self, player_id: &str) -> Option<bool> {
        if self.status != GameStatus::GameOver {
            return None;
        }
        self.player_mut(player_id)?.wants_to_play_again = true;
        Some(self.is_full() && self.players.iter().all(|p| p.wants_to_play_again))
    }

    /// Wipe match totals so the next round starts a fresh match
    pub fn reset_match(&mut self) {
        for player in &mut self.players {
            player.reset_match();
        }
        self.round = 0;
        self.round_winner = None;
        self.game_winner = None;
    }

    /// Check a submission against every rule except the dictionary. `None` if
    /// no round is in progress or the player is not seated here.
    pub fn check_word(&self, player_id: &str, raw: &str) -> Option<Result<String, Rejection>> {
        if self.status != GameStatus::Playing {
            return None;
        }
        let player = self.player(player_id)?;
        Some(check_word(raw, &self.letters, &player.submitted_words))
    }

    /// Record a dictionary-approved word checked during `deal`. `None` if that
    /// round is over; the other rules are re-checked against the live round.
    pub fn accept_word(
        &mut self,
        player_id: &str,
        word: &str,
        deal: u64,
    ) -> Option<Result<String, Rejection>> {
        if self.deal != deal {
            return None;
        }
        let word = match self.check_word(player_id, word)? {
            Ok(word) => word,
            Err(rejection) => return Some(Err(rejection)),
        };
        self.player_mut(player_id)?.submitted_words.push(word.clone());
        Some(Ok(word))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_code: self.code.clone(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    total_score: p.total_score,
                    round_score: p.round_score,
                    rounds_won: p.rounds_won,
                    submitted_words: p.submitted_words.clone(),
                    ready: p.ready,
                    wants_to_play_again: p.wants_to_play_again,
                })
                .collect(),
            status: self.status,
            round: self.round,
            letters: self.letters.clone(),
            timer: self.timer,
            round_winner: self.round_winner.as_ref().map(|w| w.label().to_string()),
            game_winner: self.game_winner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn waiting_session() -> GameSession {
        GameSession::new("WXYZ", Player::new("a", "A"), ROUND_DURATION_SECS)
    }

    fn playing_session(pool: &str) -> GameSession {
        let mut session = waiting_session();
        session.add_player(Player::new("b", "B")).unwrap();
        session.start_round(letters(pool));
        session
    }

    fn submit(session: &mut GameSession, player_id: &str, word: &str) {
        let deal = session.deal();
        session.accept_word(player_id, word, deal).unwrap().unwrap();
    }

    #[test]
    fn new_session_waits_with_host() {
        let session = waiting_session();
        assert_eq!(session.status(), GameStatus::Waiting);
        assert_eq!(session.round(), 0);
        assert_eq!(session.players().len(), 1);
        assert!(session.has_player("a"));
    }

    #[test]
    fn third_player_is_refused() {
        let mut session = waiting_session();
        session.add_player(Player::new("b", "B")).unwrap();

        assert_eq!(session.add_player(Player::new("c", "C")), Err(SessionError::Full));
        assert_eq!(session.players().len(), 2);
    }

    #[test]
    fn start_round_resets_round_state() {
        let mut session = playing_session("CATDOGXQZEIOUAEIOUBN");
        submit(&mut session, "a", "cat");

        session.start_round(letters("ABCDEFGHIJKLMNOPQRST"));

        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.round(), 2);
        assert_eq!(session.timer(), ROUND_DURATION_SECS);
        assert!(session.players().iter().all(|p| p.submitted_words.is_empty()));
        assert_eq!(session.letters().len(), 20);
    }

    #[test]
    fn tick_counts_down_then_expires() {
        let mut session = GameSession::new("WXYZ", Player::new("a", "A"), 2);
        session.add_player(Player::new("b", "B")).unwrap();
        session.start_round(letters("CAT"));

        assert_eq!(session.tick(), Some(Tick::Remaining(1)));
        assert_eq!(session.tick(), Some(Tick::Remaining(0)));
        assert_eq!(session.tick(), Some(Tick::Expired));
        assert_eq!(session.timer(), 0);
    }

    #[test]
    fn tick_is_ignored_outside_a_round() {
        let mut session = waiting_session();
        assert_eq!(session.tick(), None);

        let mut session = playing_session("CAT");
        session.end_round();
        let timer = session.timer();
        assert_eq!(session.tick(), None);
        assert_eq!(session.timer(), timer);
    }

    #[test]
    fn words_only_accepted_while_playing() {
        let mut session = waiting_session();
        assert_eq!(session.check_word("a", "cat"), None);
        assert_eq!(session.accept_word("a", "cat", 0), None);
    }

    #[test]
    fn word_from_a_finished_round_is_dropped() {
        let mut session = playing_session("CATCATCATCATCATCATCA");
        let deal = session.deal();
        assert_eq!(session.check_word("a", "cat"), Some(Ok("cat".to_string())));

        session.end_round();
        session.start_round(letters("CATCATCATCATCATCATCA"));

        assert_eq!(session.accept_word("a", "cat", deal), None);
        assert!(session.player("a").unwrap().submitted_words.is_empty());
        // The new round still takes it
        assert_eq!(
            session.accept_word("a", "cat", session.deal()),
            Some(Ok("cat".to_string()))
        );
    }

    #[test]
    fn deal_survives_rematch() {
        let mut session = playing_session("CAT");
        let first = session.deal();
        session.end_round();
        session.reset_match();
        session.start_round(letters("CAT"));

        assert_eq!(session.round(), 1);
        assert_ne!(session.deal(), first);
    }

    #[test]
    fn unknown_player_cannot_submit() {
        let session = playing_session("CAT");
        assert_eq!(session.check_word("zzz", "cat"), None);
    }

    #[test]
    fn duplicate_submission_is_rejected() {
        let mut session = playing_session("CATS");
        submit(&mut session, "a", "cat");

        let deal = session.deal();
        assert_eq!(session.accept_word("a", "CAT", deal), Some(Err(Rejection::Duplicate)));
        assert_eq!(session.player("a").unwrap().submitted_words, vec!["cat"]);
        // The opponent may still claim it
        assert_eq!(session.accept_word("b", "cat", deal), Some(Ok("cat".to_string())));
    }

    #[test]
    fn shared_word_scores_zero_for_both() {
        let mut session = playing_session("CATDOGXQZEIOUAEIOUBN");
        submit(&mut session, "a", "cat");
        submit(&mut session, "a", "dog");
        submit(&mut session, "b", "cat");

        let summary = session.end_round().unwrap();

        assert_eq!(session.player("a").unwrap().round_score, 10);
        assert_eq!(session.player("b").unwrap().round_score, 0);
        assert_eq!(summary.winner, RoundWinner::Player("A".to_string()));
    }

    #[test]
    fn lone_word_wins_the_round() {
        let mut session = playing_session("CATDOGXQZEIOUAEIOUBN");
        assert_eq!(session.timer(), 120);
        submit(&mut session, "a", "cat");
        assert_eq!(session.player("a").unwrap().submitted_words, vec!["cat"]);

        session.end_round().unwrap();

        let a = session.player("a").unwrap();
        let b = session.player("b").unwrap();
        assert_eq!((a.round_score, a.total_score, a.rounds_won), (10, 10, 1));
        assert_eq!((b.round_score, b.rounds_won), (0, 0));
        assert_eq!(session.status(), GameStatus::RoundEnd);
        assert_eq!(session.snapshot().round_winner.as_deref(), Some("A"));
    }

    #[test]
    fn equal_scores_tie() {
        let mut session = playing_session("CATDOGXQZEIOUAEIOUBN");
        submit(&mut session, "a", "cat");
        submit(&mut session, "b", "dog");

        let summary = session.end_round().unwrap();

        assert_eq!(summary.winner, RoundWinner::Tie);
        assert_eq!(session.snapshot().round_winner.as_deref(), Some(TIE));
        assert!(session.players().iter().all(|p| p.rounds_won == 0));
        assert_eq!(session.status(), GameStatus::RoundEnd);
    }

    #[test]
    fn end_round_twice_does_not_rescore() {
        let mut session = playing_session("CAT");
        submit(&mut session, "a", "cat");

        assert!(session.end_round().is_some());
        assert!(session.end_round().is_none());
        assert_eq!(session.player("a").unwrap().total_score, 10);
        assert_eq!(session.player("a").unwrap().rounds_won, 1);
    }

    #[test]
    fn second_round_win_ends_the_match() {
        let mut session = playing_session("CAT");
        submit(&mut session, "a", "cat");
        session.end_round();

        // Tie round in between
        assert_eq!(session.mark_ready("a"), Some(false));
        assert_eq!(session.mark_ready("b"), Some(true));
        session.start_round(letters("CATDOG"));
        submit(&mut session, "a", "cat");
        submit(&mut session, "b", "dog");
        session.end_round();
        assert_eq!(session.status(), GameStatus::RoundEnd);

        session.start_round(letters("CATS"));
        submit(&mut session, "a", "cats");
        let summary = session.end_round().unwrap();

        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(summary.game_winner.as_deref(), Some("A"));
        assert_eq!(session.game_winner(), Some("A"));
        assert_eq!(session.player("a").unwrap().rounds_won, 2);
        assert_eq!(session.player("a").unwrap().total_score, 35);
        assert_eq!(session.player("b").unwrap().total_score, 10);
    }

    #[test]
    fn ready_only_counts_between_rounds() {
        let mut session = playing_session("CAT");
        assert_eq!(session.mark_ready("a"), None);
        assert!(!session.player("a").unwrap().ready);

        session.end_round();
        assert_eq!(session.mark_ready("zzz"), None);
        assert_eq!(session.mark_ready("a"), Some(false));
        assert_eq!(session.mark_ready("a"), Some(false));
        assert_eq!(session.mark_ready("b"), Some(true));
    }

    #[test]
    fn rematch_needs_both_players_and_resets_totals() {
        let mut session = playing_session("CAT");
        submit(&mut session, "b", "cat");
        session.end_round();
        session.start_round(letters("CAT"));
        submit(&mut session, "b", "cat");
        session.end_round();
        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.game_winner(), Some("B"));

        assert_eq!(session.mark_ready("a"), None);
        assert_eq!(session.request_rematch("a"), Some(false));
        assert_eq!(session.request_rematch("b"), Some(true));

        session.reset_match();
        session.start_round(letters("DOG"));

        assert_eq!(session.round(), 1);
        assert_eq!(session.game_winner(), None);
        for player in session.players() {
            assert_eq!((player.total_score, player.round_score, player.rounds_won), (0, 0, 0));
            assert!(!player.wants_to_play_again);
        }
    }

    #[test]
    fn rematch_ignored_before_game_over() {
        let mut session = playing_session("CAT");
        session.end_round();
        assert_eq!(session.request_rematch("a"), None);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = playing_session("CATDOGXQZEIOUAEIOUBN");
        submit(&mut session, "a", "cat");

        let snapshot = session.snapshot();

        assert_eq!(snapshot.game_code, "WXYZ");
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.timer, 120);
        assert_eq!(snapshot.letters.len(), 20);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.player("a").unwrap().submitted_words, vec!["cat"]);
        assert_eq!(snapshot.round_winner, None);
    }
}
