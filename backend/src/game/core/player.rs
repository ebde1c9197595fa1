/// A participant seated in a session
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Connection id, stable for the lifetime of the connection
    pub id: String,
    pub name: String,
    pub total_score: u32,
    pub round_score: u32,
    pub rounds_won: u32,
    pub submitted_words: Vec<String>,
    pub ready: bool,
    pub wants_to_play_again: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_score: 0,
            round_score: 0,
            rounds_won: 0,
            submitted_words: Vec::new(),
            ready: false,
            wants_to_play_again: false,
        }
    }

    /// Clear per-round state ahead of a new round
    pub fn reset_round(&mut self) {
        self.submitted_words.clear();
        self.round_score = 0;
        self.ready = false;
        self.wants_to_play_again = false;
    }

    /// Clear match totals for a rematch
    pub fn reset_match(&mut self) {
        self.total_score = 0;
        self.round_score = 0;
        self.rounds_won = 0;
    }
}
