//=========================================================================
// Player
//=========================================================================
//
// Plain mutable scorekeeping record. Fields are not cross-validated;
// keeping them consistent (e.g. non-negative score) is up to the game
// loop that mutates them.
//
// Reset granularities:
//   clear()       : name, score, rounds_won → full reset
//   reset_score() : score only              → new round, same standings
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::report::ReportSink;

//=== Player ==============================================================

/// A participant's name, score and rounds won.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: i32,
    pub rounds_won: u32,
}

impl Player {
    /// Creates a cleared player.
    pub fn new() -> Self {
        let mut player = Self::default();
        player.clear();
        player
    }

    /// Creates a cleared player with the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Resets name, score and rounds won.
    pub fn clear(&mut self) {
        self.score = 0;
        self.name.clear();
        self.rounds_won = 0;
    }

    /// Resets the score, keeping name and rounds won.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Writes a three-line snapshot to `sink`.
    ///
    /// ```text
    ///   name: Alice
    ///   score: 10
    ///   roundsWon: 2
    /// ```
    pub fn dump_values<S: ReportSink + ?Sized>(&self, sink: &mut S) {
        sink.emit_line(&format!("  name: {}", self.name));
        sink.emit_line(&format!("  score: {}", self.score));
        sink.emit_line(&format!("  roundsWon: {}", self.rounds_won));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Player {
        Player {
            name: "Alice".to_string(),
            score: 10,
            rounds_won: 2,
        }
    }

    #[test]
    fn new_player_is_cleared() {
        let player = Player::new();
        assert_eq!(player.name, "");
        assert_eq!(player.score, 0);
        assert_eq!(player.rounds_won, 0);
        assert_eq!(player, Player::default());
    }

    #[test]
    fn with_name_starts_at_zero() {
        let player = Player::with_name("Bob");
        assert_eq!(player.name, "Bob");
        assert_eq!(player.score, 0);
        assert_eq!(player.rounds_won, 0);
    }

    #[test]
    fn reset_score_keeps_identity_and_rounds() {
        let mut player = alice();
        player.reset_score();
        assert_eq!(player.name, "Alice");
        assert_eq!(player.score, 0);
        assert_eq!(player.rounds_won, 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut player = alice();
        player.clear();
        assert_eq!(player, Player::new());
    }

    #[test]
    fn reset_then_clear_scenario() {
        let mut player = Player::new();
        player.name = "Alice".to_string();
        player.score = 10;
        player.rounds_won = 2;

        player.reset_score();
        assert_eq!((player.name.as_str(), player.score, player.rounds_won), ("Alice", 0, 2));

        player.clear();
        assert_eq!((player.name.as_str(), player.score, player.rounds_won), ("", 0, 0));
    }

    #[test]
    fn fields_are_not_validated() {
        let mut player = Player::new();
        player.score = -5;
        assert_eq!(player.score, -5);
    }

    #[test]
    fn dump_values_emits_three_indented_lines() {
        let player = alice();
        let mut lines: Vec<String> = Vec::new();

        player.dump_values(&mut lines);

        assert_eq!(lines, vec!["  name: Alice", "  score: 10", "  roundsWon: 2"]);
        assert_eq!(player, alice(), "dump must not mutate");
    }

    #[test]
    fn dump_values_of_cleared_player() {
        let mut lines: Vec<String> = Vec::new();
        Player::new().dump_values(&mut lines);
        assert_eq!(lines, vec!["  name: ", "  score: 0", "  roundsWon: 0"]);
    }
}
