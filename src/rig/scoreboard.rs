//=========================================================================
// Scoreboard
//=========================================================================
//
// Player/goal composition: which goal scores for which player, and how
// detections become points.
//
// Architecture:
//   GoalEvent → bindings: HashMap<GoalId, PlayerId> → Player::score += points
//
// Round structure and win conditions stay with the game loop; this only
// offers the bookkeeping primitives it needs (award a round, reset scores,
// full clear, find the leader).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{GoalEvent, GoalId};
use crate::core::player::Player;
use crate::core::report::ReportSink;

//=== PlayerId ============================================================

/// Index of a player inside a scoreboard, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player #{}", self.0)
    }
}

//=== Scoreboard ==========================================================

/// Players plus the goal → player bindings that credit them.
///
/// # Examples
///
/// ```
/// use beam_goal::core::Player;
/// use beam_goal::{GoalEvent, GoalId, Scoreboard};
///
/// let mut board = Scoreboard::new(1);
/// let alice = board.add_player(Player::with_name("Alice"));
/// board.bind(GoalId(0), alice);
///
/// let event = GoalEvent { goal: GoalId(0), label: None, tick: 1 };
/// assert_eq!(board.record(&event), Some(alice));
/// assert_eq!(board.player(alice).unwrap().score, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Scoreboard {
    players: Vec<Player>,
    bindings: HashMap<GoalId, PlayerId>,
    points_per_goal: i32,
}

impl Scoreboard {
    /// Creates an empty scoreboard crediting `points_per_goal` per event.
    pub fn new(points_per_goal: i32) -> Self {
        Self {
            players: Vec::new(),
            bindings: HashMap::new(),
            points_per_goal,
        }
    }

    pub fn points_per_goal(&self) -> i32 {
        self.points_per_goal
    }

    //--- Players ----------------------------------------------------------

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        self.players.push(player);
        PlayerId(self.players.len() - 1)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    //--- Bindings ---------------------------------------------------------

    /// Makes `goal` score for `player`, replacing any previous owner.
    ///
    /// Returns `false` (and binds nothing) if `player` is unknown.
    pub fn bind(&mut self, goal: GoalId, player: PlayerId) -> bool {
        if player.0 >= self.players.len() {
            return false;
        }
        self.bindings.insert(goal, player);
        true
    }

    /// Removes the binding for `goal`, returning its previous owner.
    pub fn unbind(&mut self, goal: GoalId) -> Option<PlayerId> {
        self.bindings.remove(&goal)
    }

    pub fn owner(&self, goal: GoalId) -> Option<PlayerId> {
        self.bindings.get(&goal).copied()
    }

    //--- Scoring ----------------------------------------------------------

    /// Credits the owner of the event's goal.
    ///
    /// Returns the credited player, or `None` for an unbound goal.
    pub fn record(&mut self, event: &GoalEvent) -> Option<PlayerId> {
        let Some(id) = self.owner(event.goal) else {
            debug!(target: "scoreboard", "No player bound to {}, ignoring", event.goal);
            return None;
        };

        let points = self.points_per_goal;
        let player = self.players.get_mut(id.0)?;
        player.score = player.score.saturating_add(points);
        debug!(
            target: "scoreboard",
            "{} scored for '{}' at tick {} (score: {})",
            event.goal, player.name, event.tick, player.score
        );
        Some(id)
    }

    /// Records every event; returns how many were credited.
    pub fn record_all<'a, E>(&mut self, events: E) -> usize
    where
        E: IntoIterator<Item = &'a GoalEvent>,
    {
        events
            .into_iter()
            .filter(|event| self.record(event).is_some())
            .count()
    }

    /// Increments a player's rounds won. Returns `false` if unknown.
    pub fn award_round(&mut self, id: PlayerId) -> bool {
        match self.players.get_mut(id.0) {
            Some(player) => {
                player.rounds_won = player.rounds_won.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Player with the highest score; ties go to the earliest added.
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, i32)> = None;
        for (index, player) in self.players.iter().enumerate() {
            match best {
                Some((_, score)) if player.score <= score => {}
                _ => best = Some((PlayerId(index), player.score)),
            }
        }
        best.map(|(id, _)| id)
    }

    //--- Resets -----------------------------------------------------------

    /// Zeroes every score; names and rounds won are kept.
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.reset_score();
        }
    }

    /// Clears every player; bindings are kept.
    pub fn clear(&mut self) {
        for player in &mut self.players {
            player.clear();
        }
    }

    //--- Reporting --------------------------------------------------------

    /// Dumps every player in id order.
    pub fn dump<S: ReportSink + ?Sized>(&self, sink: &mut S) {
        for player in &self.players {
            player.dump_values(sink);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
