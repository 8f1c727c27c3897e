//! Immutable game-session values
//!
//! A session is a value, not a shared mutable object: [`GameSession::guess`]
//! returns a new session alongside the outcome, so callers can keep,
//! compare, or discard intermediate states freely and no two callers ever
//! race on game state.

use crate::adjacency::AdjacencyGraph;
use crate::catalog::RegionId;
use crate::challenge::Challenge;
use crate::pathfind::shortest_path;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of one game: the challenge, the player's selections so far, and
/// whether start and target are connected yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameSession {
    start: RegionId,
    end: RegionId,
    current: RegionId,
    /// Selection order; start and target are members from the beginning
    visited: Vec<RegionId>,
    finished: bool,
}

/// What a guess did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuessOutcome {
    /// The game is already complete; the guess was ignored.
    AlreadyFinished,
    /// The id is not part of the adjacency graph.
    UnknownRegion,
    /// The region is already in the player's selection.
    AlreadySelected,
    /// The region was added, but start and target are not connected yet.
    Added,
    /// This guess connected start and target.
    Completed(GameReport),
}

/// Grading of a finished game against the optimal route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameReport {
    /// The player's connecting path, start to target through their selection
    pub player_path: Vec<RegionId>,
    /// Intermediate regions on the player's path
    pub player_steps: usize,
    /// Intermediate regions on the unrestricted shortest path
    pub optimal_steps: usize,
    /// How many more steps the player took than necessary
    pub extra_steps: usize,
}

impl GameSession {
    /// Start a session for a challenge: the player stands on the start
    /// region, and both endpoints count as selected.
    pub fn new(challenge: Challenge) -> Self {
        Self {
            start: challenge.start,
            end: challenge.end,
            current: challenge.start,
            visited: vec![challenge.start, challenge.end],
            finished: false,
        }
    }

    #[inline]
    pub fn start(&self) -> RegionId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> RegionId {
        self.end
    }

    /// The most recently selected region (the start before any guess).
    #[inline]
    pub fn current(&self) -> RegionId {
        self.current
    }

    /// Selected regions in selection order, endpoints included.
    #[inline]
    pub fn visited(&self) -> &[RegionId] {
        &self.visited
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply a guess, returning the successor session and what happened.
    ///
    /// Rejected guesses (finished game, unknown id, duplicate) return an
    /// unchanged session. An accepted guess joins the selection; the game
    /// completes as soon as a path restricted to the selection connects
    /// start and target, graded against the unrestricted optimum.
    pub fn guess(&self, graph: &AdjacencyGraph, id: RegionId) -> (Self, GuessOutcome) {
        if self.finished {
            return (self.clone(), GuessOutcome::AlreadyFinished);
        }
        if id >= graph.region_count() {
            return (self.clone(), GuessOutcome::UnknownRegion);
        }
        if self.visited.contains(&id) {
            return (self.clone(), GuessOutcome::AlreadySelected);
        }

        let mut next = self.clone();
        next.current = id;
        next.visited.push(id);

        let allowed: HashSet<RegionId> = next.visited.iter().copied().collect();
        let player_path = shortest_path(graph, next.start, next.end, Some(&allowed));
        if player_path.is_empty() {
            return (next, GuessOutcome::Added);
        }

        next.finished = true;
        let optimal = shortest_path(graph, next.start, next.end, None);
        let player_steps = intermediate_steps(&player_path);
        let optimal_steps = intermediate_steps(&optimal);
        let report = GameReport {
            player_steps,
            optimal_steps,
            extra_steps: player_steps.saturating_sub(optimal_steps),
            player_path,
        };
        (next, GuessOutcome::Completed(report))
    }

    /// The unrestricted shortest route for this challenge (the reveal
    /// action), empty when the endpoints are disconnected.
    pub fn solution(&self, graph: &AdjacencyGraph) -> Vec<RegionId> {
        shortest_path(graph, self.start, self.end, None)
    }
}

/// Intermediate regions on a path: endpoints excluded.
#[inline]
fn intermediate_steps(path: &[RegionId]) -> usize {
    path.len().saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RegionCatalog, RegionEntry, Ring};

    fn unit_square(x: f64, y: f64) -> Ring {
        vec![
            vec![x, y],
            vec![x + 1.0, y],
            vec![x + 1.0, y + 1.0],
            vec![x, y + 1.0],
            vec![x, y],
        ]
    }

    fn entry(name: &str, polygons: Vec<Ring>) -> RegionEntry {
        RegionEntry {
            name: name.to_string(),
            name_en: name.to_string(),
            polygons,
        }
    }

    /// Row of four squares: 0-1-2-3.
    fn row_graph() -> AdjacencyGraph {
        let entries = (0..4)
            .map(|index| entry(&format!("r{index}"), vec![unit_square(index as f64, 0.0)]))
            .collect();
        AdjacencyGraph::build(&RegionCatalog::from_entries(entries))
    }

    /// Row of five squares 0..4 plus a wide region 5 touching the bottom
    /// edge of every square: the optimal 0→4 route is the single hop
    /// through 5, while the row itself is the long way round.
    fn row_with_shortcut() -> AdjacencyGraph {
        let mut entries: Vec<RegionEntry> = (0..5)
            .map(|index| entry(&format!("r{index}"), vec![unit_square(index as f64, 0.0)]))
            .collect();
        entries.push(entry(
            "wide",
            vec![vec![
                vec![0.0, -1.0],
                vec![5.0, -1.0],
                vec![5.0, 0.0],
                vec![4.0, 0.0],
                vec![3.0, 0.0],
                vec![2.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 0.0],
            ]],
        ));
        AdjacencyGraph::build(&RegionCatalog::from_entries(entries))
    }

    fn challenge(start: RegionId, end: RegionId) -> Challenge {
        Challenge { start, end }
    }

    #[test]
    fn test_new_session_state() {
        let session = GameSession::new(challenge(0, 3));
        assert_eq!(session.start(), 0);
        assert_eq!(session.end(), 3);
        assert_eq!(session.current(), 0);
        assert_eq!(session.visited(), &[0, 3]);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_rejected_guesses_leave_the_session_unchanged() {
        let graph = row_graph();
        let session = GameSession::new(challenge(0, 3));

        let (next, outcome) = session.guess(&graph, 99);
        assert_eq!(outcome, GuessOutcome::UnknownRegion);
        assert_eq!(next, session);

        let (next, outcome) = session.guess(&graph, 3);
        assert_eq!(outcome, GuessOutcome::AlreadySelected);
        assert_eq!(next, session);
    }

    #[test]
    fn test_walkthrough_to_optimal_finish() {
        let graph = row_graph();
        let session = GameSession::new(challenge(0, 3));

        // 2 alone does not bridge 0 and 3: 1 is still missing
        let (session2, outcome) = session.guess(&graph, 2);
        assert_eq!(outcome, GuessOutcome::Added);
        assert_eq!(session2.current(), 2);
        assert_eq!(session2.visited(), &[0, 3, 2]);
        assert!(!session2.is_finished());
        // The earlier value is untouched
        assert_eq!(session.visited(), &[0, 3]);

        // 1 closes the chain 0-1-2-3
        let (session3, outcome) = session2.guess(&graph, 1);
        let GuessOutcome::Completed(report) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert!(session3.is_finished());
        assert_eq!(report.player_path, vec![0, 1, 2, 3]);
        assert_eq!(report.player_steps, 2);
        assert_eq!(report.optimal_steps, 2);
        assert_eq!(report.extra_steps, 0);
    }

    #[test]
    fn test_detour_is_graded_with_extra_steps() {
        let graph = row_with_shortcut();
        let session = GameSession::new(challenge(0, 4));

        let (session, outcome) = session.guess(&graph, 1);
        assert_eq!(outcome, GuessOutcome::Added);
        let (session, outcome) = session.guess(&graph, 2);
        assert_eq!(outcome, GuessOutcome::Added);
        let (session, outcome) = session.guess(&graph, 3);

        let GuessOutcome::Completed(report) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(report.player_path, vec![0, 1, 2, 3, 4]);
        assert_eq!(report.player_steps, 3);
        // Optimal goes through the wide region below the row
        assert_eq!(report.optimal_steps, 1);
        assert_eq!(report.extra_steps, 2);
        assert!(session.is_finished());
    }

    #[test]
    fn test_guesses_after_completion_are_ignored() {
        let graph = row_graph();
        let session = GameSession::new(challenge(0, 1));

        // Start and target are already adjacent: any accepted guess finishes
        let (session, outcome) = session.guess(&graph, 2);
        assert!(matches!(outcome, GuessOutcome::Completed(_)));

        let (next, outcome) = session.guess(&graph, 3);
        assert_eq!(outcome, GuessOutcome::AlreadyFinished);
        assert_eq!(next, session);
    }

    #[test]
    fn test_degenerate_challenge_completes_on_first_guess() {
        let graph = row_graph();
        let session = GameSession::new(challenge(2, 2));

        let (session, outcome) = session.guess(&graph, 0);
        let GuessOutcome::Completed(report) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert!(session.is_finished());
        assert_eq!(report.player_path, vec![2]);
        assert_eq!(report.player_steps, 0);
        assert_eq!(report.extra_steps, 0);
    }

    #[test]
    fn test_solution_is_the_unrestricted_shortest_path() {
        let graph = row_with_shortcut();
        let session = GameSession::new(challenge(0, 4));
        assert_eq!(session.solution(&graph), vec![0, 5, 4]);

        let lonely = AdjacencyGraph::build(&RegionCatalog::from_entries(vec![
            entry("a", vec![unit_square(0.0, 0.0)]),
            entry("b", vec![unit_square(9.0, 9.0)]),
        ]));
        let session = GameSession::new(challenge(0, 1));
        assert!(session.solution(&lonely).is_empty());
    }
}
