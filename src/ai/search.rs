use tracing::debug;

use crate::game::{GameState, Player, INF, NEG_INF};

/// Score of a searched position together with the move that reaches it.
/// `best_move` is `None` for leaves and for nodes without legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        SearchResult {
            score,
            best_move: None,
        }
    }

    /// What the score says about the rest of the game.
    pub fn outlook(&self) -> Outlook {
        match self.score {
            INF => Outlook::ForcedWin(Player::PlayerOne),
            NEG_INF => Outlook::ForcedWin(Player::PlayerTwo),
            0 => Outlook::Level,
            _ => Outlook::Unclear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
    /// The player can force a connection within the search horizon.
    ForcedWin(Player),
    /// Neither side is ahead; at full depth this is a forced draw.
    Level,
    Unclear,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// PlayerOne maximizes and PlayerTwo minimizes. Moves are tried in ascending
/// column order and only a strictly better score replaces the current best,
/// so among equally scored moves the lowest column wins. The returned score is
/// the same as plain minimax to the same depth would give.
///
/// `state` is only read; every explored line runs on its own clone.
pub fn search(state: &GameState, depth_limit: usize) -> SearchResult {
    let mut searcher = Searcher::default();
    let result = searcher.minimax(state, depth_limit, NEG_INF, INF);
    debug!(
        depth_limit,
        score = result.score,
        best_move = ?result.best_move,
        nodes = searcher.nodes,
        "search finished"
    );
    result
}

#[derive(Default)]
struct Searcher {
    nodes: u64,
}

impl Searcher {
    fn minimax(&mut self, state: &GameState, depth: usize, mut alpha: i32, mut beta: i32) -> SearchResult {
        self.nodes += 1;

        // depth cutoff takes precedence over a finished game
        if depth == 0 {
            return SearchResult::leaf(state.heuristic_value());
        }
        if state.is_terminal() {
            return SearchResult::leaf(state.static_utility());
        }

        let maximizing = state.active_player().is_maximizer();
        let mut best = SearchResult::leaf(if maximizing { NEG_INF } else { INF });

        for col in state.legal_moves() {
            let mut next = state.clone();
            next.apply_move(col);
            let score = self.minimax(&next, depth - 1, alpha, beta).score;

            let improves = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            // the first move is always taken so a lost position still yields a move
            if improves || best.best_move.is_none() {
                best = SearchResult {
                    score,
                    best_move: Some(col),
                };
            }

            if maximizing {
                alpha = alpha.max(best.score);
            } else {
                beta = beta.min(best.score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::game::{Geometry, Piece};

    /// Plain minimax without pruning.
    fn brute_force(state: &GameState, depth: usize) -> i32 {
        if depth == 0 {
            return state.heuristic_value();
        }
        if state.is_terminal() {
            return state.static_utility();
        }
        let scores = state.legal_moves().into_iter().map(|col| {
            let mut next = state.clone();
            next.apply_move(col);
            brute_force(&next, depth - 1)
        });
        if state.active_player().is_maximizer() {
            scores.max().unwrap_or(NEG_INF)
        } else {
            scores.min().unwrap_or(INF)
        }
    }

    fn random_position(moves: Vec<u8>) -> GameState {
        let mut state = GameState::new(Geometry::new(4, 4, 3)).unwrap();
        for col in moves.into_iter().take(12) {
            state.apply_move(col as usize % 4);
        }
        state
    }

    fn played(moves: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &col in moves {
            assert!(state.apply_move(col));
        }
        state
    }

    fn empty_cells(state: &GameState) -> usize {
        let geometry = state.geometry();
        (0..geometry.rows)
            .flat_map(|row| (0..geometry.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| state.cell_at(row, col) == Ok(Piece::Empty))
            .count()
    }

    quickcheck! {
        fn pruning_preserves_minimax_score(moves: Vec<u8>, depth: u8) -> bool {
            let state = random_position(moves);
            let depth = depth as usize % 4 + 1;
            search(&state, depth).score == brute_force(&state, depth)
        }

        fn best_move_achieves_score(moves: Vec<u8>, depth: u8) -> bool {
            let state = random_position(moves);
            let depth = depth as usize % 4 + 1;
            let result = search(&state, depth);
            match result.best_move {
                Some(col) => {
                    let mut next = state.clone();
                    next.apply_move(col);
                    brute_force(&next, depth - 1) == result.score
                }
                None => state.is_terminal(),
            }
        }

        fn ties_resolve_to_lowest_column(moves: Vec<u8>, depth: u8) -> bool {
            let state = random_position(moves);
            let depth = depth as usize % 4 + 1;
            let result = search(&state, depth);
            if state.is_terminal() {
                return result.best_move.is_none();
            }
            let lowest = state.legal_moves().into_iter().find(|&col| {
                let mut next = state.clone();
                next.apply_move(col);
                brute_force(&next, depth - 1) == result.score
            });
            result.best_move == lowest
        }
    }

    #[test]
    fn depth_zero_returns_heuristic() {
        let state = played(&[3]);
        assert_eq!(search(&state, 0), SearchResult::leaf(40));
    }

    #[test]
    fn terminal_state_returns_utility() {
        let state = played(&[2, 5, 2, 5, 2, 5, 2]);
        assert_eq!(search(&state, 3), SearchResult::leaf(INF));
    }

    #[test]
    fn ties_go_to_lowest_column() {
        // every single drop scores the same four length-1 runs
        let state = GameState::new(Geometry::new(3, 3, 3)).unwrap();
        let result = search(&state, 1);
        assert_eq!(result.score, 40);
        assert_eq!(result.best_move, Some(0));
    }

    #[test]
    fn takes_winning_move() {
        // PlayerOne holds the bottom row at 0..3, PlayerTwo the row above
        let state = played(&[0, 0, 1, 1, 2, 2]);
        let result = search(&state, 2);
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, INF);
        assert_eq!(result.outlook(), Outlook::ForcedWin(Player::PlayerOne));
    }

    #[test]
    fn minimizer_takes_winning_move() {
        let state = played(&[6, 0, 6, 1, 5, 2, 5]);
        assert_eq!(state.active_player(), Player::PlayerTwo);
        let result = search(&state, 2);
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.outlook(), Outlook::ForcedWin(Player::PlayerTwo));
    }

    #[test]
    fn blocks_opponent_win() {
        // PlayerTwo threatens column 3 on the bottom row
        let state = played(&[6, 0, 6, 1, 5, 2]);
        let result = search(&state, 3);
        assert_eq!(result.best_move, Some(3));
        assert!(result.score > NEG_INF);
    }

    #[test]
    fn lost_position_still_yields_move() {
        // PlayerOne cannot cover both ends of PlayerTwo's open three
        let state = played(&[0, 2, 0, 3, 6, 4]);
        let result = search(&state, 3);
        assert_eq!(result.score, NEG_INF);
        assert_eq!(result.best_move, Some(0));
    }

    #[test]
    fn full_board_has_no_move() {
        let mut state = GameState::new(Geometry::new(3, 3, 3)).unwrap();
        for col in [0, 1, 2, 1, 0, 0, 2, 2, 1] {
            state.apply_move(col);
        }
        let result = search(&state, 4);
        assert_eq!(result, SearchResult::leaf(0));
        assert_eq!(result.outlook(), Outlook::Level);
    }

    #[test]
    fn search_does_not_touch_state() {
        let state = played(&[3, 3, 4]);
        let before = state.clone();
        search(&state, 4);
        assert_eq!(state, before);
    }

    #[test]
    fn solved_small_board_replays_to_predicted_outcome() {
        let mut state = GameState::new(Geometry::new(3, 4, 3)).unwrap();
        let root = search(&state, empty_cells(&state) + 1);
        assert!([INF, NEG_INF, 0].contains(&root.score));

        while !state.is_terminal() {
            let result = search(&state, empty_cells(&state) + 1);
            assert_eq!(result.score, root.score);
            let col = result.best_move.expect("non-terminal position has a move");
            assert!(state.apply_move(col));
        }

        assert_eq!(state.static_utility(), root.score);
    }

    #[test]
    fn outlook_reads_score() {
        assert_eq!(SearchResult::leaf(0).outlook(), Outlook::Level);
        assert_eq!(SearchResult::leaf(-30).outlook(), Outlook::Unclear);
        assert_eq!(
            SearchResult::leaf(NEG_INF).outlook(),
            Outlook::ForcedWin(Player::PlayerTwo)
        );
    }
}
