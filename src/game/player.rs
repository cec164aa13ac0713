use serde::{Deserialize, Serialize};

use super::board::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// Convert player to the piece it drops
    pub fn to_piece(self) -> Piece {
        match self {
            Player::PlayerOne => Piece::PlayerOne,
            Player::PlayerTwo => Piece::PlayerTwo,
        }
    }

    /// Whether the search maximizes on this player's turns
    pub fn is_maximizer(self) -> bool {
        self == Player::PlayerOne
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::PlayerOne => "Player 1",
            Player::PlayerTwo => "Player 2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::PlayerOne.other(), Player::PlayerTwo);
        assert_eq!(Player::PlayerTwo.other(), Player::PlayerOne);
    }

    #[test]
    fn test_player_piece() {
        assert_eq!(Player::PlayerOne.to_piece(), Piece::PlayerOne);
        assert_eq!(Player::PlayerTwo.to_piece(), Piece::PlayerTwo);
    }

    #[test]
    fn test_player_one_maximizes() {
        assert!(Player::PlayerOne.is_maximizer());
        assert!(!Player::PlayerTwo.is_maximizer());
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::PlayerOne.name(), "Player 1");
        assert_eq!(Player::PlayerTwo.name(), "Player 2");
    }
}
