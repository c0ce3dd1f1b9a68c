use std::fmt::Display;

/// The state of a single box in a specific game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrizeBox {
    pub index: usize,
    pub has_reward: bool,
    pub is_open: bool,
}

impl PrizeBox {
    // all boxes start closed
    pub fn new(index: usize, has_reward: bool) -> Self {
        Self {
            index,
            has_reward,
            is_open: false,
        }
    }

    /// Whether the host is allowed to open this box given the player's pick.
    pub fn may_reveal(&self, picked_index: Option<usize>) -> bool {
        Some(self.index) != picked_index && !self.is_open && !self.has_reward
    }
}

impl Display for PrizeBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let contents = match (self.is_open, self.has_reward) {
            (false, _) => "?",
            (true, true) => "$",
            (true, false) => "_",
        };
        write!(f, "[{}:{}]", self.index, contents)
    }
}
