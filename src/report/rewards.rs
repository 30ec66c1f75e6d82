//! Stars and streaks for the child view

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub stars: u32,
    pub streak: u32,
}

impl Rewards {
    /// One star per 10% accuracy; every finished session extends the streak
    pub fn award(&mut self, accuracy_ratio: f64) -> u32 {
        let earned = (accuracy_ratio.clamp(0.0, 1.0) * 10.0 + 1e-9).floor() as u32;
        self.stars += earned;
        self.streak += 1;
        earned
    }
}
