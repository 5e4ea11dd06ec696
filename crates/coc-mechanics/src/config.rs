//! Configuration for the check engine.

/// Limits and seeding for a [`crate::CheckEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Upper bound on repeated rolls per check.
    pub max_repeats: u32,
    /// Upper bound on net bonus or penalty dice.
    pub max_net_dice: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_repeats: 20,
            max_net_dice: 50,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the repetition cap (at least 1).
    pub fn with_max_repeats(mut self, max: u32) -> Self {
        self.max_repeats = max.max(1);
        self
    }

    /// Set the net dice cap.
    pub fn with_max_net_dice(mut self, max: u32) -> Self {
        self.max_net_dice = max;
        self
    }
}
