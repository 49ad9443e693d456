use super::AssignmentAlgorithm;
use crate::core::config::MarchLimits;
use crate::core::types::Character;
use crate::roster::effective_marches;

/// Clears every assignment
pub struct EmptyAlgorithm {
    limits: MarchLimits,
}

impl EmptyAlgorithm {
    pub const NAME: &'static str = "empty";

    pub fn new(limits: MarchLimits) -> Self {
        Self { limits }
    }
}

impl AssignmentAlgorithm for EmptyAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Clears all assignments (no reinforcements)."
    }

    fn solve(&self, roster: &[Character]) -> Vec<Character> {
        roster
            .iter()
            .map(|c| Character {
                marches_count: effective_marches(c.marches_count, &self.limits) as i32,
                reinforce: Vec::new(),
                score: None,
                ..c.clone()
            })
            .collect()
    }
}
