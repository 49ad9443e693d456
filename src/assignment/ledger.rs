//! Per-run bookkeeping of reinforcement edges
//!
//! Every phase of every strategy goes through `Ledger::try_assign`, so
//! the capacity invariants hold no matter how phases are ordered.
//! Characters are addressed by their index in the run's `Snapshot`.

/// Edges, remaining outgoing marches, and incoming counts for one run
#[derive(Debug, Clone)]
pub struct Ledger {
    /// source -> targets, in assignment order
    edges: Vec<Vec<usize>>,
    remaining_out: Vec<u32>,
    incoming: Vec<u32>,
    /// Sum of the weights of sources assigned to each target
    incoming_weight: Vec<f64>,
    /// Fixed before the first assignment; never changes during the run
    in_caps: Vec<u32>,
    /// Weight each source contributes to its targets' `incoming_weight`
    weights: Vec<f64>,
    /// Canonical slot of each character; slots sharing an id share one
    identity: Vec<usize>,
}

impl Ledger {
    /// Create a ledger from per-character outgoing capacities, incoming caps,
    /// and source weights (all indexed alike)
    pub fn new(out_caps: Vec<u32>, in_caps: Vec<u32>, weights: Vec<f64>) -> Self {
        let n = out_caps.len();
        debug_assert_eq!(in_caps.len(), n);
        debug_assert_eq!(weights.len(), n);
        Self {
            edges: vec![Vec::new(); n],
            remaining_out: out_caps,
            incoming: vec![0; n],
            incoming_weight: vec![0.0; n],
            in_caps,
            weights,
            identity: (0..n).collect(),
        }
    }

    /// Treat slots mapping to the same canonical slot as one character:
    /// no edges between them and no two edges from one source to them
    pub fn with_identity(mut self, identity: Vec<usize>) -> Self {
        debug_assert_eq!(identity.len(), self.len());
        self.identity = identity;
        self
    }

    fn same_character(&self, a: usize, b: usize) -> bool {
        self.identity[a] == self.identity[b]
    }

    pub fn len(&self) -> usize {
        self.remaining_out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_out.is_empty()
    }

    pub fn remaining(&self, source: usize) -> u32 {
        self.remaining_out.get(source).copied().unwrap_or(0)
    }

    pub fn incoming(&self, target: usize) -> u32 {
        self.incoming.get(target).copied().unwrap_or(0)
    }

    pub fn incoming_weight(&self, target: usize) -> f64 {
        self.incoming_weight.get(target).copied().unwrap_or(0.0)
    }

    pub fn in_cap(&self, target: usize) -> u32 {
        self.in_caps.get(target).copied().unwrap_or(0)
    }

    /// Target has reached its incoming cap
    pub fn is_full(&self, target: usize) -> bool {
        self.incoming(target) >= self.in_cap(target)
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        target < self.len()
            && self.edges.get(source).is_some_and(|targets| {
                targets.iter().any(|&t| self.same_character(t, target))
            })
    }

    /// Targets of `source`, in assignment order
    pub fn edges(&self, source: usize) -> &[usize] {
        self.edges.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_edges(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Unused outgoing marches across all sources
    pub fn total_remaining(&self) -> u64 {
        self.remaining_out.iter().map(|&r| u64::from(r)).sum()
    }

    /// Whether `try_assign(source, target)` would succeed
    pub fn can_assign(&self, source: usize, target: usize) -> bool {
        self.check(source, target, false)
    }

    fn check(&self, source: usize, target: usize, allow_duplicate_target: bool) -> bool {
        if source >= self.len() || target >= self.len() || self.same_character(source, target) {
            return false;
        }
        if self.remaining_out[source] == 0 {
            return false;
        }
        if !allow_duplicate_target && self.has_edge(source, target) {
            return false;
        }
        !self.is_full(target)
    }

    /// Record `source -> target` if every constraint allows it
    pub fn try_assign(&mut self, source: usize, target: usize) -> bool {
        self.try_assign_with(source, target, false)
    }

    /// Like `try_assign`, optionally letting a source stack a second march
    /// on a target it already reinforces
    pub fn try_assign_with(
        &mut self,
        source: usize,
        target: usize,
        allow_duplicate_target: bool,
    ) -> bool {
        if !self.check(source, target, allow_duplicate_target) {
            return false;
        }
        self.edges[source].push(target);
        self.remaining_out[source] -= 1;
        self.incoming[target] += 1;
        self.incoming_weight[target] += self.weights[source];
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(out: &[u32], caps: &[u32]) -> Ledger {
        Ledger::new(out.to_vec(), caps.to_vec(), vec![1.0; out.len()])
    }

    #[test]
    fn test_assign_updates_counts() {
        let mut l = ledger(&[2, 0], &[5, 5]);
        assert!(l.try_assign(0, 1));
        assert_eq!(l.remaining(0), 1);
        assert_eq!(l.incoming(1), 1);
        assert_eq!(l.incoming_weight(1), 1.0);
        assert_eq!(l.edges(0), &[1]);
        assert_eq!(l.total_edges(), 1);
    }

    #[test]
    fn test_rejects_self_assignment() {
        let mut l = ledger(&[2], &[5]);
        assert!(!l.try_assign(0, 0));
        assert_eq!(l.remaining(0), 2);
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        let mut l = ledger(&[3, 0], &[5, 5]);
        assert!(l.try_assign(0, 1));
        assert!(!l.try_assign(0, 1));
        assert_eq!(l.incoming(1), 1);
        assert_eq!(l.remaining(0), 2);
    }

    #[test]
    fn test_duplicate_allowed_when_requested() {
        let mut l = ledger(&[3, 0], &[5, 5]);
        assert!(l.try_assign(0, 1));
        assert!(l.try_assign_with(0, 1, true));
        assert_eq!(l.edges(0), &[1, 1]);
        assert_eq!(l.incoming(1), 2);
    }

    #[test]
    fn test_rejects_when_source_exhausted() {
        let mut l = ledger(&[1, 0, 0], &[5, 5, 5]);
        assert!(l.try_assign(0, 1));
        assert!(!l.try_assign(0, 2));
        assert_eq!(l.incoming(2), 0);
    }

    #[test]
    fn test_rejects_when_target_full() {
        let mut l = ledger(&[1, 1, 0], &[5, 5, 1]);
        assert!(l.try_assign(0, 2));
        assert!(l.is_full(2));
        assert!(!l.can_assign(1, 2));
        assert!(!l.try_assign(1, 2));
        assert_eq!(l.remaining(1), 1);
    }

    #[test]
    fn test_zero_cap_target_never_assigned() {
        let mut l = ledger(&[6, 0], &[5, 0]);
        assert!(!l.try_assign(0, 1));
    }

    #[test]
    fn test_out_of_range_indices_are_rejected() {
        let mut l = ledger(&[1], &[1]);
        assert!(!l.try_assign(0, 3));
        assert!(!l.try_assign(4, 0));
    }

    #[test]
    fn test_shared_identity_blocks_self_and_duplicate_edges() {
        // slots 0 and 1 are the same character, as are 2 and 3
        let mut l = ledger(&[3, 3, 0, 0], &[5; 4]).with_identity(vec![0, 0, 2, 2]);
        assert!(!l.try_assign(0, 1));
        assert!(!l.try_assign(1, 0));
        assert!(l.try_assign(0, 2));
        assert!(l.has_edge(0, 3));
        assert!(!l.try_assign(0, 3));
        assert!(l.try_assign(1, 3));
    }

    #[test]
    fn test_incoming_weight_uses_source_weight() {
        let mut l = Ledger::new(vec![1, 1, 0], vec![5, 5, 5], vec![0.5, 1.5, 1.0]);
        assert!(l.try_assign(0, 2));
        assert!(l.try_assign(1, 2));
        assert!((l.incoming_weight(2) - 2.0).abs() < 1e-12);
    }
}
