//! Working copy of a roster for one run

use ahash::AHashMap;

use super::ledger::Ledger;
use crate::core::config::MarchLimits;
use crate::core::types::{Character, CharacterId, Presence, ReinforcementEdge, Status};
use crate::roster::{effective_marches, normalize_status, resolve_confidence};

/// Deep copy of the caller's roster plus the normalized per-character values
/// the phases read
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub characters: Vec<Character>,
    pub presence: Vec<Presence>,
    pub confidence: Vec<f64>,
    index: AHashMap<CharacterId, usize>,
}

impl Snapshot {
    /// Clone `input`, drop any previous edges and scores, and normalize
    /// status and confidence once
    pub fn new(input: &[Character], default_confidence: f64) -> Self {
        let mut characters: Vec<Character> = input.to_vec();
        let mut index = AHashMap::with_capacity(characters.len());

        for (i, c) in characters.iter_mut().enumerate() {
            c.reinforce.clear();
            c.score = None;
            // First occurrence wins if an id is repeated
            index.entry(c.id.clone()).or_insert(i);
        }

        let presence = characters.iter().map(|c| normalize_status(c.status)).collect();
        let confidence = characters
            .iter()
            .map(|c| resolve_confidence(c, default_confidence))
            .collect();

        Self {
            characters,
            presence,
            confidence,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn index_of(&self, id: &CharacterId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_farm(&self, i: usize) -> bool {
        self.characters[i].is_farm()
    }

    /// Canonical slot per character: the first slot holding the same id
    pub fn identity(&self) -> Vec<usize> {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, c)| self.index_of(&c.id).unwrap_or(i))
            .collect()
    }

    /// Indices of every character matching `pred`, in roster order
    pub fn select(&self, pred: impl Fn(usize) -> bool) -> Vec<usize> {
        (0..self.len()).filter(|&i| pred(i)).collect()
    }

    /// Indices grouped by presence in the given order, roster order within
    /// each group
    pub fn select_in_order(&self, order: &[Presence]) -> Vec<usize> {
        order
            .iter()
            .flat_map(|&p| self.select(|i| self.presence[i] == p))
            .collect()
    }

    /// Owners with their farms, in the order each owner's first farm appears
    ///
    /// Farms whose owner isn't part of the roster are left out.
    pub fn farms_by_owner(&self) -> Vec<(usize, Vec<usize>)> {
        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        let mut slot: AHashMap<usize, usize> = AHashMap::new();

        for (farm, c) in self.characters.iter().enumerate() {
            let Some(owner_id) = c.owner() else {
                continue;
            };
            let Some(owner) = self.index_of(owner_id) else {
                tracing::warn!(farm = %c.id, owner = %owner_id, "farm owner not in roster");
                continue;
            };
            let at = *slot.entry(owner).or_insert_with(|| {
                groups.push((owner, Vec::new()));
                groups.len() - 1
            });
            groups[at].1.push(farm);
        }

        groups
    }

    /// Build the output roster from the ledger's edges
    ///
    /// `marchesCount` is normalized for every character; with
    /// `write_presence` the normalized status replaces the raw one.
    pub fn into_characters(
        self,
        ledger: &Ledger,
        limits: &MarchLimits,
        write_presence: bool,
    ) -> Vec<Character> {
        let ids: Vec<CharacterId> = self.characters.iter().map(|c| c.id.clone()).collect();

        self.characters
            .into_iter()
            .zip(self.presence)
            .enumerate()
            .map(|(i, (mut c, presence))| {
                c.marches_count = effective_marches(c.marches_count, limits) as i32;
                if write_presence {
                    c.status = Status::from(presence);
                }
                c.reinforce = ledger
                    .edges(i)
                    .iter()
                    .map(|&t| ReinforcementEdge::to(ids[t].clone()))
                    .collect();
                c
            })
            .collect()
    }
}
