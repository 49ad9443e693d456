//! Core type definitions used throughout the codebase

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a character within one roster snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status as registered by the player (or left unset by the roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Online,
    OfflineEmpty,
    OfflineNotEmpty,
    /// Unset, null, or any legacy value
    #[default]
    #[serde(other)]
    Unknown,
}

/// Canonical three-way status the assignment phases work with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Online,
    OfflineEmpty,
    OfflineNotEmpty,
}

impl From<Presence> for Status {
    fn from(p: Presence) -> Self {
        match p {
            Presence::Online => Status::Online,
            Presence::OfflineEmpty => Status::OfflineEmpty,
            Presence::OfflineNotEmpty => Status::OfflineNotEmpty,
        }
    }
}

/// Null deserializes as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Document-store numbers may arrive as doubles; negative, fractional and
/// null values are floored into range
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Unsigned(n)) => n,
        Some(Number::Signed(n)) => n.max(0) as u64,
        Some(Number::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        _ => 0,
    })
}

/// One directed source -> target reinforcement march
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinforcementEdge {
    #[serde(rename = "characterId", alias = "targetId")]
    pub target_id: CharacterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub march_type: Option<String>,
    /// Display value filled in by the score finalizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_value: Option<f64>,
}

impl ReinforcementEdge {
    pub fn to(target_id: CharacterId) -> Self {
        Self {
            target_id,
            march_type: None,
            score_value: None,
        }
    }
}

/// A participant of the event roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(rename = "characterId", alias = "id")]
    pub id: CharacterId,
    #[serde(rename = "characterName", alias = "name", default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub power_level: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    /// Raw outgoing capacity; 0 means "use the default"
    #[serde(default)]
    pub marches_count: i32,
    /// Set when this character is a farm owned by another character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_character_id: Option<CharacterId>,
    /// Absolute troop capacity, converted to an incoming cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reinforcement_capacity: Option<u64>,
    /// Explicit incoming cap override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reinforcement_marches: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_center_level: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reinforce: Vec<ReinforcementEdge>,
    /// Sum of the outgoing edges' score values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Character {
    pub fn new(id: impl Into<String>, status: Status) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: CharacterId(id),
            power_level: 0,
            status,
            marches_count: 0,
            main_character_id: None,
            reinforcement_capacity: None,
            max_reinforcement_marches: None,
            confidence_level: None,
            town_center_level: None,
            reinforce: Vec::new(),
            score: None,
        }
    }

    /// Owner id if this character is a farm (empty ids don't count)
    pub fn owner(&self) -> Option<&CharacterId> {
        self.main_character_id
            .as_ref()
            .filter(|owner| !owner.as_str().is_empty())
    }

    pub fn is_farm(&self) -> bool {
        self.owner().is_some()
    }

    /// Whether this character has an edge pointing at `target`
    pub fn reinforces(&self, target: &CharacterId) -> bool {
        self.reinforce.iter().any(|e| &e.target_id == target)
    }
}
