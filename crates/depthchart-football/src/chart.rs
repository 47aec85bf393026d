// Depth chart: slot lists plus the depth pool, and the edits applied to them.

use serde::Serialize;

use crate::formation::Formation;
use crate::player::{Placement, Player, PlayerTags};
use crate::taxonomy::Canonical;

/// Players assigned to one formation slot. The first entry starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotList {
    pub id: String,
    pub label: Canonical,
    pub accepts: Vec<Canonical>,
    pub players: Vec<Player>,
}

impl SlotList {
    pub fn starter(&self) -> Option<&Player> {
        self.players.first()
    }
}

/// Where a player sits in the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Slot(String),
    Depth,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("unknown slot '{0}'")]
    UnknownSlot(String),

    #[error("player '{key}' not found in {location}")]
    PlayerNotFound { key: String, location: String },

    #[error("index {index} out of range for slot '{slot}' with {len} players")]
    IndexOutOfRange {
        slot: String,
        index: usize,
        len: usize,
    },
}

/// Result of assigning a roster to a formation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthChart {
    pub formation: String,
    /// One entry per formation slot, in formation order.
    pub slots: Vec<SlotList>,
    pub depth: Vec<Player>,
    #[serde(skip)]
    pub versatility_threshold: usize,
}

impl DepthChart {
    /// An empty chart with every slot of `formation`.
    pub fn empty(formation: &Formation, versatility_threshold: usize) -> Self {
        DepthChart {
            formation: formation.key.to_string(),
            slots: formation
                .slots
                .iter()
                .map(|s| SlotList {
                    id: s.id.to_string(),
                    label: s.label,
                    accepts: s.accepts.to_vec(),
                    players: Vec::new(),
                })
                .collect(),
            depth: Vec::new(),
            versatility_threshold,
        }
    }

    pub fn slot(&self, id: &str) -> Option<&SlotList> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut SlotList, EditError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| EditError::UnknownSlot(id.to_string()))
    }

    /// Every player in the chart, slots first, then depth.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.slots
            .iter()
            .flat_map(|s| s.players.iter())
            .chain(self.depth.iter())
    }

    pub fn len(&self) -> usize {
        self.players().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First location holding a player with this key.
    pub fn locate(&self, key: &str) -> Option<Location> {
        if let Some(slot) = self
            .slots
            .iter()
            .find(|s| s.players.iter().any(|p| p.key == key))
        {
            return Some(Location::Slot(slot.id.clone()));
        }
        self.depth
            .iter()
            .any(|p| p.key == key)
            .then_some(Location::Depth)
    }

    fn list_mut(&mut self, location: &Location) -> Result<&mut Vec<Player>, EditError> {
        match location {
            Location::Slot(id) => Ok(&mut self.slot_mut(id)?.players),
            Location::Depth => Ok(&mut self.depth),
        }
    }

    /// Take the first player with `key` out of `location`.
    pub fn remove(&mut self, location: &Location, key: &str) -> Result<Player, EditError> {
        let list = self.list_mut(location)?;
        let idx = list
            .iter()
            .position(|p| p.key == key)
            .ok_or_else(|| EditError::PlayerNotFound {
                key: key.to_string(),
                location: describe(location),
            })?;
        Ok(list.remove(idx))
    }

    /// Append a player to the end of a slot list or the depth pool,
    /// annotating them for their new place.
    pub fn add_player(&mut self, mut player: Player, to: &Location) -> Result<(), EditError> {
        let threshold = self.versatility_threshold;
        match to {
            Location::Slot(id) => {
                let slot = self.slot_mut(id)?;
                player.tags = Some(PlayerTags::for_slot(
                    &player,
                    &slot.accepts,
                    Placement::Primary,
                    threshold,
                ));
                slot.players.push(player);
            }
            Location::Depth => {
                player.tags = Some(PlayerTags::for_depth(&player, threshold));
                self.depth.push(player);
            }
        }
        Ok(())
    }

    /// Move the first player with `key` at `from` to the end of `to`.
    ///
    /// The destination is checked before anything is removed, so a failed
    /// move leaves the chart untouched.
    pub fn move_player(&mut self, from: &Location, key: &str, to: &Location) -> Result<(), EditError> {
        if let Location::Slot(id) = to {
            if self.slot(id).is_none() {
                return Err(EditError::UnknownSlot(id.clone()));
            }
        }
        let player = self.remove(from, key)?;
        self.add_player(player, to)
    }

    /// Move a player to `index` within their slot list.
    pub fn reorder(&mut self, slot_id: &str, key: &str, index: usize) -> Result<(), EditError> {
        let slot = self.slot_mut(slot_id)?;
        let len = slot.players.len();
        let from = slot
            .players
            .iter()
            .position(|p| p.key == key)
            .ok_or_else(|| EditError::PlayerNotFound {
                key: key.to_string(),
                location: slot_id.to_string(),
            })?;
        if index >= len {
            return Err(EditError::IndexOutOfRange {
                slot: slot_id.to_string(),
                index,
                len,
            });
        }
        let player = slot.players.remove(from);
        slot.players.insert(index, player);
        Ok(())
    }

    /// Make a player the starter of their slot.
    pub fn promote(&mut self, slot_id: &str, key: &str) -> Result<(), EditError> {
        self.reorder(slot_id, key, 0)
    }
}

fn describe(location: &Location) -> String {
    match location {
        Location::Slot(id) => id.clone(),
        Location::Depth => "depth".to_string(),
    }
}
