//! Agents: guests and staff
//!
//! Every agent is a mutable record advanced once per tick. Guests carry
//! needs and a thought ring; staff patrol and have a sub-type. Agents enter
//! through park-entry logic outside this core and leave by walking out or
//! being deleted.

pub mod thoughts;
pub mod update;

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, TileCoords};
use crate::agent::thoughts::ThoughtRing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffKind {
    Handyman,
    Mechanic,
    Security,
    Entertainer,
}

impl StaffKind {
    pub const ALL: [StaffKind; 4] = [
        StaffKind::Handyman,
        StaffKind::Mechanic,
        StaffKind::Security,
        StaffKind::Entertainer,
    ];

    pub fn bit(&self) -> u8 {
        match self {
            StaffKind::Handyman => 1 << 0,
            StaffKind::Mechanic => 1 << 1,
            StaffKind::Security => 1 << 2,
            StaffKind::Entertainer => 1 << 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Guest,
    Staff(StaffKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub kind: AgentKind,
    pub position: TileCoords,
    pub destination: Option<TileCoords>,
    /// Agents outside the park gates do not count toward park aggregates
    pub outside_of_park: bool,
    pub thoughts: ThoughtRing,
    /// Needs climb toward 255; thresholds trigger thoughts
    pub hunger: u8,
    pub thirst: u8,
    pub bathroom: u8,
    pub energy: u8,
    pub happiness: u8,
    pub animation_frame: u8,
}

impl Agent {
    fn new(id: AgentId, name: String, kind: AgentKind, position: TileCoords) -> Self {
        Self {
            id,
            name,
            kind,
            position,
            destination: None,
            outside_of_park: false,
            thoughts: ThoughtRing::new(),
            hunger: 0,
            thirst: 0,
            bathroom: 0,
            energy: 128,
            happiness: 128,
            animation_frame: 0,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.kind, AgentKind::Guest)
    }

    pub fn staff_kind(&self) -> Option<StaffKind> {
        match self.kind {
            AgentKind::Staff(kind) => Some(kind),
            AgentKind::Guest => None,
        }
    }
}

/// All live agents for a session. Slots are reused; an `AgentId` stays
/// valid until its agent is removed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AgentTable {
    agents: Vec<Option<Agent>>,
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, kind: AgentKind, position: TileCoords) -> AgentId {
        if let Some(index) = self.agents.iter().position(|slot| slot.is_none()) {
            let id = AgentId::new(index as u32);
            self.agents[index] = Some(Agent::new(id, name, kind, position));
            id
        } else {
            let id = AgentId::new(self.agents.len() as u32);
            self.agents.push(Some(Agent::new(id, name, kind, position)));
            id
        }
    }

    pub fn spawn_guest(&mut self, name: impl Into<String>, position: TileCoords) -> AgentId {
        self.insert(name.into(), AgentKind::Guest, position)
    }

    pub fn spawn_staff(
        &mut self,
        name: impl Into<String>,
        kind: StaffKind,
        position: TileCoords,
    ) -> AgentId {
        self.insert(name.into(), AgentKind::Staff(kind), position)
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.get_mut(id.index())?.take()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut().filter_map(|slot| slot.as_mut())
    }

    pub fn guests(&self) -> impl Iterator<Item = &Agent> {
        self.iter().filter(|a| a.is_guest())
    }

    pub fn staff(&self) -> impl Iterator<Item = &Agent> {
        self.iter().filter(|a| !a.is_guest())
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Guests currently inside the park gates.
    pub fn guests_in_park(&self) -> usize {
        self.guests().filter(|a| !a.outside_of_park).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_lookup() {
        let mut table = AgentTable::new();
        let id = table.spawn_guest("Chris", TileCoords::new(1, 1));
        assert!(table.get(id).unwrap().is_guest());
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn test_slot_reuse_after_removal() {
        let mut table = AgentTable::new();
        let a = table.spawn_guest("A", TileCoords::new(0, 0));
        let _b = table.spawn_guest("B", TileCoords::new(0, 0));
        table.remove(a);
        let c = table.spawn_guest("C", TileCoords::new(0, 0));
        assert_eq!(c, a);
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn test_guests_in_park_excludes_outside() {
        let mut table = AgentTable::new();
        let inside = table.spawn_guest("In", TileCoords::new(0, 0));
        let outside = table.spawn_guest("Out", TileCoords::new(0, 0));
        table.spawn_staff("Handy", StaffKind::Handyman, TileCoords::new(0, 0));
        table.get_mut(outside).unwrap().outside_of_park = true;
        assert!(table.get(inside).is_some());
        assert_eq!(table.guests_in_park(), 1);
    }
}
