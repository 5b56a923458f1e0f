//! Thought ring for guests
//!
//! Each agent keeps a small ring of recent thoughts, newest first. A thought
//! starts fresh and goes stale as its freshness counter climbs each tick;
//! only fresh thoughts count toward aggregate scoring (award predicates).

use serde::{Deserialize, Serialize};

use crate::core::config::{THOUGHT_EXPIRY, THOUGHT_FRESH_LIMIT};

/// Fixed size of the per-agent thought ring.
pub const MAX_THOUGHTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Valence {
    Positive,
    Negative,
}

/// What an agent is currently thinking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThoughtType {
    BadLitter,
    PathDisgusting,
    Vandalism,
    VeryClean,
    Scenery,
    Hungry,
    Thirsty,
    Bathroom,
    Lost,
    CantFind,
    Tired,
    GreatValue,
    BadValue,
    Wow,
    Scared,
}

impl ThoughtType {
    pub fn valence(&self) -> Valence {
        match self {
            ThoughtType::VeryClean
            | ThoughtType::Scenery
            | ThoughtType::GreatValue
            | ThoughtType::Wow => Valence::Positive,
            ThoughtType::BadLitter
            | ThoughtType::PathDisgusting
            | ThoughtType::Vandalism
            | ThoughtType::Hungry
            | ThoughtType::Thirsty
            | ThoughtType::Bathroom
            | ThoughtType::Lost
            | ThoughtType::CantFind
            | ThoughtType::Tired
            | ThoughtType::BadValue
            | ThoughtType::Scared => Valence::Negative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    pub kind: ThoughtType,
    /// Staleness counter; 0 is brand new, expiry drops the thought
    pub freshness: u8,
    /// Optional subject (ride index, shop item) the thought refers to
    pub item: Option<u8>,
}

impl Thought {
    pub fn new(kind: ThoughtType) -> Self {
        Self {
            kind,
            freshness: 0,
            item: None,
        }
    }

    pub fn about(kind: ThoughtType, item: u8) -> Self {
        Self {
            kind,
            freshness: 0,
            item: Some(item),
        }
    }

    /// Fresh thoughts are the only ones aggregate scoring sees.
    pub fn is_fresh(&self) -> bool {
        self.freshness <= THOUGHT_FRESH_LIMIT
    }
}

/// Ring of recent thoughts, newest at slot 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThoughtRing {
    thoughts: [Option<Thought>; MAX_THOUGHTS],
}

impl ThoughtRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new thought at the front, pushing older ones back and
    /// dropping the oldest. A repeat of the current front thought only
    /// refreshes it.
    pub fn push(&mut self, thought: Thought) {
        if let Some(front) = &mut self.thoughts[0] {
            if front.kind == thought.kind && front.item == thought.item {
                front.freshness = 0;
                return;
            }
        }
        self.thoughts.rotate_right(1);
        self.thoughts[0] = Some(thought);
    }

    /// Advance staleness on every slot; expired thoughts are dropped.
    pub fn age_all(&mut self) {
        for slot in &mut self.thoughts {
            if let Some(thought) = slot {
                thought.freshness = thought.freshness.saturating_add(1);
                if thought.freshness >= THOUGHT_EXPIRY {
                    *slot = None;
                }
            }
        }
    }

    /// Most recent thought, fresh or not.
    pub fn latest(&self) -> Option<&Thought> {
        self.thoughts[0].as_ref()
    }

    /// Most recent thought, only while still fresh. This is the view the
    /// award evaluator takes of an agent's mood.
    pub fn latest_fresh(&self) -> Option<&Thought> {
        self.latest().filter(|t| t.is_fresh())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter().filter_map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts[0].is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_newest_first() {
        let mut ring = ThoughtRing::new();
        ring.push(Thought::new(ThoughtType::Hungry));
        ring.push(Thought::new(ThoughtType::Scenery));
        assert_eq!(ring.latest().unwrap().kind, ThoughtType::Scenery);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_repeat_thought_refreshes_front() {
        let mut ring = ThoughtRing::new();
        ring.push(Thought::new(ThoughtType::Hungry));
        for _ in 0..10 {
            ring.age_all();
        }
        assert!(!ring.latest().unwrap().is_fresh());
        ring.push(Thought::new(ThoughtType::Hungry));
        assert!(ring.latest().unwrap().is_fresh());
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut ring = ThoughtRing::new();
        let kinds = [
            ThoughtType::Hungry,
            ThoughtType::Thirsty,
            ThoughtType::Bathroom,
            ThoughtType::Lost,
            ThoughtType::Scenery,
            ThoughtType::VeryClean,
        ];
        for kind in kinds {
            ring.push(Thought::new(kind));
        }
        assert_eq!(ring.len(), MAX_THOUGHTS);
        assert_eq!(ring.latest().unwrap().kind, ThoughtType::VeryClean);
        assert!(ring.iter().all(|t| t.kind != ThoughtType::Hungry));
    }

    #[test]
    fn test_staleness_gates_scoring() {
        let mut ring = ThoughtRing::new();
        ring.push(Thought::new(ThoughtType::BadLitter));
        assert!(ring.latest_fresh().is_some());
        for _ in 0..=THOUGHT_FRESH_LIMIT {
            ring.age_all();
        }
        assert!(ring.latest_fresh().is_none());
        assert!(ring.latest().is_some());
    }

    #[test]
    fn test_thought_expires_entirely() {
        let mut ring = ThoughtRing::new();
        ring.push(Thought::new(ThoughtType::Vandalism));
        for _ in 0..THOUGHT_EXPIRY {
            ring.age_all();
        }
        assert!(ring.is_empty());
    }
}
