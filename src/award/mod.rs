//! Park awards
//!
//! A park holds up to four concurrent awards, each a transient record with
//! a remaining-duration counter. The evaluator runs periodically while the
//! park is open: it draws one candidate kind from the kinds not currently
//! held, checks that kind's deservedness predicate against a snapshot of
//! world aggregates, and installs the award on success. Held awards count
//! down independently and free their slot on expiry.

pub mod checks;

use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::core::config::{AWARD_DURATION, MAX_AWARDS};
use crate::hooks::{NewsKind, SimHooks, WindowClass};
use crate::park::{ParkState, PARK_FLAG_OPEN};
use crate::simulation::tick::SimulationEvent;

/// Every award the park can win, positive and negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AwardKind {
    MostUntidy,
    MostTidy,
    BestRollercoasters,
    BestValue,
    MostBeautiful,
    WorstValue,
    Safest,
    BestStaff,
    BestFood,
    WorstFood,
    BestRestrooms,
    MostDisappointing,
    BestWaterRides,
    BestCustomDesignedRides,
    MostDazzlingRideColours,
    MostConfusingLayout,
    BestGentleRides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl AwardKind {
    pub const ALL: [AwardKind; 17] = [
        AwardKind::MostUntidy,
        AwardKind::MostTidy,
        AwardKind::BestRollercoasters,
        AwardKind::BestValue,
        AwardKind::MostBeautiful,
        AwardKind::WorstValue,
        AwardKind::Safest,
        AwardKind::BestStaff,
        AwardKind::BestFood,
        AwardKind::WorstFood,
        AwardKind::BestRestrooms,
        AwardKind::MostDisappointing,
        AwardKind::BestWaterRides,
        AwardKind::BestCustomDesignedRides,
        AwardKind::MostDazzlingRideColours,
        AwardKind::MostConfusingLayout,
        AwardKind::BestGentleRides,
    ];

    pub fn bit(&self) -> u32 {
        1 << (*self as u8)
    }

    /// Notification styling for this award.
    pub fn polarity(&self) -> Polarity {
        match self {
            AwardKind::MostUntidy
            | AwardKind::WorstValue
            | AwardKind::WorstFood
            | AwardKind::MostDisappointing
            | AwardKind::MostConfusingLayout => Polarity::Negative,
            _ => Polarity::Positive,
        }
    }

    pub fn news_text(&self) -> &'static str {
        match self {
            AwardKind::MostUntidy => "Your park has received an award for being the most untidy park in the country!",
            AwardKind::MostTidy => "Your park has received an award for being the tidiest park in the country!",
            AwardKind::BestRollercoasters => "Your park has received an award for having the best rollercoasters in the country!",
            AwardKind::BestValue => "Your park has received an award for being the best value park in the country!",
            AwardKind::MostBeautiful => "Your park has received an award for being the most beautiful park in the country!",
            AwardKind::WorstValue => "Your park has received an award for being the worst value park in the country!",
            AwardKind::Safest => "Your park has received an award for being the safest park in the country!",
            AwardKind::BestStaff => "Your park has received an award for having the best staff in the country!",
            AwardKind::BestFood => "Your park has received an award for having the best food in the country!",
            AwardKind::WorstFood => "Your park has received an award for having the worst food in the country!",
            AwardKind::BestRestrooms => "Your park has received an award for having the best restrooms in the country!",
            AwardKind::MostDisappointing => "Your park has received an award for being the most disappointing park in the country!",
            AwardKind::BestWaterRides => "Your park has received an award for having the best water rides in the country!",
            AwardKind::BestCustomDesignedRides => "Your park has received an award for having the best custom-designed rides in the country!",
            AwardKind::MostDazzlingRideColours => "Your park has received an award for having the most dazzling choice of ride colours in the country!",
            AwardKind::MostConfusingLayout => "Your park has received an award for having the most confusing layout in the country!",
            AwardKind::BestGentleRides => "Your park has received an award for having the best gentle rides in the country!",
        }
    }
}

/// Bitmask of currently-held award kinds, passed into every predicate so
/// mutually-exclusive awards can veto each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AwardBits(pub u32);

impl AwardBits {
    pub fn contains(&self, kind: AwardKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: AwardKind) {
        self.0 |= kind.bit();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub kind: AwardKind,
    /// Evaluator periods left before the award expires
    pub remaining: u8,
}

/// The park's held awards. At most one active award per kind at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardSet {
    slots: [Option<Award>; MAX_AWARDS],
}

impl AwardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_bits(&self) -> AwardBits {
        let mut bits = AwardBits::default();
        for award in self.iter() {
            bits.insert(award.kind);
        }
        bits
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    pub fn install(&mut self, slot: usize, kind: AwardKind) {
        debug_assert!(self.slots[slot].is_none(), "installing into occupied slot");
        debug_assert!(!self.active_bits().contains(kind), "duplicate award kind");
        self.slots[slot] = Some(Award {
            kind,
            remaining: AWARD_DURATION,
        });
    }

    /// Decrement every held award; returns the kinds that just expired.
    pub fn tick_down(&mut self) -> Vec<AwardKind> {
        let mut expired = Vec::new();
        for slot in &mut self.slots {
            if let Some(award) = slot {
                award.remaining -= 1;
                if award.remaining == 0 {
                    expired.push(award.kind);
                    *slot = None;
                }
            }
        }
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Award> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

/// One evaluator run: possibly grant a new award, then age the held ones.
///
/// The candidate is drawn directly from the set of inactive kinds, so the
/// draw is bounded even when the park holds its maximum of awards; the
/// original rejection-sampling loop had no such guarantee.
pub fn update_awards(
    state: &mut ParkState,
    hooks: &mut dyn SimHooks,
    events: &mut Vec<SimulationEvent>,
) {
    if state.has_park_flag(PARK_FLAG_OPEN) {
        let active = state.awards.active_bits();
        if let Some(slot) = state.awards.free_slot() {
            let inactive: Vec<AwardKind> = AwardKind::ALL
                .into_iter()
                .filter(|kind| !active.contains(*kind))
                .collect();
            // MAX_AWARDS < kind count, so `inactive` can only be empty if
            // that relation is ever broken; guard instead of looping.
            if !inactive.is_empty() {
                let kind = inactive[state.rng.gen_range(0..inactive.len())];
                if checks::is_deserved(kind, state, active) {
                    state.awards.install(slot, kind);
                    tracing::info!("Park awarded: {:?}", kind);
                    if state.config.notify_park_award {
                        hooks.notify(NewsKind::Award, kind.news_text(), kind as u8 as u32);
                    }
                    hooks.invalidate_window_class(WindowClass::ParkInformation);
                    events.push(SimulationEvent::AwardGranted { kind });
                }
            }
        }
    }

    for kind in state.awards.tick_down() {
        hooks.invalidate_window_class(WindowClass::ParkInformation);
        events.push(SimulationEvent::AwardExpired { kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_bits_are_distinct() {
        let mut seen = 0u32;
        for kind in AwardKind::ALL {
            assert_eq!(seen & kind.bit(), 0);
            seen |= kind.bit();
        }
        assert_eq!(seen.count_ones(), 17);
    }

    #[test]
    fn test_award_set_expiry() {
        let mut set = AwardSet::new();
        set.install(0, AwardKind::MostTidy);
        for _ in 0..AWARD_DURATION - 1 {
            assert!(set.tick_down().is_empty());
        }
        let expired = set.tick_down();
        assert_eq!(expired, vec![AwardKind::MostTidy]);
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_active_bits_reflect_held_awards() {
        let mut set = AwardSet::new();
        set.install(0, AwardKind::Safest);
        set.install(1, AwardKind::BestFood);
        let bits = set.active_bits();
        assert!(bits.contains(AwardKind::Safest));
        assert!(bits.contains(AwardKind::BestFood));
        assert!(!bits.contains(AwardKind::WorstFood));
        assert_eq!(set.free_slot(), Some(2));
    }
}
