//! Award deservedness predicates
//!
//! Each predicate is pure over a snapshot of world aggregates: guest
//! thought counts, ride counts and status, shop statistics, park rating and
//! entrance fee. Predicates receive the active-award bitmask so mutually
//! exclusive awards can veto themselves. Thresholds are fixed gameplay
//! constants, documented per predicate; integer divisions are by constants,
//! never by a possibly-zero aggregate.

use crate::agent::thoughts::ThoughtType;
use crate::agent::StaffKind;
use crate::award::{AwardBits, AwardKind};
use crate::core::types::{money, ride_rating};
use crate::park::{ParkState, PARK_FLAG_FREE_ENTRY, PARK_FLAG_NO_MONEY};
use crate::registry::{RideCategory, RIDE_ENTRY_HAS_TRACK, RIDE_ENTRY_SELLS_FOOD};
use crate::ride::{Ride, RideStatus, RIDE_LIFECYCLE_NOT_CUSTOM_DESIGN};

type AwardCheck = fn(&ParkState, AwardBits) -> bool;

/// Dispatch table keyed by award kind, in `AwardKind::ALL` order.
const AWARD_CHECKS: [AwardCheck; 17] = [
    deserves_most_untidy,
    deserves_most_tidy,
    deserves_best_rollercoasters,
    deserves_best_value,
    deserves_most_beautiful,
    deserves_worst_value,
    deserves_safest,
    deserves_best_staff,
    deserves_best_food,
    deserves_worst_food,
    deserves_best_restrooms,
    deserves_most_disappointing,
    deserves_best_water_rides,
    deserves_best_custom_designed_rides,
    deserves_most_dazzling_ride_colours,
    deserves_most_confusing_layout,
    deserves_best_gentle_rides,
];

pub fn is_deserved(kind: AwardKind, park: &ParkState, active: AwardBits) -> bool {
    AWARD_CHECKS[kind as u8 as usize](park, active)
}

/// Guests inside the park whose freshest thought matches `predicate`.
fn fresh_thought_count(park: &ParkState, predicate: impl Fn(ThoughtType) -> bool) -> usize {
    park.agents
        .guests()
        .filter(|guest| !guest.outside_of_park)
        .filter_map(|guest| guest.thoughts.latest_fresh())
        .filter(|thought| predicate(thought.kind))
        .count()
}

fn is_untidy_thought(kind: ThoughtType) -> bool {
    matches!(
        kind,
        ThoughtType::BadLitter | ThoughtType::PathDisgusting | ThoughtType::Vandalism
    )
}

/// Ride is open and has not crashed.
fn open_and_sound(ride: &Ride) -> bool {
    ride.status == RideStatus::Open && !ride.is_crashed()
}

/// Open, uncrashed rides of a category. Rides whose entry cannot be
/// resolved are skipped, never counted.
fn open_ride_count_in_category(park: &ParkState, category: RideCategory) -> usize {
    park.rides
        .iter()
        .filter(|ride| open_and_sound(ride))
        .filter(|ride| {
            park.registry
                .ride_entry(ride.subtype)
                .is_some_and(|entry| entry.has_category(category))
        })
        .count()
}

/// More than 1/16 of the guests in the park are thinking untidy thoughts.
fn deserves_most_untidy(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostBeautiful)
        || active.contains(AwardKind::BestStaff)
        || active.contains(AwardKind::MostTidy)
    {
        return false;
    }
    let negative = fresh_thought_count(park, is_untidy_thought);
    negative > park.guests_in_park() / 16
}

/// More than 1/64 of the guests are thinking tidy thoughts and at most 5
/// are thinking untidy thoughts.
fn deserves_most_tidy(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostUntidy) || active.contains(AwardKind::MostDisappointing) {
        return false;
    }
    let positive = fresh_thought_count(park, |k| k == ThoughtType::VeryClean);
    let negative = fresh_thought_count(park, is_untidy_thought);
    negative <= 5 && positive > park.guests_in_park() / 64
}

/// At least 6 open rollercoasters.
fn deserves_best_rollercoasters(park: &ParkState, _active: AwardBits) -> bool {
    open_ride_count_in_category(park, RideCategory::Rollercoaster) >= 6
}

/// Entrance fee is at least 0.10 below half of the total ride value.
fn deserves_best_value(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::WorstValue) || active.contains(AwardKind::MostDisappointing) {
        return false;
    }
    if park.has_park_flag(PARK_FLAG_NO_MONEY) || park.has_park_flag(PARK_FLAG_FREE_ENTRY) {
        return false;
    }
    let total_value = park.total_ride_value();
    if total_value < money(10, 0) {
        return false;
    }
    park.entrance_fee + money(0, 10) < total_value / 2
}

/// More than 1/128 of the guests are thinking scenic thoughts and at most
/// 15 are thinking untidy thoughts.
fn deserves_most_beautiful(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostUntidy) || active.contains(AwardKind::MostDisappointing) {
        return false;
    }
    let positive = fresh_thought_count(park, |k| k == ThoughtType::Scenery);
    let negative = fresh_thought_count(park, is_untidy_thought);
    negative <= 15 && positive > park.guests_in_park() / 128
}

/// Entrance fee exceeds the total ride value.
fn deserves_worst_value(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::BestValue) || park.has_park_flag(PARK_FLAG_NO_MONEY) {
        return false;
    }
    if park.entrance_fee == 0 {
        return false;
    }
    park.entrance_fee > park.total_ride_value()
}

/// At most 2 guests bothered by vandalism and no ride has ever crashed.
fn deserves_safest(park: &ParkState, _active: AwardBits) -> bool {
    let bothered = fresh_thought_count(park, |k| k == ThoughtType::Vandalism);
    if bothered > 2 {
        return false;
    }
    park.rides.iter().all(|ride| ride.last_crash.is_none())
}

/// All four staff types employed, at least 20 staff, one per 32 guests.
fn deserves_best_staff(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostUntidy) {
        return false;
    }
    let guest_count = park.agents.guests().count();
    let mut staff_count = 0usize;
    let mut staff_type_bits = 0u8;
    for agent in park.agents.staff() {
        staff_count += 1;
        if let Some(kind) = agent.staff_kind() {
            staff_type_bits |= kind.bit();
        }
    }
    let all_types = StaffKind::ALL.iter().fold(0u8, |bits, k| bits | k.bit());
    staff_type_bits == all_types && staff_count >= 20 && staff_count >= guest_count / 32
}

/// Open food stalls and their distinct menu items.
fn food_shop_stats(park: &ParkState) -> (usize, usize) {
    let mut shops = 0usize;
    let mut unique = 0usize;
    let mut item_bits = 0u64;
    for ride in park.rides.iter() {
        if ride.status != RideStatus::Open {
            continue;
        }
        let Some(entry) = park.registry.ride_entry(ride.subtype) else {
            continue;
        };
        if !entry.has_flag(RIDE_ENTRY_SELLS_FOOD) {
            continue;
        }
        shops += 1;
        if let Some(item) = entry.shop_item {
            let bit = 1u64 << (item as u64 & 63);
            if item_bits & bit == 0 {
                item_bits |= bit;
                unique += 1;
            }
        }
    }
    (shops, unique)
}

/// At least 7 food shops, 4 unique, one per 128 guests, and no more than
/// 12 hungry guests.
fn deserves_best_food(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::WorstFood) {
        return false;
    }
    let (shops, unique) = food_shop_stats(park);
    if shops < 7 || unique < 4 || shops < park.guests_in_park() / 128 {
        return false;
    }
    fresh_thought_count(park, |k| k == ThoughtType::Hungry) <= 12
}

/// No more than 2 unique food shops, less than one shop per 256 guests,
/// and more than 15 hungry guests.
fn deserves_worst_food(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::BestFood) {
        return false;
    }
    let (shops, unique) = food_shop_stats(park);
    if unique > 2 || shops > park.guests_in_park() / 256 {
        return false;
    }
    fresh_thought_count(park, |k| k == ThoughtType::Hungry) > 15
}

/// At least 4 open restrooms, one per 128 guests, and no more than 16
/// guests thinking they need one.
fn deserves_best_restrooms(park: &ParkState, _active: AwardBits) -> bool {
    let restrooms = park
        .rides
        .iter()
        .filter(|ride| ride.status == RideStatus::Open)
        .filter(|ride| {
            park.registry
                .ride_entry(ride.subtype)
                .is_some_and(|entry| entry.has_category(RideCategory::Toilets))
        })
        .count();
    if restrooms < 4 || restrooms < park.guests_in_park() / 128 {
        return false;
    }
    fresh_thought_count(park, |k| k == ThoughtType::Bathroom) <= 16
}

/// Park rating at most 650 and at least half of the measured rides are
/// unpopular.
fn deserves_most_disappointing(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::BestValue) || park.park_rating > 650 {
        return false;
    }
    let mut counted = 0usize;
    let mut disappointing = 0usize;
    for ride in park.rides.iter() {
        let (Some(_), Some(popularity)) = (ride.excitement, ride.popularity) else {
            continue;
        };
        counted += 1;
        if popularity <= 6 {
            disappointing += 1;
        }
    }
    disappointing >= counted / 2
}

/// At least 6 open water rides.
fn deserves_best_water_rides(park: &ParkState, _active: AwardBits) -> bool {
    open_ride_count_in_category(park, RideCategory::Water) >= 6
}

/// At least 6 open custom-designed rides with excitement 5.50 or better.
fn deserves_best_custom_designed_rides(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostDisappointing) {
        return false;
    }
    let custom = park
        .rides
        .iter()
        .filter(|ride| {
            park.registry
                .ride_entry(ride.subtype)
                .is_some_and(|entry| entry.has_flag(RIDE_ENTRY_HAS_TRACK))
        })
        .filter(|ride| !ride.has_lifecycle_flag(RIDE_LIFECYCLE_NOT_CUSTOM_DESIGN))
        .filter(|ride| ride.excitement.is_some_and(|e| e >= ride_rating(5, 50)))
        .filter(|ride| open_and_sound(ride))
        .count();
    custom >= 6
}

/// Track colours considered dazzling.
const DAZZLING_RIDE_COLOURS: [u8; 4] = [5, 14, 20, 30];

/// At least 5 colourful tracked rides and more colourful than plain ones.
fn deserves_most_dazzling_ride_colours(park: &ParkState, active: AwardBits) -> bool {
    if active.contains(AwardKind::MostDisappointing) {
        return false;
    }
    let mut counted = 0usize;
    let mut colourful = 0usize;
    for ride in park.rides.iter() {
        let has_track = park
            .registry
            .ride_entry(ride.subtype)
            .is_some_and(|entry| entry.has_flag(RIDE_ENTRY_HAS_TRACK));
        if !has_track {
            continue;
        }
        counted += 1;
        if DAZZLING_RIDE_COLOURS.contains(&ride.track_colours.main) {
            colourful += 1;
        }
    }
    colourful >= 5 && colourful >= counted - colourful
}

/// At least 10 guests are lost or can't find something and they make up
/// more than 1/64 of the guests in the park.
fn deserves_most_confusing_layout(park: &ParkState, _active: AwardBits) -> bool {
    let counted = park.guests_in_park();
    let lost = fresh_thought_count(park, |k| {
        matches!(k, ThoughtType::Lost | ThoughtType::CantFind)
    });
    lost >= 10 && lost >= counted / 64
}

/// At least 10 open gentle rides.
fn deserves_best_gentle_rides(park: &ParkState, _active: AwardBits) -> bool {
    open_ride_count_in_category(park, RideCategory::Gentle) >= 10
}
