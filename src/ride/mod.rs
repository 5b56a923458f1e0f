//! Ride table and operational state machine
//!
//! A ride is created closed, may run a testing pass, then opens. Crashes
//! are recorded while open and stick to the ride until it is repaired.
//! The table has a hard capacity of 128 rides per park.

pub mod track;

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::{Money, RideId, RideRating};

/// Hard capacity of the ride table.
pub const MAX_RIDES: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideStatus {
    Closed,
    Testing,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashType {
    NoFatalities,
    Fatalities,
}

/// Ride has crashed and not yet been repaired
pub const RIDE_LIFECYCLE_CRASHED: u32 = 1 << 0;
/// Track layout came from a pre-built design, not the player
pub const RIDE_LIFECYCLE_NOT_CUSTOM_DESIGN: u32 = 1 << 1;
/// Ride has completed at least one testing pass
pub const RIDE_LIFECYCLE_TESTED: u32 = 1 << 2;

/// Colour scheme applied to a ride's track pieces.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrackColours {
    pub main: u8,
    pub additional: u8,
    pub supports: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub name: String,
    /// Entry index into the ride object registry
    pub subtype: u8,
    pub status: RideStatus,
    pub lifecycle_flags: u32,
    /// `None` until the ride has been rated by a test run
    pub excitement: Option<RideRating>,
    /// `None` until enough guests have ridden to measure it
    pub popularity: Option<u8>,
    pub last_crash: Option<CrashType>,
    pub track_colours: TrackColours,
    /// Contribution to the park's total ride value
    pub value: Money,
    /// Chairlift bullwheel angle; wraps every revolution
    pub bullwheel_rotation: u16,
}

impl Ride {
    fn new(id: RideId, name: String, subtype: u8) -> Self {
        Self {
            id,
            name,
            subtype,
            status: RideStatus::Closed,
            lifecycle_flags: 0,
            excitement: None,
            popularity: None,
            last_crash: None,
            track_colours: TrackColours::default(),
            value: 0,
            bullwheel_rotation: 0,
        }
    }

    pub fn has_lifecycle_flag(&self, flag: u32) -> bool {
        self.lifecycle_flags & flag != 0
    }

    pub fn set_lifecycle_flag(&mut self, flag: u32) {
        self.lifecycle_flags |= flag;
    }

    pub fn clear_lifecycle_flag(&mut self, flag: u32) {
        self.lifecycle_flags &= !flag;
    }

    pub fn is_crashed(&self) -> bool {
        self.has_lifecycle_flag(RIDE_LIFECYCLE_CRASHED)
    }

    /// Begin a testing pass. Only a closed ride can start testing.
    pub fn start_testing(&mut self) -> Result<()> {
        match self.status {
            RideStatus::Closed => {
                self.status = RideStatus::Testing;
                Ok(())
            }
            other => Err(ParkError::InvalidStatusTransition(format!(
                "cannot test a ride that is {other:?}"
            ))),
        }
    }

    /// Open to guests. Testing completes implicitly; a crashed ride must be
    /// repaired (flag cleared) first.
    pub fn open(&mut self) -> Result<()> {
        if self.is_crashed() {
            return Err(ParkError::InvalidStatusTransition(
                "cannot open a crashed ride".into(),
            ));
        }
        if self.status == RideStatus::Testing {
            self.set_lifecycle_flag(RIDE_LIFECYCLE_TESTED);
        }
        self.status = RideStatus::Open;
        Ok(())
    }

    pub fn close(&mut self) {
        self.status = RideStatus::Closed;
    }

    /// Record a crash. The ride stays formally open until closed, but the
    /// crash flag vetoes safety-related awards and custom-design credit.
    pub fn record_crash(&mut self, crash: CrashType) {
        self.last_crash = Some(crash);
        self.set_lifecycle_flag(RIDE_LIFECYCLE_CRASHED);
    }

    /// Clear crash state after repair.
    pub fn repair(&mut self) {
        self.last_crash = None;
        self.clear_lifecycle_flag(RIDE_LIFECYCLE_CRASHED);
    }
}

/// Fixed-capacity global ride table.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RideTable {
    rides: Vec<Option<Ride>>,
}

impl RideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: impl Into<String>, subtype: u8) -> Result<RideId> {
        if let Some(index) = self.rides.iter().position(|slot| slot.is_none()) {
            let id = RideId::new(index as u8);
            self.rides[index] = Some(Ride::new(id, name.into(), subtype));
            return Ok(id);
        }
        if self.rides.len() >= MAX_RIDES {
            return Err(ParkError::RegistryFull("ride table"));
        }
        let id = RideId::new(self.rides.len() as u8);
        self.rides.push(Some(Ride::new(id, name.into(), subtype)));
        Ok(id)
    }

    pub fn demolish(&mut self, id: RideId) -> Option<Ride> {
        self.rides.get_mut(id.index())?.take()
    }

    pub fn get(&self, id: RideId) -> Option<&Ride> {
        self.rides.get(id.index())?.as_ref()
    }

    pub fn get_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.rides.get_mut(id.index())?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ride> {
        self.rides.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ride> {
        self.rides.iter_mut().filter_map(|slot| slot.as_mut())
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Sum of every ride's value, the baseline for entrance-fee awards.
    pub fn total_value(&self) -> Money {
        self.iter().map(|r| r.value).sum()
    }
}
