//! Park climate state
//!
//! Only the pieces the simulation core reads: the current weather band and
//! whether it counts as rain for plant watering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weather {
    Sunny = 0,
    PartiallyCloudy = 1,
    Cloudy = 2,
    Rain = 3,
    HeavyRain = 4,
    Thunder = 5,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climate {
    pub current_weather: Weather,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            current_weather: Weather::Sunny,
        }
    }
}

impl Climate {
    /// Rain or anything heavier waters plants.
    pub fn is_raining(&self) -> bool {
        self.current_weather >= Weather::Rain
    }
}
