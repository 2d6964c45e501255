//! Day/night cycle
//!
//! Game time is kept in minutes since midnight and runs 2.2x faster than
//! wall time. Sky colour and light levels step through a fixed phase table.

use std::fmt;

use glam::Vec3;
use serde::Serialize;

use crate::consts::DAY_MINUTES;

/// Part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPhase {
    Morning,
    Day,
    Evening,
    Sunset,
    Night,
}

/// Scene lighting for a phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lighting {
    pub sky_color: u32,
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

impl DayPhase {
    /// Phase covering `minutes` since midnight
    pub fn at(minutes: f32) -> Self {
        const MORNING: f32 = 5.5 * 60.0;
        const DAY: f32 = 6.5 * 60.0;
        const EVENING: f32 = 17.0 * 60.0;
        const SUNSET: f32 = 20.33 * 60.0;
        const NIGHT: f32 = 20.67 * 60.0;

        if (MORNING..DAY).contains(&minutes) {
            DayPhase::Morning
        } else if (DAY..EVENING).contains(&minutes) {
            DayPhase::Day
        } else if (EVENING..SUNSET).contains(&minutes) {
            DayPhase::Evening
        } else if (SUNSET..NIGHT).contains(&minutes) {
            DayPhase::Sunset
        } else {
            DayPhase::Night
        }
    }

    pub fn lighting(self) -> Lighting {
        let (sky_color, sun_intensity, ambient_intensity) = match self {
            DayPhase::Morning => (0xffa07a, 0.5, 0.3),
            DayPhase::Day => (0x87ceeb, 0.7, 0.5),
            DayPhase::Evening => (0xffa500, 0.5, 0.3),
            DayPhase::Sunset => (0xff4500, 0.3, 0.2),
            DayPhase::Night => (0x191970, 0.1, 0.1),
        };
        Lighting {
            sky_color,
            sun_intensity,
            ambient_intensity,
        }
    }
}

/// Parse an `HH:MM` clock string into minutes since midnight
pub fn parse_clock(text: &str) -> Option<f32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some((hours * 60 + minutes) as f32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayClock {
    minutes: f32,
    time_scale: f32,
}

impl DayClock {
    pub fn new(start_minutes: f32, time_scale: f32) -> Self {
        let mut clock = Self {
            minutes: 0.0,
            time_scale,
        };
        clock.set_minutes(start_minutes);
        clock
    }

    pub fn minutes(&self) -> f32 {
        self.minutes
    }

    /// Set the time of day, wrapped onto `[0, DAY_MINUTES)`
    pub fn set_minutes(&mut self, minutes: f32) {
        let wrapped = minutes.rem_euclid(DAY_MINUTES);
        // Tiny negatives round up to DAY_MINUTES itself
        self.minutes = if wrapped.is_finite() && wrapped < DAY_MINUTES {
            wrapped
        } else {
            0.0
        };
    }

    /// Jump to an `HH:MM` time. Returns false on malformed input.
    pub fn set_from_str(&mut self, text: &str) -> bool {
        match parse_clock(text) {
            Some(minutes) => {
                self.set_minutes(minutes);
                true
            }
            None => false,
        }
    }

    /// Advance by `dt` real seconds
    pub fn advance(&mut self, dt: f32) {
        self.set_minutes(self.minutes + dt * self.time_scale);
    }

    pub fn phase(&self) -> DayPhase {
        DayPhase::at(self.minutes)
    }

    pub fn lighting(&self) -> Lighting {
        self.phase().lighting()
    }

    /// Sun on a circle in the XY plane; rises at 06:00, peaks at noon
    pub fn sun_position(&self, distance: f32) -> Vec3 {
        use std::f32::consts::{FRAC_PI_2, TAU};
        let angle = (self.minutes / DAY_MINUTES) * TAU - FRAC_PI_2;
        Vec3::new(angle.cos() * distance, angle.sin() * distance, 0.0)
    }
}

impl fmt::Display for DayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.minutes.floor() as u32;
        write!(f, "{:02}:{:02}", whole / 60, whole % 60)
    }
}
