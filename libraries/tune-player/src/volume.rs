//! Volume level with mute toggling
//!
//! The level is a linear gain in [0.0, 1.0], handed to the media element
//! unchanged. Muting is expressed through the level itself (0.0 = muted).

use crate::types::MuteBehavior;

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Level to restore on unmute (RestorePrevious only)
    restore_level: Option<f32>,

    behavior: MuteBehavior,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0-1.0, clamped)
    /// * `behavior` - What toggling mute does
    pub fn new(level: f32, behavior: MuteBehavior) -> Self {
        Self {
            level: sanitize(level).unwrap_or(1.0),
            restore_level: None,
            behavior,
        }
    }

    /// Set volume level (0.0-1.0)
    ///
    /// Out-of-range values are clamped, NaN is ignored. Returns whether the
    /// level changed.
    pub fn set_level(&mut self, level: f32) -> bool {
        let Some(level) = sanitize(level) else {
            return false;
        };
        self.restore_level = None;
        let changed = level != self.level;
        self.level = level;
        changed
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    ///
    /// With [`MuteBehavior::Toggle`] a level of exactly 0 becomes 1 and any
    /// other level becomes 0, so the pre-mute level is lost.
    pub fn toggle_mute(&mut self) {
        if self.level == 0.0 {
            self.level = match self.behavior {
                MuteBehavior::Toggle => 1.0,
                MuteBehavior::RestorePrevious => self.restore_level.take().unwrap_or(1.0),
            };
        } else {
            if self.behavior == MuteBehavior::RestorePrevious {
                self.restore_level = Some(self.level);
            }
            self.level = 0.0;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0, MuteBehavior::Toggle)
    }
}

fn sanitize(level: f32) -> Option<f32> {
    if level.is_nan() {
        None
    } else {
        Some(level.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.8, MuteBehavior::Toggle);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::default();
        assert!(vol.set_level(0.5));
        assert_eq!(vol.level(), 0.5);

        // Clamp to range
        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);
        vol.set_level(-0.2);
        assert_eq!(vol.level(), 0.0);

        // Same value is not a change
        assert!(!vol.set_level(0.0));
    }

    #[test]
    fn nan_is_ignored() {
        let mut vol = Volume::new(0.4, MuteBehavior::Toggle);
        assert!(!vol.set_level(f32::NAN));
        assert_eq!(vol.level(), 0.4);

        let vol = Volume::new(f32::NAN, MuteBehavior::Toggle);
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn toggle_mute_loses_previous_level() {
        let mut vol = Volume::new(0.3, MuteBehavior::Toggle);
        vol.toggle_mute();
        assert_eq!(vol.level(), 0.0);
        assert!(vol.is_muted());

        vol.toggle_mute();
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn toggle_mute_is_involution_at_one() {
        let mut vol = Volume::new(1.0, MuteBehavior::Toggle);
        vol.toggle_mute();
        vol.toggle_mute();
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn restore_previous_remembers_level() {
        let mut vol = Volume::new(0.3, MuteBehavior::RestorePrevious);
        vol.toggle_mute();
        assert!(vol.is_muted());

        vol.toggle_mute();
        assert_eq!(vol.level(), 0.3);
    }

    #[test]
    fn restore_previous_falls_back_to_full_volume() {
        // Muted by dragging the slider to zero, nothing to restore
        let mut vol = Volume::new(0.6, MuteBehavior::RestorePrevious);
        vol.set_level(0.0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn manual_level_discards_remembered_level() {
        let mut vol = Volume::new(0.3, MuteBehavior::RestorePrevious);
        vol.toggle_mute();
        vol.set_level(0.0);
        vol.toggle_mute();
        assert_eq!(vol.level(), 1.0);
    }
}
