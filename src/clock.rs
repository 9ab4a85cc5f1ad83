use tracing::{debug, info};

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.25;

/// Discrete changes to the animation state, each fired once per key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationCommand {
    TogglePause,
    SpeedUp,
    SlowDown,
    Reset,
}

/// Global animation time driving every procedural motion in the scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationClock {
    time: f32,
    speed: f32,
    paused: bool,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            paused: false,
        }
    }
}

impl AnimationClock {
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn apply(&mut self, command: AnimationCommand) {
        match command {
            AnimationCommand::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "animation pause toggled");
            }
            AnimationCommand::SpeedUp => self.set_speed(self.speed + SPEED_STEP),
            AnimationCommand::SlowDown => self.set_speed(self.speed - SPEED_STEP),
            AnimationCommand::Reset => {
                *self = Self::default();
                info!("animation reset");
            }
        }
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        debug!(speed = self.speed, "animation speed changed");
    }

    /// Advance by one frame of `delta` seconds unless paused
    pub fn advance(&mut self, delta: f32) {
        if !self.paused {
            self.time += delta * self.speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_scaled_by_speed() {
        let mut clock = AnimationClock::default();
        clock.advance(0.5);
        assert_eq!(clock.time(), 0.5);
        clock.apply(AnimationCommand::SpeedUp);
        clock.apply(AnimationCommand::SpeedUp);
        assert_eq!(clock.speed(), 1.5);
        clock.advance(1.0);
        assert_eq!(clock.time(), 2.0);
    }

    #[test]
    fn paused_clock_holds_time() {
        let mut clock = AnimationClock::default();
        clock.advance(1.0);
        clock.apply(AnimationCommand::TogglePause);
        assert!(clock.is_paused());
        clock.advance(3.0);
        assert_eq!(clock.time(), 1.0);
        clock.apply(AnimationCommand::TogglePause);
        clock.advance(1.0);
        assert_eq!(clock.time(), 2.0);
    }

    #[test]
    fn speed_stays_clamped() {
        let mut clock = AnimationClock::default();
        for _ in 0..100 {
            clock.apply(AnimationCommand::SpeedUp);
            assert!((MIN_SPEED..=MAX_SPEED).contains(&clock.speed()));
        }
        assert_eq!(clock.speed(), MAX_SPEED);
        for _ in 0..100 {
            clock.apply(AnimationCommand::SlowDown);
            assert!((MIN_SPEED..=MAX_SPEED).contains(&clock.speed()));
        }
        assert_eq!(clock.speed(), MIN_SPEED);
    }

    #[test]
    fn reset_restores_defaults_from_any_state() {
        let mut clock = AnimationClock::default();
        for command in [
            AnimationCommand::SpeedUp,
            AnimationCommand::SpeedUp,
            AnimationCommand::TogglePause,
        ] {
            clock.apply(command);
            clock.advance(2.0);
        }
        assert!(clock.is_paused());
        clock.apply(AnimationCommand::Reset);
        assert_eq!(clock.speed(), 1.0);
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.is_paused());
        assert_eq!(clock, AnimationClock::default());
    }
}
