//! Interaction state: clock, camera mode, pointer, ring visibility.
//!
//! Mutated only through the handler methods below; `SolarSystem::update`
//! reads it once per tick.

use glam::Vec2;
use orrery_engine::SimClock;

/// Camera-mode selector codes as sent by the host.
pub const MODE_ORBIT: u32 = 0;
pub const MODE_TOP: u32 = 1;
pub const MODE_FOLLOW: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Slow circle around the sun with a vertical bob.
    Orbit,
    /// Straight down from above.
    Top,
    /// Trail a planet. `None` until a planet has been picked.
    Follow { target: Option<usize> },
}

impl CameraMode {
    pub fn code(&self) -> u32 {
        match self {
            CameraMode::Orbit => MODE_ORBIT,
            CameraMode::Top => MODE_TOP,
            CameraMode::Follow { .. } => MODE_FOLLOW,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub clock: SimClock,
    mode: CameraMode,
    /// Last planet chosen in the follow selector, kept across mode switches.
    follow_choice: Option<usize>,
    /// Pointer in normalized device coordinates.
    pointer: Vec2,
    show_orbits: bool,
    body_count: usize,
}

impl SimulationState {
    pub fn new(base_step: f64, initial_speed: f64, body_count: usize) -> Self {
        let mut clock = SimClock::new(base_step);
        if !clock.set_speed(initial_speed) {
            log::warn!("initial speed {initial_speed} rejected, keeping {}", clock.speed());
        }
        Self {
            clock,
            mode: CameraMode::Orbit,
            follow_choice: None,
            pointer: Vec2::ZERO,
            show_orbits: true,
            body_count,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    /// Speed slider readout, e.g. "1.5x".
    pub fn speed_readout(&self) -> String {
        format!("{:.1}x", self.clock.speed())
    }

    /// The follow-target selector is only shown in follow mode.
    pub fn follow_selector_visible(&self) -> bool {
        matches!(self.mode, CameraMode::Follow { .. })
    }

    // ── Handlers ─────────────────────────────────────────────────────

    /// Speed slider moved. Negative values clamp to zero.
    /// Returns false when the value was ignored.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !self.clock.set_speed(speed) {
            log::warn!("ignoring non-finite speed {speed}");
            return false;
        }
        true
    }

    /// Camera-mode selector changed. Entering follow restores the
    /// remembered target. Unknown codes are ignored.
    pub fn set_camera_mode(&mut self, code: u32) -> bool {
        self.mode = match code {
            MODE_ORBIT => CameraMode::Orbit,
            MODE_TOP => CameraMode::Top,
            MODE_FOLLOW => CameraMode::Follow { target: self.follow_choice },
            other => {
                log::warn!("ignoring unknown camera mode {other}");
                return false;
            }
        };
        true
    }

    /// Follow-target selector changed. Takes effect immediately in follow mode.
    pub fn set_follow_target(&mut self, index: usize) -> bool {
        if index >= self.body_count {
            log::warn!("ignoring follow target {index}, only {} planets", self.body_count);
            return false;
        }
        self.follow_choice = Some(index);
        if let CameraMode::Follow { target } = &mut self.mode {
            *target = Some(index);
        }
        true
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    pub fn set_pointer(&mut self, ndc: Vec2) {
        if ndc.is_finite() {
            self.pointer = ndc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SimulationState {
        SimulationState::new(0.005, 1.0, 8)
    }

    #[test]
    fn initial_state() {
        let s = state();
        assert_eq!(s.mode(), CameraMode::Orbit);
        assert_eq!(s.speed(), 1.0);
        assert!(s.show_orbits());
        assert!(!s.follow_selector_visible());
        assert_eq!(s.pointer(), Vec2::ZERO);
        assert_eq!(s.speed_readout(), "1.0x");
    }

    #[test]
    fn speed_readout_one_decimal() {
        let mut s = state();
        assert!(s.set_speed(2.34));
        assert_eq!(s.speed_readout(), "2.3x");
        assert!(s.set_speed(0.0));
        assert_eq!(s.speed_readout(), "0.0x");
    }

    #[test]
    fn negative_speed_clamps_nan_ignored() {
        let mut s = state();
        assert!(s.set_speed(-3.0));
        assert_eq!(s.speed(), 0.0);
        s.set_speed(1.5);
        assert!(!s.set_speed(f64::NAN));
        assert_eq!(s.speed(), 1.5);
    }

    #[test]
    fn follow_without_choice_has_no_target() {
        let mut s = state();
        assert!(s.set_camera_mode(MODE_FOLLOW));
        assert_eq!(s.mode(), CameraMode::Follow { target: None });
        assert!(s.follow_selector_visible());
    }

    #[test]
    fn follow_target_remembered_across_modes() {
        let mut s = state();
        assert!(s.set_follow_target(3));
        // Choosing a target outside follow mode does not switch modes.
        assert_eq!(s.mode(), CameraMode::Orbit);

        s.set_camera_mode(MODE_FOLLOW);
        assert_eq!(s.mode(), CameraMode::Follow { target: Some(3) });

        s.set_camera_mode(MODE_TOP);
        assert!(!s.follow_selector_visible());
        s.set_camera_mode(MODE_FOLLOW);
        assert_eq!(s.mode(), CameraMode::Follow { target: Some(3) });
    }

    #[test]
    fn follow_target_switches_live() {
        let mut s = state();
        s.set_camera_mode(MODE_FOLLOW);
        s.set_follow_target(5);
        assert_eq!(s.mode(), CameraMode::Follow { target: Some(5) });
    }

    #[test]
    fn bad_inputs_ignored() {
        let mut s = state();
        assert!(!s.set_camera_mode(7));
        assert_eq!(s.mode(), CameraMode::Orbit);
        assert!(!s.set_follow_target(8));
        s.set_camera_mode(MODE_FOLLOW);
        assert_eq!(s.mode(), CameraMode::Follow { target: None });
    }

    #[test]
    fn mode_codes() {
        assert_eq!(CameraMode::Orbit.code(), 0);
        assert_eq!(CameraMode::Top.code(), 1);
        assert_eq!(CameraMode::Follow { target: Some(1) }.code(), 2);
    }
}
