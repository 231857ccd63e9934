//! Pulse animation state for the highlighted marker.
//!
//! | Quantity | Rule |
//! |----------|------|
//! | radius | triangle wave between 10 and 16, ±0.15 per frame, starts at 12 growing |
//! | opacity | `0.7 + sin(ticks × 0.05) × 0.3` |
//! | ticks | +2 per frame |
//! | ripple radius | `20 + (ticks mod 100) × 0.5` |
//! | ripple opacity | `max(0, 1 − (ticks mod 100) / 100) × 0.5` |
//! | glow | `15 + (radius − 12) × 2` |

pub const PULSE_START_RADIUS: f64 = 12.0;
pub const PULSE_MIN_RADIUS: f64 = 10.0;
pub const PULSE_MAX_RADIUS: f64 = 16.0;
pub const PULSE_STEP: f64 = 0.15;
pub const TICKS_PER_FRAME: u64 = 2;
pub const RIPPLE_PERIOD: u32 = 100;

const OPACITY_BASE: f64 = 0.7;
const OPACITY_SWING: f64 = 0.3;
const OPACITY_RATE: f64 = 0.05;
const RIPPLE_BASE_RADIUS: f64 = 20.0;
const RIPPLE_GROWTH: f64 = 0.5;
const RIPPLE_MAX_OPACITY: f64 = 0.5;
const GLOW_BASE: f64 = 15.0;
const GLOW_GAIN: f64 = 2.0;
const INNER_RATIO: f64 = 0.6;

/// Animation state of the active marker. Reset whenever the active entity changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseAnimation {
    radius: f64,
    growing: bool,
    opacity: f64,
    ticks: u64,
    /// `ticks mod RIPPLE_PERIOD`, kept separately so the ripple never skips a phase.
    ripple: u32,
}

impl Default for PulseAnimation {
    fn default() -> Self {
        Self {
            radius: PULSE_START_RADIUS,
            growing: true,
            opacity: 1.0,
            ticks: 0,
            ripple: 0,
        }
    }
}

impl PulseAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        if self.growing {
            self.radius += PULSE_STEP;
            if self.radius >= PULSE_MAX_RADIUS {
                self.growing = false;
            }
        } else {
            self.radius -= PULSE_STEP;
            if self.radius <= PULSE_MIN_RADIUS {
                self.growing = true;
            }
        }

        self.opacity = OPACITY_BASE + (self.ticks as f64 * OPACITY_RATE).sin() * OPACITY_SWING;
        self.ticks = self.ticks.saturating_add(TICKS_PER_FRAME);
        self.ripple = (self.ripple + TICKS_PER_FRAME as u32) % RIPPLE_PERIOD;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn inner_radius(&self) -> f64 {
        self.radius * INNER_RATIO
    }

    pub fn glow(&self) -> f64 {
        GLOW_BASE + (self.radius - PULSE_START_RADIUS) * GLOW_GAIN
    }

    pub fn ripple_radius(&self) -> f64 {
        RIPPLE_BASE_RADIUS + self.ripple as f64 * RIPPLE_GROWTH
    }

    pub fn ripple_opacity(&self) -> f64 {
        let age = self.ripple as f64 / RIPPLE_PERIOD as f64;
        (1.0 - age).max(0.0) * RIPPLE_MAX_OPACITY
    }
}
