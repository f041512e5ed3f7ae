use crate::style::{DEGREES_PER_DOT, DOT_COUNT, Style};
use std::fmt;
use std::time::Duration;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

pub const ROTATION_RANGE: (i32, i32) = (0, 360);
pub const PULSE_RANGE: (i32, i32) = (0, 15);
pub const SWEEP_RANGE: (i32, i32) = (0, 30);

/// Invoked whenever visible state changes. The host coalesces these into paints.
pub type RedrawCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub value: i32,
    /// Repeat boundaries crossed since the previous tick.
    pub repeats: u32,
}

/// Linear ramp from `from` to `to` over `period`, repeating forever and
/// restarting at `from` on every repeat.
#[derive(Debug, Clone)]
pub struct LinearClock {
    from: i32,
    to: i32,
    period: Duration,
    elapsed: Duration,
}

impl LinearClock {
    pub fn new((from, to): (i32, i32), period: Duration) -> Self {
        Self {
            from,
            to,
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> ClockTick {
        if self.period.is_zero() {
            return ClockTick {
                value: self.from,
                repeats: 0,
            };
        }

        let total = self.elapsed.as_nanos() + dt.as_nanos();
        let period = self.period.as_nanos();
        let repeats = u32::try_from(total / period).unwrap_or(u32::MAX);
        self.elapsed = Duration::from_nanos((total % period) as u64);

        ClockTick {
            value: self.value(),
            repeats,
        }
    }

    /// Truncated linear interpolation, always in `[from, to)`.
    pub fn value(&self) -> i32 {
        if self.period.is_zero() {
            return self.from;
        }
        let span = i128::from(self.to - self.from);
        let progressed = self.elapsed.as_nanos() as i128 * span / self.period.as_nanos() as i128;
        self.from + progressed as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum ClockRole {
    /// Rotation offset, stepping and direction reversal.
    Primary,
    /// Radius growth of the active dot.
    Pulse,
    /// Angular nudge for the sweep styles.
    Sweep,
}

impl ClockRole {
    fn clock_for(self, style: Style) -> LinearClock {
        match self {
            Self::Primary => LinearClock::new(ROTATION_RANGE, style.cycle_duration()),
            Self::Pulse => LinearClock::new(PULSE_RANGE, style.step_duration()),
            Self::Sweep => LinearClock::new(SWEEP_RANGE, style.step_duration()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    pub rotation_offset: i32,
    pub active_index: usize,
    pub reversed: bool,
    pub radius_pulse: i32,
    pub sweep_offset: i32,
}

impl AnimationState {
    pub fn index_for(rotation_offset: i32) -> usize {
        (rotation_offset / DEGREES_PER_DOT).rem_euclid(DOT_COUNT as i32) as usize
    }
}

/// At most one live clock per role. Clocks are created on start and dropped on
/// stop, so nothing ticks after `stop` returns.
pub struct ClockSet {
    style: Style,
    clocks: [Option<LinearClock>; ClockRole::COUNT],
    state: AnimationState,
    redraw: RedrawCallback,
}

impl fmt::Debug for ClockSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockSet")
            .field("style", &self.style)
            .field("clocks", &self.clocks)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ClockSet {
    pub fn new(style: Style, redraw: impl FnMut() + 'static) -> Self {
        Self {
            style,
            clocks: Default::default(),
            state: AnimationState::default(),
            redraw: Box::new(redraw),
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Stops everything; the caller restarts if needed.
    pub fn set_style(&mut self, style: Style) {
        self.stop();
        self.style = style;
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.clocks.iter().any(Option::is_some)
    }

    pub fn is_clock_running(&self, role: ClockRole) -> bool {
        self.clocks[role as usize].is_some()
    }

    pub fn running_clocks(&self) -> usize {
        self.clocks.iter().flatten().count()
    }

    /// Starts every clock the style needs from zero. A clock that is already
    /// running is replaced rather than duplicated.
    pub fn start(&mut self) {
        self.state = AnimationState::default();
        for &role in self.style.clock_roles() {
            let slot = &mut self.clocks[role as usize];
            if slot.is_some() {
                log::debug!("Restarting {:?} clock", role);
            } else {
                log::debug!("Starting {:?} clock for style {}", role, self.style);
            }
            *slot = Some(role.clock_for(self.style));
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Stopping {} clocks", self.running_clocks());
        }
        self.clocks = Default::default();
        self.state = AnimationState::default();
    }

    pub fn advance(&mut self, dt: Duration) {
        for role in ClockRole::iter() {
            let Some(clock) = self.clocks[role as usize].as_mut() else {
                continue;
            };
            let tick = clock.advance(dt);
            self.apply(role, tick);
        }
    }

    fn apply(&mut self, role: ClockRole, tick: ClockTick) {
        match role {
            ClockRole::Primary => {
                let flipped = tick.repeats % 2 == 1;
                if flipped {
                    self.state.reversed = !self.state.reversed;
                }
                self.state.rotation_offset = tick.value;

                if self.style.is_continuous() {
                    (self.redraw)();
                    return;
                }

                let index = AnimationState::index_for(tick.value);
                if index != self.state.active_index || flipped {
                    self.state.active_index = index;
                    (self.redraw)();
                }
            }
            ClockRole::Pulse => {
                self.state.radius_pulse = tick.value;
                (self.redraw)();
            }
            ClockRole::Sweep => {
                self.state.sweep_offset = tick.value;
                (self.redraw)();
            }
        }
    }
}
