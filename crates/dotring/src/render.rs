use crate::clock::AnimationState;
use crate::geometry::{Point, RoundRect};
use crate::layout::Layout;
use crate::style::{DEGREES_PER_DOT, DOT_COUNT, DOT_RADIUS, Style};
use palette::Srgba;

/// Drawing capability provided by the host.
pub trait Surface {
    type Error;

    fn fill_round_rect(&mut self, shape: &RoundRect, color: Srgba<f64>) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub dot: Srgba<f64>,
    pub background: Srgba<f64>,
}

/// Where a dot sits on the ring and how it is drawn, before layout is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotPose {
    pub angle: i32,
    pub radius: f64,
    pub visible: bool,
}

impl DotPose {
    fn resting(index: usize) -> Self {
        Self {
            angle: base_angle(index),
            radius: DOT_RADIUS,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: RoundRect,
    pub dots: Vec<Dot>,
}

impl Frame {
    pub fn visible_indices(&self) -> Vec<usize> {
        self.dots
            .iter()
            .filter(|d| d.visible)
            .map(|d| d.index)
            .collect()
    }
}

pub type DotRule = fn(usize, &AnimationState) -> DotPose;

fn base_angle(index: usize) -> i32 {
    index as i32 * DEGREES_PER_DOT
}

/// Vanishing forward, then appearing forward once the cycle reverses.
fn sequential_visible(index: usize, state: &AnimationState) -> bool {
    if state.reversed {
        index < state.active_index
    } else {
        index >= state.active_index
    }
}

fn rotate(index: usize, state: &AnimationState) -> DotPose {
    DotPose {
        angle: base_angle(index) + state.rotation_offset,
        ..DotPose::resting(index)
    }
}

fn scale_step(index: usize, state: &AnimationState) -> DotPose {
    let mut pose = DotPose::resting(index);
    if index == state.active_index {
        pose.radius = DOT_RADIUS * 2.0;
    }
    pose
}

fn scale_pulse(index: usize, state: &AnimationState) -> DotPose {
    let mut pose = DotPose::resting(index);
    if index == state.active_index {
        pose.radius = DOT_RADIUS + f64::from(state.radius_pulse);
    }
    pose
}

fn sequential(index: usize, state: &AnimationState) -> DotPose {
    DotPose {
        visible: sequential_visible(index, state),
        ..DotPose::resting(index)
    }
}

fn sequential_sweep(index: usize, state: &AnimationState) -> DotPose {
    DotPose {
        angle: base_angle(index) + state.sweep_offset,
        visible: sequential_visible(index, state),
        ..DotPose::resting(index)
    }
}

// The reversed bound is inclusive here, so the active dot shows while
// reappearing. Sequential and SequentialSweep keep it exclusive.
fn sequential_sweep_active(index: usize, state: &AnimationState) -> DotPose {
    let active = index == state.active_index;
    let visible = if state.reversed {
        index <= state.active_index
    } else {
        index >= state.active_index
    };
    DotPose {
        angle: base_angle(index) + if active { state.sweep_offset } else { 0 },
        radius: DOT_RADIUS,
        visible,
    }
}

impl Style {
    pub fn dot_rule(&self) -> DotRule {
        match self {
            Self::Rotate => rotate,
            Self::ScaleStep => scale_step,
            Self::ScalePulse => scale_pulse,
            Self::Sequential => sequential,
            Self::SequentialSweep => sequential_sweep,
            Self::SequentialSweepActive => sequential_sweep_active,
        }
    }
}

/// Turns layout and animation state into draw calls. The dot rule is picked
/// once, when the renderer is built for a style.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    rule: DotRule,
}

impl Renderer {
    pub fn new(style: Style) -> Self {
        Self {
            rule: style.dot_rule(),
        }
    }

    pub fn compose(&self, layout: &Layout, state: &AnimationState) -> Frame {
        let center = layout.center();
        let ring_radius = layout.radius();

        let dots = (0..DOT_COUNT)
            .map(|index| {
                let pose = (self.rule)(index, state);
                Dot {
                    index,
                    center: center.on_ring(ring_radius, pose.angle),
                    radius: pose.radius,
                    visible: pose.visible,
                }
            })
            .collect();

        Frame {
            background: layout.background(),
            dots,
        }
    }

    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        layout: &Layout,
        state: &AnimationState,
        palette: &Palette,
    ) -> Result<(), S::Error> {
        let frame = self.compose(layout, state);
        draw_frame(surface, &frame, palette)
    }
}

pub fn draw_frame<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    palette: &Palette,
) -> Result<(), S::Error> {
    surface.fill_round_rect(&frame.background, palette.background)?;
    for dot in frame.dots.iter().filter(|d| d.visible) {
        surface.fill_circle(dot.center, dot.radius, palette.dot)?;
    }
    Ok(())
}
