use crate::clock::{AnimationState, ClockSet};
use crate::layout::Layout;
use crate::render::{Frame, Palette, Renderer, Surface};
use crate::style::Style;
use palette::Srgba;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    pub style: Style,
    pub dot_color: Srgba<f64>,
    pub background_color: Srgba<f64>,
    /// Pixels the indicator is lifted above the vertical center.
    pub top_padding: i32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            dot_color: Srgba::new(1.0, 0.0, 0.0, 1.0),
            background_color: Srgba::new(0.8, 0.8, 0.8, f64::from(0x44) / 255.0),
            top_padding: 0,
        }
    }
}

impl IndicatorConfig {
    pub fn palette(&self) -> Palette {
        Palette {
            dot: self.dot_color,
            background: self.background_color,
        }
    }
}

/// A ring-of-dots loading indicator. The host feeds it sizes and frame time
/// and hands it a surface to paint on; it calls back when a repaint is due.
#[derive(Debug)]
pub struct LoadingIndicator {
    config: IndicatorConfig,
    size: (i32, i32),
    layout: Layout,
    /// Timestamp of the last frame seen since the clocks were (re)started.
    last_frame: Option<Duration>,
    clocks: ClockSet,
    renderer: Renderer,
}

impl LoadingIndicator {
    pub fn new(config: IndicatorConfig, request_redraw: impl FnMut() + 'static) -> Self {
        Self {
            config,
            size: (0, 0),
            layout: Layout::default(),
            last_frame: None,
            clocks: ClockSet::new(config.style, request_redraw),
            renderer: Renderer::new(config.style),
        }
    }

    /// Replaces the configuration without starting anything. A style change
    /// swaps the renderer and restarts the clocks if they were running.
    pub fn configure(&mut self, config: IndicatorConfig) {
        let previous = std::mem::replace(&mut self.config, config);

        if previous.top_padding != config.top_padding {
            self.relayout();
        }

        if previous.style != config.style {
            log::debug!("Switching style {} -> {}", previous.style, config.style);
            let was_running = self.clocks.is_running();
            self.clocks.set_style(config.style);
            self.renderer = Renderer::new(config.style);
            if was_running {
                self.start();
            }
        }
    }

    pub fn on_size_changed(&mut self, width: i32, height: i32) {
        self.size = (width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let (width, height) = self.size;
        self.layout = Layout::resolve(width, height, self.config.top_padding);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &AnimationState {
        self.clocks.state()
    }

    pub fn clocks(&self) -> &ClockSet {
        &self.clocks
    }

    pub fn is_running(&self) -> bool {
        self.clocks.is_running()
    }

    pub fn start(&mut self) {
        self.last_frame = None;
        self.clocks.start();
    }

    pub fn stop(&mut self) {
        self.last_frame = None;
        self.clocks.stop();
    }

    /// Feeds elapsed frame time to the running clocks.
    pub fn advance(&mut self, dt: Duration) {
        self.clocks.advance(dt);
    }

    /// Advances by the gap since the previous frame timestamp. The first frame
    /// after a start or stop only records its timestamp, so time spent
    /// stopped or unmapped never reaches the clocks.
    pub fn on_frame(&mut self, frame_time: Duration) {
        if let Some(previous) = self.last_frame.replace(frame_time) {
            self.advance(frame_time.saturating_sub(previous));
        }
    }

    pub fn frame(&self) -> Frame {
        self.renderer.compose(&self.layout, self.clocks.state())
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        self.renderer.render(
            surface,
            &self.layout,
            self.clocks.state(),
            &self.config.palette(),
        )
    }
}
