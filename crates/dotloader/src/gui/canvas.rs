use cairo::Context;
use dotring::geometry::{Point, RoundRect};
use dotring::render::Surface;
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};

/// Paints indicator frames onto a cairo context.
pub struct CairoSurface<'a> {
    cr: &'a Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn fill_round_rect(
        &mut self,
        shape: &RoundRect,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let RoundRect {
            rect,
            corner_radius,
        } = *shape;
        let radius = corner_radius.min(rect.width / 2.0).min(rect.height / 2.0);
        let (left, top) = (rect.origin.x, rect.origin.y);
        let (right, bottom) = (left + rect.width, top + rect.height);

        self.set_color(color);
        self.cr.new_sub_path();
        self.cr.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
        self.cr.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        self.cr.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
        self.cr.arc(left + radius, top + radius, radius, PI, 3.0 * FRAC_PI_2);
        self.cr.close_path();
        self.cr.fill()
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.new_sub_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }
}
