#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self`, `degrees` measured clockwise from
    /// straight up (screen coordinates, y grows downward).
    pub fn on_ring(self, radius: f64, degrees: i32) -> Self {
        let angle = f64::from(degrees).to_radians();
        Self::new(self.x + radius * angle.sin(), self.y - radius * angle.cos())
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundRect {
    pub rect: Rect,
    pub corner_radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-9,
            "{actual:?} is not near {expected:?}"
        );
    }

    #[test]
    fn test_on_ring_quarter_turns() {
        let center = Point::new(150.0, 150.0);
        assert_near(center.on_ring(100.0, 0), Point::new(150.0, 50.0));
        assert_near(center.on_ring(100.0, 90), Point::new(250.0, 150.0));
        assert_near(center.on_ring(100.0, 180), Point::new(150.0, 250.0));
        assert_near(center.on_ring(100.0, 270), Point::new(50.0, 150.0));
    }

    #[test]
    fn test_zero_radius_collapses_to_center() {
        let center = Point::new(12.0, 34.0);
        assert_near(center.on_ring(0.0, 123), center);
    }

    #[test]
    fn test_centered_rect() {
        let rect = Rect::centered(Point::new(100.0, 80.0), 40.0, 20.0);
        assert_eq!(rect.origin, Point::new(80.0, 70.0));
        assert_eq!(rect.center(), Point::new(100.0, 80.0));
    }
}
