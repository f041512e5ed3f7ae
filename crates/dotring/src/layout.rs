use crate::geometry::{Point, Rect, RoundRect};

pub const DEFAULT_RING_RADIUS: i32 = 100;
pub const DEFAULT_CONTAINER_SIZE: i32 = 300;
pub const CONTAINER_MARGIN: i32 = 100; // 50 on each side of the ring
pub const CORNER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub center_x: i32,
    pub center_y: i32,
    pub ring_radius: i32,
    pub container_size: i32,
}

impl Layout {
    /// Shrinks the ring when the usable area is smaller than the default
    /// container. The radius never goes negative; a degenerate area collapses
    /// every dot onto the center.
    pub fn resolve(width: i32, height: i32, top_padding: i32) -> Self {
        let height = height - top_padding;

        let radius_for = |extent: i32| {
            if extent < DEFAULT_CONTAINER_SIZE {
                extent / 2 - CONTAINER_MARGIN
            } else {
                DEFAULT_RING_RADIUS
            }
        };
        let ring_radius = radius_for(width).min(radius_for(height)).max(0);

        Self {
            center_x: width / 2,
            center_y: height / 2,
            ring_radius,
            container_size: ring_radius * 2 + CONTAINER_MARGIN,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(f64::from(self.center_x), f64::from(self.center_y))
    }

    pub fn radius(&self) -> f64 {
        f64::from(self.ring_radius)
    }

    pub fn background(&self) -> RoundRect {
        let size = f64::from(self.container_size);
        RoundRect {
            rect: Rect::centered(self.center(), size, size),
            corner_radius: CORNER_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_area_uses_default_radius() {
        let layout = Layout::resolve(800, 600, 0);
        assert_eq!(
            layout,
            Layout {
                center_x: 400,
                center_y: 300,
                ring_radius: DEFAULT_RING_RADIUS,
                container_size: 300,
            }
        );
    }

    #[test]
    fn test_small_dimension_shrinks_radius() {
        // 280 wide: 280 / 2 - 100 = 40, height is large enough
        let layout = Layout::resolve(280, 500, 0);
        assert_eq!(layout.ring_radius, 40);
        assert_eq!(layout.container_size, 180);

        let layout = Layout::resolve(500, 260, 0);
        assert_eq!(layout.ring_radius, 30);
    }

    #[test]
    fn test_degenerate_area_yields_zero_radius() {
        for (w, h) in [(0, 0), (150, 150), (199, 1000), (-20, -20)] {
            let layout = Layout::resolve(w, h, 0);
            assert_eq!(layout.ring_radius, 0, "size {w}x{h}");
            assert_eq!(layout.container_size, CONTAINER_MARGIN);
        }
    }

    #[test]
    fn test_top_padding_shrinks_usable_height() {
        let layout = Layout::resolve(400, 400, 120);
        assert_eq!(layout.center_y, 140);
        assert_eq!(layout.ring_radius, 40);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for (w, h) in [(0, 0), (250, 250), (300, 300), (1920, 1080)] {
            assert_eq!(Layout::resolve(w, h, 0), Layout::resolve(w, h, 0));
        }
    }

    #[test]
    fn test_background_is_centered_container() {
        let layout = Layout::resolve(400, 400, 0);
        let bg = layout.background();
        assert_eq!(bg.rect.center(), layout.center());
        assert_eq!(bg.rect.width, 300.0);
        assert_eq!(bg.corner_radius, CORNER_RADIUS);
    }
}
