//! Progress ring geometry.
//!
//! Maps a progress fraction onto the primitives of the countdown ring: two
//! decorative full rings, the progress arc and the indicator dot. Everything
//! here is pure math in surface units; rasterization lives in
//! [`crate::canvas`].
//!
//! Angles use the on-screen convention: 0° points along +x (three o'clock) and
//! angles grow clockwise because the y axis points down. The dot starts at the
//! top (270°) and travels counter-clockwise as progress grows; the arc always
//! starts at the top and sweeps towards the dot.
//!
//! ```rust
//! use ring_timer::geometry::{plan, Size};
//!
//! let plan = plan(0.25, Size::new(40.0, 40.0));
//! assert_eq!(plan.dot_angle_degrees, 180.0);
//! assert_eq!(plan.arc.sweep_degrees, -90.0);
//! assert_eq!(plan.radius, 20.0);
//! ```

/// Stroke width of the neutral background ring.
pub const BACKGROUND_STROKE: f32 = 2.4;
/// Stroke width of the contrasting inner ring, thinner than the background.
pub const INNER_STROKE: f32 = 1.2;
/// Stroke width of the progress arc.
pub const ARC_STROKE: f32 = 1.2;
/// Radius of the filled indicator dot.
pub const DOT_RADIUS: f32 = 1.1;
/// Angle at which the arc starts and the dot rests at zero progress.
pub const START_ANGLE: f32 = 270.0;

/// Width and height of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Horizontal extent in surface units.
    pub width: f32,
    /// Vertical extent in surface units.
    pub height: f32,
}

impl Size {
    /// Creates a new surface size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

/// Color role of a primitive. The palette decides the actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Background ring.
    Neutral,
    /// Inner ring, drawn over the background ring.
    Contrast,
    /// Progress arc and indicator dot.
    Accent,
}

/// A stroked full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Center of the circle.
    pub center: Point,
    /// Radius of the stroke's center line.
    pub radius: f32,
    /// Stroke width.
    pub stroke: f32,
    /// Color role.
    pub tone: Tone,
}

impl Ring {
    /// Reports whether `distance` from the center falls within the stroke.
    pub fn covers(&self, distance: f32) -> bool {
        (distance - self.radius).abs() <= self.stroke / 2.0
    }
}

/// A stroked arc starting at `start_degrees` and sweeping by `sweep_degrees`.
///
/// A negative sweep runs counter-clockwise on screen. A sweep of magnitude
/// 360° or more is a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Center of the arc's circle.
    pub center: Point,
    /// Radius of the stroke's center line.
    pub radius: f32,
    /// Start angle in degrees.
    pub start_degrees: f32,
    /// Signed sweep in degrees.
    pub sweep_degrees: f32,
    /// Stroke width.
    pub stroke: f32,
    /// Color role.
    pub tone: Tone,
}

impl Arc {
    /// Reports whether the on-screen angle `degrees` lies within the sweep.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ring_timer::geometry::{plan, Size};
    ///
    /// let arc = plan(0.25, Size::new(10.0, 10.0)).arc;
    /// assert!(arc.contains_angle(225.0));
    /// assert!(!arc.contains_angle(90.0));
    /// ```
    pub fn contains_angle(&self, degrees: f32) -> bool {
        let span = self.sweep_degrees.abs();
        if span == 0.0 {
            return false;
        }
        if span >= 360.0 {
            return true;
        }

        let offset = if self.sweep_degrees < 0.0 {
            (self.start_degrees - degrees).rem_euclid(360.0)
        } else {
            (degrees - self.start_degrees).rem_euclid(360.0)
        };
        offset <= span
    }
}

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Center of the dot.
    pub center: Point,
    /// Radius of the dot.
    pub radius: f32,
    /// Color role.
    pub tone: Tone,
}

impl Dot {
    /// Reports whether `point` is inside the dot.
    pub fn covers(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

/// Everything needed to draw the ring for one progress value, in draw order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPlan {
    /// Center of the ring.
    pub center: Point,
    /// Ring radius: half of the smaller surface dimension.
    pub radius: f32,
    /// Decorative baseline ring.
    pub background: Ring,
    /// Decorative ring drawn over the background.
    pub inner: Ring,
    /// Elapsed-time arc.
    pub arc: Arc,
    /// Indicator dot at the head of the arc.
    pub dot: Dot,
    /// Angle of the indicator dot, `(270 - 360 * progress) % 360`.
    ///
    /// The remainder is truncating, so past three quarters the value is
    /// negative and full progress gives -90 rather than 270. Normalize with
    /// `rem_euclid(360.0)` before comparing positions.
    pub dot_angle_degrees: f32,
}

impl DrawPlan {
    /// Builds the draw plan for `progress` on a surface of `size`.
    ///
    /// The radius is the smaller of the half-width and half-height, so the
    /// ring fits any aspect ratio without clipping.
    pub fn new(progress: f32, size: Size) -> Self {
        let center = Point {
            x: size.width / 2.0,
            y: size.height / 2.0,
        };
        let radius = center.x.min(center.y);
        let dot_angle = dot_angle_degrees(progress);
        let radians = dot_angle.to_radians();

        Self {
            center,
            radius,
            background: Ring {
                center,
                radius,
                stroke: BACKGROUND_STROKE,
                tone: Tone::Neutral,
            },
            inner: Ring {
                center,
                radius,
                stroke: INNER_STROKE,
                tone: Tone::Contrast,
            },
            arc: Arc {
                center,
                radius,
                start_degrees: START_ANGLE,
                sweep_degrees: arc_sweep_degrees(progress),
                stroke: ARC_STROKE,
                tone: Tone::Accent,
            },
            dot: Dot {
                center: Point {
                    x: center.x + radius * radians.cos(),
                    y: center.y + radius * radians.sin(),
                },
                radius: DOT_RADIUS,
                tone: Tone::Accent,
            },
            dot_angle_degrees: dot_angle,
        }
    }

    /// Center of the indicator dot.
    pub fn dot_center(&self) -> Point {
        self.dot.center
    }
}

/// Shorthand for [`DrawPlan::new`].
pub fn plan(progress: f32, size: Size) -> DrawPlan {
    DrawPlan::new(progress, size)
}

/// Angle of the indicator dot for `progress`.
///
/// Uses the truncating remainder, so the result keeps the sign of
/// `270 - 360 * progress`: past three quarters the angle goes negative and
/// `progress = 1.0` yields -90°, the same position as 270°.
pub fn dot_angle_degrees(progress: f32) -> f32 {
    (START_ANGLE - 360.0 * progress) % 360.0
}

/// Signed sweep of the progress arc, `dot_angle - 270`.
pub fn arc_sweep_degrees(progress: f32) -> f32 {
    dot_angle_degrees(progress) - START_ANGLE
}

/// On-screen angle of `point` around `center`, normalized to `[0, 360)`.
pub fn angle_of(center: Point, point: Point) -> f32 {
    (point.y - center.y)
        .atan2(point.x - center.x)
        .to_degrees()
        .rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn square() -> Size {
        Size::new(100.0, 100.0)
    }

    #[test]
    fn test_zero_progress_rests_at_top() {
        let plan = plan(0.0, square());
        assert_eq!(plan.dot_angle_degrees, 270.0);
        assert_eq!(plan.arc.sweep_degrees, 0.0);
        assert!((plan.dot.center.x - 50.0).abs() < EPS);
        assert!((plan.dot.center.y - 0.0).abs() < EPS);
    }

    #[test]
    fn test_full_progress_wraps_to_top() {
        let plan = plan(1.0, square());
        assert_eq!(plan.dot_angle_degrees, -90.0);
        assert_eq!(plan.dot_angle_degrees.rem_euclid(360.0), 270.0);
        assert_eq!(plan.arc.sweep_degrees, -360.0);

        let start = DrawPlan::new(0.0, square()).dot_center();
        assert!((plan.dot_center().x - start.x).abs() < EPS);
        assert!((plan.dot_center().y - start.y).abs() < EPS);
    }

    #[test]
    fn test_angle_formula_across_range() {
        for step in 0..=20 {
            let p = step as f32 / 20.0;
            let plan = plan(p, square());
            let expected_dot = (270.0 - 360.0 * p) % 360.0;
            assert!((plan.dot_angle_degrees - expected_dot).abs() < EPS, "p = {}", p);
            assert!(
                (plan.arc.sweep_degrees - (expected_dot - 270.0)).abs() < EPS,
                "p = {}",
                p
            );
        }
    }

    #[test]
    fn test_sweep_grows_with_progress() {
        // Sweep magnitude equals elapsed degrees even after the angle turns negative
        assert!((arc_sweep_degrees(0.5) + 180.0).abs() < EPS);
        assert!((arc_sweep_degrees(0.8) + 288.0).abs() < EPS);
    }

    #[test]
    fn test_quarter_progress_at_nine_oclock() {
        let plan = plan(0.25, square());
        assert!((plan.dot.center.x - 0.0).abs() < EPS);
        assert!((plan.dot.center.y - 50.0).abs() < EPS);
    }

    #[test]
    fn test_radius_uses_smaller_side() {
        let wide = plan(0.0, Size::new(200.0, 80.0));
        assert_eq!(wide.radius, 40.0);
        assert_eq!(wide.center, Point { x: 100.0, y: 40.0 });

        let tall = plan(0.0, Size::new(30.0, 90.0));
        assert_eq!(tall.radius, 15.0);
    }

    #[test]
    fn test_inner_ring_is_thinner() {
        let plan = plan(0.3, square());
        assert!(plan.inner.stroke < plan.background.stroke);
        assert_eq!(plan.background.tone, Tone::Neutral);
        assert_eq!(plan.inner.tone, Tone::Contrast);
        assert_eq!(plan.arc.tone, Tone::Accent);
        assert_eq!(plan.dot.tone, Tone::Accent);
    }

    #[test]
    fn test_arc_contains_angle() {
        let empty = plan(0.0, square()).arc;
        assert!(!empty.contains_angle(270.0));

        let half = plan(0.5, square()).arc;
        assert!(half.contains_angle(270.0));
        assert!(half.contains_angle(180.0));
        assert!(half.contains_angle(90.0));
        assert!(!half.contains_angle(0.0));
        assert!(!half.contains_angle(315.0));

        let full = plan(1.0, square()).arc;
        assert!(full.contains_angle(0.0));
        assert!(full.contains_angle(315.0));
    }

    #[test]
    fn test_angle_of() {
        let c = Point { x: 0.0, y: 0.0 };
        assert!((angle_of(c, Point { x: 1.0, y: 0.0 }) - 0.0).abs() < EPS);
        assert!((angle_of(c, Point { x: 0.0, y: 1.0 }) - 90.0).abs() < EPS);
        assert!((angle_of(c, Point { x: 0.0, y: -1.0 }) - 270.0).abs() < EPS);
    }
}
