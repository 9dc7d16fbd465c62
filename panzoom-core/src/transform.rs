//! 2D affine transform algebra.
//!
//! A transform is stored as six scalars, the top two rows of a 3x3
//! homogeneous matrix whose implicit bottom row is `[0, 0, 1]`:
//!
//! ```text
//! | scale_x  skew_y   translate_x |
//! | skew_x   scale_y  translate_y |
//! |   0        0           1      |
//! ```
//!
//! Every operation returns a new value.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A scale + translate (+ skew) mapping of 2D coordinates.
///
/// Maps `(x, y)` to
/// `(scale_x * x + skew_y * y + translate_x, skew_x * x + scale_y * y + translate_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Vertical shear contributed by x.
    pub skew_x: f64,
    /// Horizontal shear contributed by y.
    pub skew_y: f64,
    /// Horizontal translation.
    pub translate_x: f64,
    /// Vertical translation.
    pub translate_y: f64,
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        skew_x: 0.0,
        skew_y: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// The identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// A pure translation by `(dx, dy)`.
    #[must_use]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            translate_x: dx,
            translate_y: dy,
            ..Self::IDENTITY
        }
    }

    /// A uniform scaling by `s` about the origin.
    #[must_use]
    pub const fn scaling(s: f64) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..Self::IDENTITY
        }
    }

    /// Matrix product `a * b`: the transform that applies `b` first, then `a`.
    #[must_use]
    pub fn compose(a: &Self, b: &Self) -> Self {
        Self {
            scale_x: a.scale_x * b.scale_x + a.skew_y * b.skew_x,
            skew_y: a.scale_x * b.skew_y + a.skew_y * b.scale_y,
            translate_x: a.scale_x * b.translate_x + a.skew_y * b.translate_y + a.translate_x,
            skew_x: a.skew_x * b.scale_x + a.scale_y * b.skew_x,
            scale_y: a.skew_x * b.skew_y + a.scale_y * b.scale_y,
            translate_y: a.skew_x * b.translate_x + a.scale_y * b.translate_y + a.translate_y,
        }
    }

    /// The view transform a canvas of the given design size starts with.
    ///
    /// Scales by `scale` and shifts by half the size difference so the
    /// scaled canvas stays centred on its own design box.
    #[must_use]
    pub fn initial_view(canvas_width: f64, canvas_height: f64, scale: f64) -> Self {
        Self::compose(
            &Self::translation(
                -(canvas_width - canvas_width * scale) / 2.0,
                -(canvas_height - canvas_height * scale) / 2.0,
            ),
            &Self::scaling(scale),
        )
    }

    /// Map a point through this transform.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.scale_x * p.x + self.skew_y * p.y + self.translate_x,
            self.skew_x * p.x + self.scale_y * p.y + self.translate_y,
        )
    }

    /// The translation component as a point.
    #[must_use]
    pub const fn translation_part(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    /// Copy of this transform with the translation replaced.
    #[must_use]
    pub const fn with_translation(mut self, x: f64, y: f64) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.scale_x,
            self.scale_y,
            self.skew_x,
            self.skew_y,
            self.translate_x,
            self.translate_y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Component-wise comparison within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.scale_x - other.scale_x).abs() <= tolerance
            && (self.scale_y - other.scale_y).abs() <= tolerance
            && (self.skew_x - other.skew_x).abs() <= tolerance
            && (self.skew_y - other.skew_y).abs() <= tolerance
            && (self.translate_x - other.translate_x).abs() <= tolerance
            && (self.translate_y - other.translate_y).abs() <= tolerance
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::compose(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample() -> AffineTransform {
        AffineTransform {
            scale_x: 1.7,
            scale_y: 0.6,
            skew_x: 0.25,
            skew_y: -0.4,
            translate_x: 33.0,
            translate_y: -12.5,
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let t = sample();
        let id = AffineTransform::identity();
        assert!(AffineTransform::compose(&id, &t).approx_eq(&t, EPS));
        assert!(AffineTransform::compose(&t, &id).approx_eq(&t, EPS));
    }

    #[test]
    fn test_translation_and_scaling_constructors() {
        let t = AffineTransform::translation(4.0, -2.0);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(5.0, -1.0));

        let s = AffineTransform::scaling(3.0);
        assert_eq!(s.apply(Point::new(2.0, -1.0)), Point::new(6.0, -3.0));
        assert!(s.translate_x.abs() < f64::EPSILON);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let t = AffineTransform::translation(10.0, 0.0);
        let s = AffineTransform::scaling(2.0);

        // Scale then translate.
        let ts = t * s;
        assert_eq!(ts.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));

        // Translate then scale.
        let st = s * t;
        assert_eq!(st.apply(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let a = sample();
        let b = AffineTransform {
            scale_x: 0.9,
            scale_y: 1.3,
            skew_x: -0.1,
            skew_y: 0.2,
            translate_x: -7.0,
            translate_y: 4.0,
        };
        let p = Point::new(13.0, -8.0);
        let direct = (a * b).apply(p);
        let stepwise = a.apply(b.apply(p));
        assert!((direct.x - stepwise.x).abs() < EPS);
        assert!((direct.y - stepwise.y).abs() < EPS);
    }

    #[test]
    fn test_initial_view() {
        let t = AffineTransform::initial_view(720.0, 1080.0, 0.5);
        assert!((t.scale_x - 0.5).abs() < EPS);
        assert!((t.scale_y - 0.5).abs() < EPS);
        assert!((t.translate_x + 180.0).abs() < EPS);
        assert!((t.translate_y + 270.0).abs() < EPS);

        let unit = AffineTransform::initial_view(720.0, 1080.0, 1.0);
        assert!(unit.approx_eq(&AffineTransform::identity(), EPS));
    }

    #[test]
    fn test_is_finite() {
        assert!(sample().is_finite());
        let mut bad = sample();
        bad.translate_y = f64::NAN;
        assert!(!bad.is_finite());
        bad.translate_y = 0.0;
        bad.scale_x = f64::INFINITY;
        assert!(!bad.is_finite());
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(AffineTransform::translation(1.0, 2.0))
            .expect("should serialize");
        assert_eq!(json["scaleX"], 1.0);
        assert_eq!(json["translateX"], 1.0);
        assert_eq!(json["translateY"], 2.0);
        assert_eq!(json["skewY"], 0.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_transform() -> impl Strategy<Value = AffineTransform> {
            (
                -10.0f64..10.0,
                -10.0f64..10.0,
                -10.0f64..10.0,
                -10.0f64..10.0,
                -1000.0f64..1000.0,
                -1000.0f64..1000.0,
            )
                .prop_map(
                    |(scale_x, scale_y, skew_x, skew_y, translate_x, translate_y)| {
                        AffineTransform {
                            scale_x,
                            scale_y,
                            skew_x,
                            skew_y,
                            translate_x,
                            translate_y,
                        }
                    },
                )
        }

        proptest! {
            #[test]
            fn prop_identity_laws(t in arb_transform()) {
                let id = AffineTransform::identity();
                prop_assert!(AffineTransform::compose(&id, &t).approx_eq(&t, EPS));
                prop_assert!(AffineTransform::compose(&t, &id).approx_eq(&t, EPS));
            }

            #[test]
            fn prop_compose_is_associative(
                a in arb_transform(),
                b in arb_transform(),
                c in arb_transform()
            ) {
                let left = (a * b) * c;
                let right = a * (b * c);
                // Magnitudes reach ~1e6 here, so compare relative to scale.
                let tolerance = 1e-9 * (1.0 + left.translate_x.abs().max(left.translate_y.abs()));
                prop_assert!(
                    left.approx_eq(&right, tolerance),
                    "left {:?} != right {:?}",
                    left,
                    right
                );
            }
        }
    }
}
