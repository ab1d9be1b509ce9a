//! Membership function shapes.

/// A piecewise-linear membership function over one crisp input.
///
/// All shapes return a degree in `[0, 1]`. A `NaN` input has degree `0`
/// in every shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MembershipFn {
    /// Rises on `[a, b]`, falls on `[b, c]`.
    Triangle { a: f64, b: f64, c: f64 },

    /// Rises on `[a, b]`, flat at 1 on `[b, c]`, falls on `[c, d]`.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },

    /// Full membership for every `x <= c`, falls to 0 at `d`.
    LeftShoulder { c: f64, d: f64 },

    /// Rises from 0 at `a` to full membership for every `x >= b`.
    RightShoulder { a: f64, b: f64 },
}

impl MembershipFn {
    /// Membership degree of `x`.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        match *self {
            MembershipFn::Triangle { a, b, c } => rising(x, a, b).min(falling(x, b, c)),
            MembershipFn::Trapezoid { a, b, c, d } => rising(x, a, b).min(falling(x, c, d)),
            MembershipFn::LeftShoulder { c, d } => falling(x, c, d),
            MembershipFn::RightShoulder { a, b } => rising(x, a, b),
        }
    }
}

/// 0 below `a`, 1 from `b` on, linear in between. `a == b` is a vertical edge.
fn rising(x: f64, a: f64, b: f64) -> f64 {
    if x >= b {
        1.0
    } else if x <= a {
        0.0
    } else {
        (x - a) / (b - a)
    }
}

/// 1 up to `c`, 0 from `d` on, linear in between. `c == d` is a vertical edge.
fn falling(x: f64, c: f64, d: f64) -> f64 {
    if x <= c {
        1.0
    } else if x >= d {
        0.0
    } else {
        (d - x) / (d - c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_peak_and_feet() {
        let f = MembershipFn::Triangle {
            a: -20.0,
            b: 0.0,
            c: 20.0,
        };
        assert!((f.degree(0.0) - 1.0).abs() < 1e-12);
        assert!((f.degree(-10.0) - 0.5).abs() < 1e-12);
        assert!((f.degree(15.0) - 0.25).abs() < 1e-12);
        assert_eq!(f.degree(-20.0), 0.0);
        assert_eq!(f.degree(25.0), 0.0);
    }

    #[test]
    fn test_trapezoid_plateau() {
        let f = MembershipFn::Trapezoid {
            a: -1.0,
            b: 0.0,
            c: 40.0,
            d: 60.0,
        };
        assert!((f.degree(0.0) - 1.0).abs() < 1e-12);
        assert!((f.degree(40.0) - 1.0).abs() < 1e-12);
        assert!((f.degree(50.0) - 0.5).abs() < 1e-12);
        assert!((f.degree(-0.5) - 0.5).abs() < 1e-12);
        assert_eq!(f.degree(60.0), 0.0);
    }

    #[test]
    fn test_shoulders_saturate() {
        let left = MembershipFn::LeftShoulder { c: -45.0, d: -30.0 };
        assert_eq!(left.degree(-1000.0), 1.0);
        assert_eq!(left.degree(f64::NEG_INFINITY), 1.0);
        assert!((left.degree(-37.5) - 0.5).abs() < 1e-12);
        assert_eq!(left.degree(0.0), 0.0);

        let right = MembershipFn::RightShoulder { a: 30.0, b: 45.0 };
        assert_eq!(right.degree(500.0), 1.0);
        assert!((right.degree(37.5) - 0.5).abs() < 1e-12);
        assert_eq!(right.degree(0.0), 0.0);
    }

    #[test]
    fn test_nan_has_no_membership() {
        let shapes = [
            MembershipFn::Triangle {
                a: 0.0,
                b: 1.0,
                c: 2.0,
            },
            MembershipFn::LeftShoulder { c: 0.0, d: 1.0 },
            MembershipFn::RightShoulder { a: 0.0, b: 1.0 },
        ];
        for shape in shapes {
            assert_eq!(shape.degree(f64::NAN), 0.0);
        }
    }
}
