/// 2-D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement geometry. `z` is the paint/stack order; higher stacks above.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// 3x3 affine matrix. Attributes omitted in the XML default to the identity
/// entries (m11 = m22 = m33 = 1, everything else 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m11: 1.0,
        m12: 0.0,
        m13: 0.0,
        m21: 0.0,
        m22: 1.0,
        m23: 0.0,
        m31: 0.0,
        m32: 0.0,
        m33: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Cubic bezier control-point pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bezier {
    pub cp0: Point,
    pub cp1: Point,
}

/// One step of a bendable connector leg. A point with no bezier is a
/// straight segment, which is a meaningful state, not a parse gap: the XML
/// keeps `point` and `bezier` as two parallel positional arrays, so an
/// uncurved step still occupies a (placeholder) bezier slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBezierPair {
    pub point: Point,
    pub bezier: Option<Bezier>,
}

/// Arbitrary named key/value pair. Name uniqueness within an owning
/// collection is the owner's invariant, not this type's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
