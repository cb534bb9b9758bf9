//! Three-component value vector used for every kinematic quantity.
//!
//! `Vector` wraps an `nalgebra` 3-vector. The operators that make physical sense
//! (vector ± vector, vector × scalar, vector ÷ scalar, negation) are plain
//! `std::ops` impls and are checked by the compiler. When the kind of an operand
//! is only known at runtime, wrap it in an [`Operand`] and use the `try_*`
//! methods, which fail with `InvalidOperand` instead of guessing.
//!
//! Planar vectors are ordinary vectors with `z = 0`, so `Vector::planar(x, y)`
//! compares equal to `Vector::new(x, y, 0.0)`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Vector3;

use crate::error::{EngineError, EngineResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector(NVec3);

/// Right-hand side of a runtime-checked operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Vector(Vector),
}

impl From<f64> for Operand {
    fn from(s: f64) -> Self {
        Operand::Scalar(s)
    }
}

impl From<Vector> for Operand {
    fn from(v: Vector) -> Self {
        Operand::Vector(v)
    }
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(NVec3::new(x, y, z))
    }

    /// Vector in the xy-plane
    pub fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    pub fn zeros() -> Self {
        Self(NVec3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Self(self.0.cross(&other.0))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Division that refuses a zero divisor instead of producing Inf/NaN
    pub fn checked_div(self, divisor: f64) -> EngineResult<Vector> {
        if divisor == 0.0 {
            return Err(EngineError::DivisionByZero(format!(
                "vector {self} divided by zero"
            )));
        }
        Ok(self / divisor)
    }

    pub fn try_add(self, rhs: impl Into<Operand>) -> EngineResult<Vector> {
        match rhs.into() {
            Operand::Vector(v) => Ok(self + v),
            Operand::Scalar(_) => Err(EngineError::InvalidOperand {
                operation: "add",
                expected: "vector",
            }),
        }
    }

    pub fn try_sub(self, rhs: impl Into<Operand>) -> EngineResult<Vector> {
        match rhs.into() {
            Operand::Vector(v) => Ok(self - v),
            Operand::Scalar(_) => Err(EngineError::InvalidOperand {
                operation: "sub",
                expected: "vector",
            }),
        }
    }

    pub fn try_mul(self, rhs: impl Into<Operand>) -> EngineResult<Vector> {
        match rhs.into() {
            Operand::Scalar(s) => Ok(self * s),
            Operand::Vector(_) => Err(EngineError::InvalidOperand {
                operation: "mul",
                expected: "scalar",
            }),
        }
    }

    pub fn try_div(self, rhs: impl Into<Operand>) -> EngineResult<Vector> {
        match rhs.into() {
            Operand::Scalar(s) => self.checked_div(s),
            Operand::Vector(_) => Err(EngineError::InvalidOperand {
                operation: "div",
                expected: "scalar",
            }),
        }
    }

    pub fn try_dot(&self, rhs: impl Into<Operand>) -> EngineResult<f64> {
        match rhs.into() {
            Operand::Vector(v) => Ok(self.dot(&v)),
            Operand::Scalar(_) => Err(EngineError::InvalidOperand {
                operation: "dot",
                expected: "vector",
            }),
        }
    }

    pub fn try_cross(&self, rhs: impl Into<Operand>) -> EngineResult<Vector> {
        match rhs.into() {
            Operand::Vector(v) => Ok(self.cross(&v)),
            Operand::Scalar(_) => Err(EngineError::InvalidOperand {
                operation: "cross",
                expected: "vector",
            }),
        }
    }

    pub fn as_nalgebra(&self) -> &NVec3 {
        &self.0
    }
}

impl From<NVec3> for Vector {
    fn from(v: NVec3) -> Self {
        Self(v)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<[f64; 2]> for Vector {
    fn from(c: [f64; 2]) -> Self {
        Self::planar(c[0], c[1])
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.0 -= rhs.0;
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Self(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, s: f64) -> Vector {
        Self(self.0 * s)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        Vector(v.0 * self)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, s: f64) -> Vector {
        Self(self.0 / s)
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.z == 0.0 {
            write!(f, "({:.4e}, {:.4e})", self.0.x, self.0.y)
        } else {
            write!(f, "({:.4e}, {:.4e}, {:.4e})", self.0.x, self.0.y, self.0.z)
        }
    }
}
