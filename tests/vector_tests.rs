use approx::{assert_relative_eq, relative_eq};

use gravsim::{EngineError, Operand, Vector};

fn samples() -> Vec<Vector> {
    vec![
        Vector::new(1.0, 2.0, -4.1),
        Vector::new(0.0, -2.0, 3.1),
        Vector::new(-9.0, 6.0, -2.0),
        Vector::planar(-1.0, 1.1),
        Vector::new(4.45, 5.1, 6.8),
    ]
}

#[test]
fn components_and_indexing() {
    let v = Vector::new(1.0, 2.0, 3.0);
    assert_eq!((v.x(), v.y(), v.z()), (1.0, 2.0, 3.0));
    assert_eq!((v[0], v[1], v[2]), (1.0, 2.0, 3.0));
}

#[test]
fn planar_equals_spatial_with_zero_z() {
    assert_eq!(Vector::planar(-1.0, 1.1), Vector::new(-1.0, 1.1, 0.0));
    assert_ne!(Vector::planar(-1.0, 1.1), Vector::new(-1.0, 1.1, 1.0));
    assert_eq!(Vector::from([3.0, 4.0]), Vector::from([3.0, 4.0, 0.0]));
}

#[test]
fn exact_equality_is_strict() {
    assert_ne!(Vector::new(1.0, 0.0, 3.0), Vector::new(1.0, 0.0, 2.99));
}

#[test]
fn addition_is_commutative() {
    for a in samples() {
        for b in samples() {
            assert_eq!(a + b, b + a);
        }
    }
}

#[test]
fn subtraction_is_anti_commutative() {
    for a in samples() {
        for b in samples() {
            assert_eq!(a - b, -(b - a));
        }
    }
}

#[test]
fn addition_matches_expected_within_tolerance() {
    let sum = Vector::new(1.0, 2.0, -4.1) + Vector::new(0.0, -2.0, 3.1);
    // -4.1 + 3.1 is not exactly -1.0 in binary floating point
    assert!(relative_eq!(sum, Vector::new(1.0, 0.0, -1.0), epsilon = 1e-12));
}

#[test]
fn cross_is_anti_commutative() {
    for a in samples() {
        for b in samples() {
            assert_eq!(a.cross(&b), -b.cross(&a));
        }
    }
}

#[test]
fn cross_product_value() {
    let c = Vector::new(1.0, 2.0, 3.0).cross(&Vector::new(4.45, 5.1, 6.8));
    assert_relative_eq!(c, Vector::new(-1.7, 6.55, -3.8), epsilon = 1e-12);
}

#[test]
fn dot_product_value_and_orthogonality() {
    let d = Vector::new(1.0, 2.0, 3.0).dot(&Vector::new(4.45, 5.1, 6.8));
    assert_relative_eq!(d, 35.05, epsilon = 1e-12);

    let ex = Vector::new(1.0, 0.0, 0.0);
    let ey = Vector::new(0.0, 1.0, 0.0);
    let ez = Vector::new(0.0, 0.0, 1.0);
    assert_eq!(ex.dot(&ey), 0.0);
    assert_eq!(ey.dot(&ez), 0.0);
    assert_eq!(ex.cross(&ey), ez);
}

#[test]
fn norm_is_non_negative_and_even() {
    assert_eq!(Vector::new(9.0, 6.0, 2.0).norm(), 11.0);
    for v in samples() {
        assert!(v.norm() >= 0.0);
        assert_eq!(v.norm(), (-v).norm());
    }
    assert_eq!(Vector::zeros().norm(), 0.0);
}

#[test]
fn scalar_multiplication_and_division() {
    let v = Vector::new(1.0, 2.0, 3.0);
    assert_relative_eq!(v * 2.1, Vector::new(2.1, 4.2, 6.3), epsilon = 1e-12);
    assert_eq!(2.0 * v, v * 2.0);
    assert_eq!(v / 2.0, Vector::new(0.5, 1.0, 1.5));
    assert_eq!(-v, Vector::new(-1.0, -2.0, -3.0));
}

#[test]
fn scalar_where_vector_expected_is_invalid() {
    let v = Vector::new(1.0, 2.0, 3.0);
    assert!(matches!(v.try_add(1.0), Err(EngineError::InvalidOperand { .. })));
    assert!(matches!(v.try_sub(1.0), Err(EngineError::InvalidOperand { .. })));
    assert!(matches!(v.try_dot(1.0), Err(EngineError::InvalidOperand { .. })));
    assert!(matches!(v.try_cross(1.0), Err(EngineError::InvalidOperand { .. })));
}

#[test]
fn vector_where_scalar_expected_is_invalid() {
    let v = Vector::new(1.0, 2.0, 3.0);
    let w = Vector::new(2.1, 4.2, 6.3);
    let err = v.try_mul(w).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidOperand {
            operation: "mul",
            expected: "scalar"
        }
    );
    assert!(err.to_string().contains("dot() or cross()"));
    assert!(matches!(v.try_div(w), Err(EngineError::InvalidOperand { .. })));
}

#[test]
fn checked_operations_agree_with_operators() {
    let v = Vector::new(1.0, 2.0, 3.0);
    let w = Vector::new(-0.5, 4.0, 2.0);
    assert_eq!(v.try_add(w).unwrap(), v + w);
    assert_eq!(v.try_sub(Operand::Vector(w)).unwrap(), v - w);
    assert_eq!(v.try_mul(3.0).unwrap(), v * 3.0);
    assert_eq!(v.try_div(4.0).unwrap(), v / 4.0);
    assert_eq!(v.try_dot(w).unwrap(), v.dot(&w));
    assert_eq!(v.try_cross(w).unwrap(), v.cross(&w));
}

#[test]
fn division_by_zero_is_reported() {
    let v = Vector::new(1.0, 2.0, 3.0);
    assert!(matches!(v.checked_div(0.0), Err(EngineError::DivisionByZero(_))));
    assert!(matches!(v.try_div(0.0), Err(EngineError::DivisionByZero(_))));
}
