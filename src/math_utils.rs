//! Mathematical utilities for curve evaluation and offset bookkeeping

/// Cubic Bernstein basis at parameter t: `[(1-t)^3, 3(1-t)^2 t, 3(1-t) t^2, t^3]`
///
/// Evaluated as-is for any real t, so values outside [0, 1] extrapolate.
pub fn bernstein_weights<T>(t: T) -> [T; 4]
where
    T: num_traits::Float,
{
    let three = T::one() + T::one() + T::one();
    let u = T::one() - t;
    [u * u * u, three * u * u * t, three * u * t * t, t * t * t]
}

/// Weights of the control-point differences in the first derivative:
/// `[3(1-t)^2, 6(1-t)t, 3t^2]` applied to `(P1-P0, P2-P1, P3-P2)`
pub fn bernstein_derivative_weights<T>(t: T) -> [T; 3]
where
    T: num_traits::Float,
{
    let three = T::one() + T::one() + T::one();
    let six = three + three;
    let u = T::one() - t;
    [three * u * u, six * u * t, three * t * t]
}

/// Clamp `value` into `[-limit, limit]`. A NaN value collapses to zero.
pub fn clamp_symmetric<T>(value: T, limit: T) -> T
where
    T: num_traits::Float,
{
    if value.is_nan() {
        return T::zero();
    }
    let limit = limit.abs();
    value.max(-limit).min(limit)
}

/// Calculate distance between two points
pub fn distance<T>(p1: (T, T), p2: (T, T)) -> T
where
    T: num_traits::Float,
{
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    (dx * dx + dy * dy).sqrt()
}
