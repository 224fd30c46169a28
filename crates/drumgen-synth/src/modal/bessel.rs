//! Bessel functions of the first kind and their zeros.
//!
//! `J_n` is evaluated with Miller's backward recurrence, normalised by the
//! identity `J_0 + 2 * sum(J_2k) = 1`; zeros come from a coarse forward
//! scan bracketing each sign change followed by bisection. Both are exact
//! enough for eigenfrequency work at the orders membranes use, and fully
//! deterministic.

/// Evaluates `J_n(x)`.
pub fn bessel_j(n: usize, x: f64) -> f64 {
    if x == 0.0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }
    if x < 0.0 {
        let value = bessel_j(n, -x);
        return if n % 2 == 0 { value } else { -value };
    }

    // Start the backward recurrence well above both the order and the
    // argument, seeded with an arbitrary tiny value; the normalisation sum
    // removes the arbitrary scale.
    let start = ((n + x as usize + 24) | 1) + 1;
    let mut j_hi = 0.0_f64;
    let mut j_mid = 1e-30_f64;
    let mut result = if n == start { j_mid } else { 0.0 };
    let mut sum = if start % 2 == 0 { 2.0 * j_mid } else { 0.0 };

    for k in (1..=start).rev() {
        let j_lo = (2.0 * k as f64 / x) * j_mid - j_hi;
        j_hi = j_mid;
        j_mid = j_lo;
        let order = k - 1;
        if order == n {
            result = j_mid;
        }
        if order != 0 && order % 2 == 0 {
            sum += 2.0 * j_mid;
        }
        if j_mid.abs() > 1e100 {
            j_mid *= 1e-100;
            j_hi *= 1e-100;
            sum *= 1e-100;
            result *= 1e-100;
        }
    }
    sum += j_mid;
    result / sum
}

/// Finds the `m`-th positive zero of `J_n` (`m >= 1`).
///
/// Zeros of `J_n` are separated by more than a grid of pi/4 can skip, so a
/// forward scan from just above the previous zero brackets each one; the
/// bracket is then bisected to near machine precision.
pub fn bessel_j_zero(n: usize, m: usize) -> f64 {
    assert!(m >= 1, "zeros are indexed from 1");
    let mut found = 0;
    let step = std::f64::consts::FRAC_PI_4;
    let mut a = 1e-9;
    let mut fa = bessel_j(n, a);
    loop {
        let b = a + step;
        let fb = bessel_j(n, b);
        if fa * fb < 0.0 {
            found += 1;
            if found == m {
                return bisect(n, a, b);
            }
        }
        a = b;
        fa = fb;
    }
}

fn bisect(n: usize, mut a: f64, mut b: f64) -> f64 {
    let mut fa = bessel_j(n, a);
    for _ in 0..80 {
        let mid = 0.5 * (a + b);
        let fm = bessel_j(n, mid);
        if fm == 0.0 || (b - a) < 1e-14 {
            return mid;
        }
        if fa * fm < 0.0 {
            b = mid;
        } else {
            a = mid;
            fa = fm;
        }
    }
    0.5 * (a + b)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_bessel_j_known_values() {
        // Reference values from Abramowitz & Stegun.
        assert_abs_diff_eq!(bessel_j(0, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bessel_j(0, 1.0), 0.7651976865579666, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_j(1, 1.0), 0.4400505857449335, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_j(2, 2.0), 0.35283402861563773, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_j(5, 10.0), -0.23406152818679364, epsilon = 1e-10);
    }

    #[test]
    fn test_bessel_j_negative_argument_parity() {
        assert_abs_diff_eq!(bessel_j(0, -1.0), bessel_j(0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(bessel_j(1, -1.0), -bessel_j(1, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_bessel_zeros_known_values() {
        assert_abs_diff_eq!(bessel_j_zero(0, 1), 2.404825557695773, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j_zero(0, 2), 5.520078110286311, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j_zero(1, 1), 3.831705970207512, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j_zero(2, 1), 5.135622301840683, epsilon = 1e-9);
        assert_abs_diff_eq!(bessel_j_zero(10, 1), 14.475500686554541, epsilon = 1e-8);
    }

    #[test]
    fn test_zeros_are_zeros_and_increase() {
        for n in 0..6 {
            let mut previous = 0.0;
            for m in 1..=6 {
                let z = bessel_j_zero(n, m);
                assert!(z > previous);
                assert_abs_diff_eq!(bessel_j(n, z), 0.0, epsilon = 1e-10);
                previous = z;
            }
        }
    }
}
