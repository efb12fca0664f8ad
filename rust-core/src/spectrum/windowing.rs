//! Analysis windows applied to a block before the DFT

use crate::filters::windows::WindowType;

/// Apply window in-place
///
/// Rectangular is a no-op, so the default analysis path leaves the
/// filtered block untouched.
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    if window_type == WindowType::Rectangular {
        return;
    }

    let length = signal.len();
    for (n, s) in signal.iter_mut().enumerate() {
        *s *= window_type.value(n, length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_window() {
        let mut signal = vec![1.0; 101];
        apply_window_inplace(&mut signal, WindowType::Hamming);

        // Center untouched, edges tapered to Hamming's 0.08
        assert!((signal[50] - 1.0).abs() < 1e-12);
        assert!((signal[0] - 0.08).abs() < 1e-12);
        assert!((signal[100] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_rectangular_is_identity() {
        let original = vec![0.3, -0.7, 0.9];
        let mut signal = original.clone();
        apply_window_inplace(&mut signal, WindowType::Rectangular);
        assert_eq!(signal, original);
    }
}
