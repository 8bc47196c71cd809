//! Complex number payloads (`complex64` / `complex128`)

use core::fmt::{self, Display, Formatter};

/// A complex number with real and imaginary parts of the same float width
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl From<Complex<f32>> for Complex<f64> {
    fn from(c: Complex<f32>) -> Self {
        Self::new(f64::from(c.re), f64::from(c.im))
    }
}

impl From<f32> for Complex<f32> {
    fn from(re: f32) -> Self {
        Self::new(re, 0.0)
    }
}

impl From<f64> for Complex<f64> {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

impl Display for Complex<f32> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}i)",
            crate::stringify::float32(self.re),
            crate::stringify::signed(crate::stringify::float32(self.im))
        )
    }
}

impl Display for Complex<f64> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}i)",
            crate::stringify::float64(self.re),
            crate::stringify::signed(crate::stringify::float64(self.im))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Complex::new(1.0_f64, 2.0).to_string(), "(1+2i)");
        assert_eq!(Complex::new(1.5_f64, -0.5).to_string(), "(1.5-0.5i)");
        assert_eq!(Complex::new(0.0_f32, 0.0).to_string(), "(0+0i)");
    }

    #[test]
    fn test_widening() {
        let wide: Complex<f64> = Complex::new(0.5_f32, -1.0).into();
        assert_eq!(wide, Complex::new(0.5, -1.0));
    }
}
