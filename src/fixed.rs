//! Two-decimal float rendering without floating-point formatting support.
//!
//! Rounds half-up at the third decimal: scale by 1000, add 5, divide by
//! ten. Numbers below one print without a leading zero (`0.21` → `.21`).

use core::fmt;

/// Display adapter for a float, two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPoint(pub f64);

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        if value < 0.0 {
            f.write_str("-")?;
            value = -value;
        }

        // Hundredths, rounded half-up
        let scaled = ((value * 1000.0 + 5.0) as u64) / 10;
        let whole = scaled / 100;
        if whole > 0 {
            write!(f, "{}", whole)?;
        }
        write!(f, ".{:02}", scaled % 100)
    }
}
