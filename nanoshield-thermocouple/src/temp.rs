use core::fmt;

use fixed::types::I12F4;

/* Invariant: both temperature fields of the converter fit in an I12F4
exactly. The thermocouple field loses no bits (14-bit, 2 fractional), nor
does the cold-junction field (12-bit, 4 fractional). */

/// A temperature in degrees Celsius, as reported by the converter.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Default, Clone, Copy)]
pub struct Temperature(pub(crate) I12F4);

impl Temperature {
    /// Build a temperature from raw `I12F4` bits (sixteenths of a degree).
    pub const fn from_bits(bits: i16) -> Self {
        Temperature(I12F4::from_bits(bits))
    }

    pub fn celsius(self) -> f64 {
        self.0.to_num::<f64>()
    }

    pub fn fahrenheit(self) -> f64 {
        1.8 * self.celsius() + 32.0
    }

    pub fn kelvin(self) -> f64 {
        self.celsius() + 273.15
    }
}

impl From<Temperature> for I12F4 {
    fn from(temp: Temperature) -> Self {
        temp.0
    }
}

impl From<I12F4> for Temperature {
    fn from(val: I12F4) -> Self {
        Temperature(val)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
