use modular_bitfield::prelude::*;

use crate::reading::Reading;
use crate::temp::Temperature;

/** The 32-bit measurement register, as shifted out by the converter.

Fields are listed from bit 0 upward. Both temperature fields are two's
complement; the thermocouple field counts quarter degrees and the cold-junction
field counts sixteenths of a degree. */
#[bitfield]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Register {
    open_circuit: bool,
    short_to_gnd: bool,
    short_to_vcc: bool,
    #[skip]
    __: B1,
    internal: B12,
    fault: bool,
    #[skip]
    __: B1,
    thermocouple: B14,
}

impl Register {
    pub fn from_raw(raw: u32) -> Self {
        Register::from_bytes(raw.to_le_bytes())
    }

    pub fn raw(&self) -> u32 {
        u32::from_le_bytes(self.into_bytes())
    }

    /// The generic fault bit (D16). Set whenever any of the three fault flags is.
    pub fn has_fault_bit(&self) -> bool {
        self.fault()
    }

    pub fn internal_temperature(&self) -> Temperature {
        // Sign-extend the 12-bit field; it already counts sixteenths.
        Temperature::from_bits(((self.internal() << 4) as i16) >> 4)
    }

    pub fn external_temperature(&self) -> Temperature {
        // Shifting the 14-bit field to the top both sign-extends it and turns
        // quarter degrees into sixteenths.
        Temperature::from_bits((self.thermocouple() << 2) as i16)
    }
}

/// Wire order: the converter shifts the most significant byte out first.
impl From<[u8; 4]> for Register {
    fn from(bytes: [u8; 4]) -> Self {
        Register::from_raw(u32::from_be_bytes(bytes))
    }
}

impl From<Register> for Reading {
    fn from(reg: Register) -> Self {
        Reading {
            internal: reg.internal_temperature(),
            external: reg.external_temperature(),
            short_to_vcc: reg.short_to_vcc(),
            short_to_gnd: reg.short_to_gnd(),
            open_circuit: reg.open_circuit(),
        }
    }
}
