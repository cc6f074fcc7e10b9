use crate::register::Register;
use crate::temp::Temperature;

/** A snapshot of one measurement: both temperatures and the three wiring faults.

The [Default] reading (0 °C everywhere, no faults) is what a driver reports
before its first successful read. */
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct Reading {
    pub(crate) internal: Temperature,
    pub(crate) external: Temperature,
    pub(crate) short_to_vcc: bool,
    pub(crate) short_to_gnd: bool,
    pub(crate) open_circuit: bool,
}

impl Reading {
    /// Decode a raw register word, most significant bit first as shifted out by the converter.
    pub fn from_raw(raw: u32) -> Self {
        Register::from_raw(raw).into()
    }

    /// Cold-junction temperature. Valid even when a fault is flagged.
    pub fn internal(&self) -> Temperature {
        self.internal
    }

    /** Thermocouple temperature. Meaningless if [Reading::has_error] is true; see
    [Reading::external_checked]. */
    pub fn external(&self) -> Temperature {
        self.external
    }

    pub fn external_checked(&self) -> Option<Temperature> {
        if self.has_error() {
            None
        } else {
            Some(self.external)
        }
    }

    pub fn is_shorted_to_vcc(&self) -> bool {
        self.short_to_vcc
    }

    pub fn is_shorted_to_gnd(&self) -> bool {
        self.short_to_gnd
    }

    pub fn is_open(&self) -> bool {
        self.open_circuit
    }

    pub fn has_error(&self) -> bool {
        self.short_to_vcc || self.short_to_gnd || self.open_circuit
    }
}
