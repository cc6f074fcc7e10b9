/*! `nanoshield-thermocouple` is an [`embedded_hal`](https://github.com/rust-embedded/embedded-hal)
crate for reading the [Circuitar Thermocouple Nanoshield](https://www.circuitar.com/nanoshields/modules/thermocouple/),
built around a [Maxim MAX31855](https://www.analog.com/en/products/max31855.html)
thermocouple-to-digital converter, over an SPI bus.

The MAX31855 is read-only: each chip-select cycle shifts out one 32-bit word holding

* the thermocouple (external) temperature, 14 bits at 0.25 °C,
* the cold-junction (internal) temperature, 12 bits at 0.0625 °C,
* three wiring fault flags: short to VCC, short to GND and open circuit.

Faults are not errors of [Thermocouple::read]. They are reported as state, and the external
temperature of a faulted reading should not be trusted. [Error] only covers failures of the
`embedded_hal` bus or pin.

The driver drives the chip-select pin itself. Several converters may share one bus as long
as each has its own chip-select pin and callers serialize access to the bus. */
#![no_std]

use core::fmt;
use core::result::Result;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, SpiBus, MODE_0};
use log::{debug, trace};

mod reading;
mod register;
mod temp;

pub use reading::Reading;
pub use register::Register;
pub use temp::Temperature;

/// SPI mode the bus must be configured with. Data is sampled on the rising clock edge.
pub const MODE: Mode = MODE_0;

/// Highest SCK frequency used with the converter (the part itself tops out at 5 MHz).
pub const MAX_FREQUENCY_HZ: u32 = 4_000_000;

/// Chip-select line the Nanoshield uses unless rewired (D8 on the Arduino header, GPIO8/CE0 on a Pi).
pub const DEFAULT_CS_PIN: u8 = 8;

/** A MAX31855 bound to an SPI bus and the chip-select pin wired to it.

The struct keeps the most recent [Reading]; the accessors report that reading
until the next call to [Thermocouple::read]. The bus must already be set up for
[MODE] at no more than [MAX_FREQUENCY_HZ]. */
pub struct Thermocouple<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    spi: SPI,
    cs: CS,
    reading: Reading,
}

#[derive(Debug, PartialEq)]
/// Enum for describing failures of the bus or pin while talking to the converter.
pub enum Error<S, P> {
    /** Transferring the measurement register failed. Contains the error reason from
    [SpiBus]'s error type, propagated from the [`embedded_hal`] implementation. */
    Spi(S),
    /** Driving the chip-select pin failed. Contains the error reason from
    [OutputPin]'s error type. */
    ChipSelect(P),
}

impl<S, P> fmt::Display for Error<S, P>
where
    S: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
            Error::ChipSelect(e) => write!(f, "chip-select pin failed: {:?}", e),
        }
    }
}

type DriverError<SPI, CS> =
    Error<<SPI as embedded_hal::spi::ErrorType>::Error, <CS as embedded_hal::digital::ErrorType>::Error>;

impl<SPI, CS> Thermocouple<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Take ownership of the bus and chip-select pin and deassert chip select.
    pub fn begin(spi: SPI, mut cs: CS) -> Result<Self, DriverError<SPI, CS>> {
        cs.set_high().map_err(Error::ChipSelect)?;

        Ok(Thermocouple {
            spi,
            cs,
            reading: Reading::default(),
        })
    }

    /** Read the measurement register and replace the stored reading.

    On error the stored reading is left untouched. Chip select is released even if the
    transfer itself failed. */
    pub fn read(&mut self) -> Result<Reading, DriverError<SPI, CS>> {
        let mut buf = [0u8; 4];

        self.cs.set_low().map_err(Error::ChipSelect)?;
        let transfer = self.spi.read(&mut buf).and_then(|()| self.spi.flush());
        let release = self.cs.set_high();

        transfer.map_err(Error::Spi)?;
        release.map_err(Error::ChipSelect)?;

        let reg = Register::from(buf);
        trace!("max31855 register: {:#010x}", reg.raw());
        if reg.has_fault_bit() {
            debug!("max31855 fault bit set: {:#010x}", reg.raw());
        }

        self.reading = reg.into();
        Ok(self.reading)
    }

    /// The most recent reading, or [Reading::default] before the first read.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Last cold-junction temperature read, in °C.
    pub fn internal(&self) -> f64 {
        self.reading.internal().celsius()
    }

    /// Last thermocouple temperature read, in °C. Check [Thermocouple::has_error] first.
    pub fn external(&self) -> f64 {
        self.reading.external().celsius()
    }

    /// Last read reported the thermocouple shorted to VCC.
    pub fn is_shorted_to_vcc(&self) -> bool {
        self.reading.is_shorted_to_vcc()
    }

    /// Last read reported the thermocouple shorted to GND.
    pub fn is_shorted_to_gnd(&self) -> bool {
        self.reading.is_shorted_to_gnd()
    }

    /// Last read reported an open thermocouple circuit.
    pub fn is_open(&self) -> bool {
        self.reading.is_open()
    }

    /// True if any of the short to VCC, short to GND or open circuit flags was set.
    pub fn has_error(&self) -> bool {
        self.reading.has_error()
    }

    /// Release the bus and chip-select pin.
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
