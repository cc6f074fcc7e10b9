#![allow(dead_code)]

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType, SpiBus};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use nanoshield_thermocouple::Thermocouple;

pub struct UnimplementedHal;

impl SpiErrorType for UnimplementedHal {
    type Error = ErrorKind;
}

impl SpiBus for UnimplementedHal {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct UnimplementedPin;

impl PinErrorType for UnimplementedPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for UnimplementedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use linux_embedded_hal::{CdevPin, SpidevBus};
        use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
        use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};

        pub type SpiImpl = SpidevBus;
        pub type PinImpl = CdevPin;
    } else {
        pub type SpiImpl = UnimplementedHal;
        pub type PinImpl = UnimplementedPin;
    }
}

pub fn setup() -> (SpiImpl, PinImpl) {
    cfg_if::cfg_if! {
        if #[cfg(any(target_os = "linux", target_os = "android"))] {
            // FIXME: Should integration tests panic?
            let mut spi = SpidevBus::open("/dev/spidev0.0").unwrap();
            let options = SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(nanoshield_thermocouple::MAX_FREQUENCY_HZ)
                .mode(SpiModeFlags::SPI_MODE_0 | SpiModeFlags::SPI_NO_CS)
                .build();
            spi.configure(&options).unwrap();

            let line = Chip::new("/dev/gpiochip0")
                .and_then(|mut chip| chip.get_line(nanoshield_thermocouple::DEFAULT_CS_PIN.into()))
                .and_then(|line| line.request(LineRequestFlags::OUTPUT, 1, "nanoshield-thermocouple"))
                .unwrap();

            (spi, CdevPin::new(line).unwrap())
        } else {
            (UnimplementedHal {}, UnimplementedPin {})
        }
    }
}

/// A mocked bus and pin expecting `begin` followed by one read per word.
pub fn mock_reads(words: &[u32]) -> (SpiMock<u8>, PinMock) {
    let mut spi = Vec::new();
    let mut cs = vec![PinTransaction::set(State::High)];

    for word in words {
        spi.push(SpiTransaction::read_vec(word.to_be_bytes().to_vec()));
        spi.push(SpiTransaction::flush());
        cs.push(PinTransaction::set(State::Low));
        cs.push(PinTransaction::set(State::High));
    }

    (SpiMock::new(&spi), PinMock::new(&cs))
}

pub fn done(tc: Thermocouple<SpiMock<u8>, PinMock>) {
    let (mut spi, mut cs) = tc.free();
    spi.done();
    cs.done();
}
