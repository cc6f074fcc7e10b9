use std::thread;
use std::time::{Duration, SystemTime};

use argh::FromArgs;
use eyre::{eyre, Result};
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, SpidevBus};
use log::{info, warn};
use nanoshield_thermocouple::{Thermocouple, DEFAULT_CS_PIN, MAX_FREQUENCY_HZ};

#[derive(FromArgs)]
#[argh(description = "log Thermocouple Nanoshield readings")]
struct InputArgs {
    #[argh(positional, default = "String::from(\"/dev/spidev0.0\")")]
    bus: String,
    #[argh(option, default = "String::from(\"/dev/gpiochip0\")", description = "gpio chip holding the chip-select line")]
    gpio_chip: String,
    #[argh(option, default = "DEFAULT_CS_PIN", description = "chip-select line offset")]
    cs: u8,
    #[argh(option, default = "1000", description = "milliseconds between samples")]
    interval_ms: u64,
    #[argh(option, short = 'n', description = "number of samples to take (default: forever)")]
    count: Option<u32>,
}

fn open_bus(path: &str) -> Result<SpidevBus> {
    let mut spi = SpidevBus::open(path)?;
    // The driver toggles chip select itself.
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(MAX_FREQUENCY_HZ)
        .mode(SpiModeFlags::SPI_MODE_0 | SpiModeFlags::SPI_NO_CS)
        .build();
    spi.configure(&options)?;

    Ok(spi)
}

fn open_cs(chip: &str, line: u8) -> Result<CdevPin> {
    let handle = Chip::new(chip)?
        .get_line(line.into())?
        .request(LineRequestFlags::OUTPUT, 1, "thermocouple-logger")?;

    Ok(CdevPin::new(handle)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args: InputArgs = argh::from_env();

    let spi = open_bus(&args.bus)?;
    let cs = open_cs(&args.gpio_chip, args.cs)?;
    // no_std error types only impl Debug/Display; adapt them with eyre!.
    let mut tc = Thermocouple::begin(spi, cs).map_err(|e| eyre!("failed to set up converter: {}", e))?;
    info!("reading {} (cs line {} on {})", args.bus, args.cs, args.gpio_chip);

    let mut taken = 0;
    while args.count.map_or(true, |n| taken < n) {
        let reading = tc.read().map_err(|e| eyre!("failed to read a temperature: {}", e))?;
        let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?.as_secs();

        match reading.external_checked() {
            Some(temp) => println!(
                "{}: {} C ({:.2} F), cold junction {} C",
                now,
                temp,
                temp.fahrenheit(),
                reading.internal()
            ),
            None => warn!(
                "{}: thermocouple fault (open: {}, short to VCC: {}, short to GND: {}), cold junction {} C",
                now,
                reading.is_open(),
                reading.is_shorted_to_vcc(),
                reading.is_shorted_to_gnd(),
                reading.internal()
            ),
        }

        taken += 1;
        thread::sleep(Duration::from_millis(args.interval_ms));
    }

    let _old = tc.free();

    Ok(())
}
