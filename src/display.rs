//! Status display on the SSD1306 OLED.

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::constants::{READY_LABEL, READY_POSITION};

/// Buffered monochrome panel: drawing goes to RAM, `refresh` sends it out.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    fn power_on(&mut self) -> Result<(), Self::Error>;

    fn refresh(&mut self) -> Result<(), Self::Error>;
}

pub type Ssd1306Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

impl<I2C> Panel for Ssd1306Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn power_on(&mut self) -> Result<(), Self::Error> {
        self.init()
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }
}

/// SSD1306 at the default 0x3C address.
pub fn new_ssd1306<I2C>(i2c: I2C) -> Ssd1306Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode()
}

/// Owns the panel for the lifetime of the device.
///
/// The ready label is drawn by `new` and never redrawn.
pub struct StatusDisplay<P> {
    #[allow(dead_code)]
    panel: P,
}

impl<P> StatusDisplay<P>
where
    P: Panel,
{
    pub fn new(mut panel: P) -> Result<Self, P::Error> {
        panel.power_on()?;
        panel.clear(BinaryColor::Off)?;

        let style = MonoTextStyle::new(&FONT_8X13, BinaryColor::On);
        let (x, y) = READY_POSITION;
        Text::with_baseline(READY_LABEL, Point::new(x, y), style, Baseline::Top)
            .draw(&mut panel)?;

        panel.refresh()?;

        Ok(Self { panel })
    }
}
