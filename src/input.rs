use embedded_hal::digital::InputPin;

/// Electrical levels of the three buttons, `true` meaning high.
///
/// Buttons pull their pin to ground when pressed, so a released button reads
/// high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLevels {
    pub prev: bool,
    pub next: bool,
    pub play: bool,
}

impl ButtonLevels {
    pub const RELEASED: Self = Self {
        prev: true,
        next: true,
        play: true,
    };

    /// Levels as seen with the given buttons held down.
    #[cfg(test)]
    pub fn pressed(prev: bool, next: bool, play: bool) -> Self {
        Self {
            prev: !prev,
            next: !next,
            play: !play,
        }
    }
}

pub struct Buttons<P> {
    prev: P,
    next: P,
    play: P,
}

impl<P> Buttons<P>
where
    P: InputPin,
{
    pub fn new(prev: P, next: P, play: P) -> Self {
        Self { prev, next, play }
    }

    pub fn sample(&mut self) -> ButtonLevels {
        ButtonLevels {
            prev: read_level(&mut self.prev),
            next: read_level(&mut self.next),
            play: read_level(&mut self.play),
        }
    }
}

// A pin that cannot be read counts as released
fn read_level<P: InputPin>(pin: &mut P) -> bool {
    pin.is_high().unwrap_or(true)
}
