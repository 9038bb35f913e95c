use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use log::{info, trace};

use crate::command::Command;
use crate::constants::POLL_INTERVAL_MS;
use crate::input::Buttons;

/// Receiver of button commands.
///
/// Sends are fire-and-forget: implementations deal with their own failures
/// and the caller never learns about them.
#[allow(async_fn_in_trait)]
pub trait CommandSink {
    async fn send(&mut self, command: Command);

    async fn send_prev(&mut self) {
        self.send(Command::Prev).await
    }

    async fn send_next(&mut self) {
        self.send(Command::Next).await
    }

    async fn send_play(&mut self) {
        self.send(Command::Play).await
    }
}

/// Button polling loop.
///
/// There is no debouncing, a held button sends its command on every poll.
pub struct Controller<P, S> {
    buttons: Buttons<P>,
    sink: S,
}

impl<P, S> Controller<P, S>
where
    P: InputPin,
    S: CommandSink,
{
    pub fn new(buttons: Buttons<P>, sink: S) -> Self {
        Self { buttons, sink }
    }

    /// Samples the buttons once and sends the selected command, if any.
    pub async fn poll(&mut self) -> Option<Command> {
        let levels = self.buttons.sample();

        let Some(command) = Command::from_levels(levels) else {
            trace!(".");
            return None;
        };

        info!(
            "Button {} pressed, level {}",
            command,
            u8::from(command.pin_level(levels))
        );

        match command {
            Command::Prev => self.sink.send_prev().await,
            Command::Next => self.sink.send_next().await,
            Command::Play => self.sink.send_play().await,
        }

        Some(command)
    }

    pub async fn run(mut self) -> ! {
        loop {
            self.poll().await;
            Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }
}
