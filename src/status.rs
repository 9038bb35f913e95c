//! Network lifecycle notifications.
//!
//! The Wi-Fi and address watchers publish into [`STATUS`] without ever
//! blocking; a single consumer task drains it and writes one log line per
//! event. Nothing reacts to these events, they only feed the console.

use core::fmt;
use core::net::Ipv4Addr;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::{debug, info};

use crate::constants::STATUS_CHANNEL_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetEvent {
    StaStart,
    StaConnected,
    StaDisconnected,
    GotIp(Ipv4Addr),
}

impl fmt::Display for NetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetEvent::StaStart => f.write_str("WiFi connecting ..."),
            NetEvent::StaConnected => f.write_str("WiFi connected ..."),
            NetEvent::StaDisconnected => f.write_str("WiFi lost connection ..."),
            NetEvent::GotIp(address) => write!(f, "WiFi got IP ... {}", address),
        }
    }
}

pub type StatusChannel = Channel<CriticalSectionRawMutex, NetEvent, STATUS_CHANNEL_CAPACITY>;

pub static STATUS: StatusChannel = Channel::new();

/// Publishes on the global status channel.
pub fn notify(event: NetEvent) {
    publish(&STATUS, event);
}

/// Queues `event` if there is room, drops it otherwise.
pub fn publish(channel: &StatusChannel, event: NetEvent) {
    if let Err(TrySendError::Full(event)) = channel.try_send(event) {
        debug!("Status channel full, dropping {:?}", event);
    }
}

/// Waits for the next event and logs it.
pub async fn log_next(channel: &StatusChannel) -> NetEvent {
    let event = channel.receive().await;
    info!("{}", event);
    event
}

pub async fn log_events(channel: &StatusChannel) -> ! {
    loop {
        log_next(channel).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn log_lines() {
        assert_eq!(NetEvent::StaStart.to_string(), "WiFi connecting ...");
        assert_eq!(NetEvent::StaConnected.to_string(), "WiFi connected ...");
        assert_eq!(
            NetEvent::StaDisconnected.to_string(),
            "WiFi lost connection ..."
        );
        assert_eq!(
            NetEvent::GotIp(Ipv4Addr::new(192, 168, 1, 42)).to_string(),
            "WiFi got IP ... 192.168.1.42"
        );
    }

    #[test]
    fn events_are_logged_in_order() {
        let channel = StatusChannel::new();
        publish(&channel, NetEvent::StaStart);
        publish(&channel, NetEvent::StaConnected);

        assert_eq!(block_on(log_next(&channel)), NetEvent::StaStart);
        assert_eq!(block_on(log_next(&channel)), NetEvent::StaConnected);
        assert!(channel.is_empty());
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let channel = StatusChannel::new();
        for _ in 0..STATUS_CHANNEL_CAPACITY {
            publish(&channel, NetEvent::StaStart);
        }
        publish(&channel, NetEvent::StaDisconnected);

        assert_eq!(channel.len(), STATUS_CHANNEL_CAPACITY);
        while let Ok(event) = channel.try_receive() {
            assert_eq!(event, NetEvent::StaStart);
        }
    }
}
