//! Station-mode bring-up.
//!
//! Association is attempted exactly once. Failures are logged and the
//! sequence carries on; the rest of the device starts whether or not the
//! network came up.

use core::fmt::Debug;

use log::{error, info, warn};

use crate::status::{publish, NetEvent, StatusChannel};

pub struct Credentials<'a> {
    pub ssid: &'a str,
    pub psk: &'a str,
}

/// Wi-Fi controller operating in client mode.
#[allow(async_fn_in_trait)]
pub trait Station {
    type Error: Debug;

    fn apply_credentials(&mut self, credentials: &Credentials<'_>) -> Result<(), Self::Error>;

    async fn start_station(&mut self) -> Result<(), Self::Error>;

    async fn associate(&mut self) -> Result<(), Self::Error>;

    async fn wait_disconnected(&mut self);

    async fn wait_connected(&mut self);
}

/// Configures, starts and connects `station`, one attempt each.
pub async fn bring_up<S: Station>(
    station: &mut S,
    credentials: &Credentials<'_>,
    status: &StatusChannel,
) {
    if let Err(e) = station.apply_credentials(credentials) {
        error!("Failed to set WiFi config: {:?}", e);
    }

    info!("Starting wifi");
    match station.start_station().await {
        Ok(()) => publish(status, NetEvent::StaStart),
        Err(e) => error!("Failed to start WiFi: {:?}", e),
    }

    info!("About to connect to {:?}...", credentials.ssid);
    match station.associate().await {
        Ok(()) => publish(status, NetEvent::StaConnected),
        Err(e) => warn!("Failed to connect to wifi: {:?}", e),
    }
}

/// Reports link changes forever. Never reconnects.
pub async fn watch<S: Station>(station: &mut S, status: &StatusChannel) -> ! {
    loop {
        station.wait_disconnected().await;
        publish(status, NetEvent::StaDisconnected);

        station.wait_connected().await;
        publish(status, NetEvent::StaConnected);
    }
}
