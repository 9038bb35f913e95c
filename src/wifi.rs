use embassy_executor::Spawner;
use embassy_net::{Runner, Stack, StackResources};

use esp_hal::rng::Rng;
use esp_radio::{
    wifi::{ClientConfig, Config, ModeConfig, WifiController, WifiDevice, WifiError, WifiEvent},
    Controller,
};

use core::str::FromStr;
use heapless::String;
use log::info;
use static_cell::StaticCell;

use crate::config::CONFIG;
use crate::constants::STACK_SOCKETS;
use crate::station::{self, Credentials, Station};
use crate::status::{notify, NetEvent, STATUS};

static RESOURCES: StaticCell<StackResources<STACK_SOCKETS>> = StaticCell::new();

pub struct Wifi {
    pub stack: Stack<'static>,
}

#[derive(Debug)]
pub enum Error {
    WifiInitFailed,
    HostnameTooLong,
    TaskSpawnFailed,
}

impl Wifi {
    /// Creates the station interface and its DHCP stack, then hands the
    /// one-shot association to a background task.
    pub fn new(
        init: &'static Controller<'static>,
        wifi: esp_hal::peripherals::WIFI<'static>,
        rng: Rng,
        spawner: Spawner,
    ) -> Result<Self, Error> {
        let (controller, interfaces) = esp_radio::wifi::new(init, wifi, Config::default())
            .map_err(|_| Error::WifiInitFailed)?;

        let mut dhcp_config = embassy_net::DhcpConfig::default();
        dhcp_config.hostname = Some(
            String::<32>::from_str(CONFIG.device_id).map_err(|_| Error::HostnameTooLong)?,
        );

        let seed = (rng.random() as u64) << 32 | rng.random() as u64;
        let config = embassy_net::Config::dhcpv4(dhcp_config);

        let resources = RESOURCES.init(StackResources::new());
        let (stack, runner) = embassy_net::new(interfaces.sta, config, resources, seed);

        spawner.spawn(net_task(runner).map_err(|_| Error::TaskSpawnFailed)?);
        spawner.spawn(connection(controller).map_err(|_| Error::TaskSpawnFailed)?);
        spawner.spawn(address(stack).map_err(|_| Error::TaskSpawnFailed)?);

        Ok(Self { stack })
    }
}

impl Station for WifiController<'static> {
    type Error = WifiError;

    fn apply_credentials(&mut self, credentials: &Credentials<'_>) -> Result<(), WifiError> {
        let client_config = ClientConfig::default()
            .with_ssid(credentials.ssid.into())
            .with_password(credentials.psk.into());
        self.set_config(&ModeConfig::Client(client_config))
    }

    async fn start_station(&mut self) -> Result<(), WifiError> {
        self.start_async().await
    }

    async fn associate(&mut self) -> Result<(), WifiError> {
        self.connect_async().await
    }

    async fn wait_disconnected(&mut self) {
        self.wait_for_event(WifiEvent::StaDisconnected).await
    }

    async fn wait_connected(&mut self) {
        self.wait_for_event(WifiEvent::StaConnected).await
    }
}

#[embassy_executor::task]
async fn connection(mut controller: WifiController<'static>) {
    info!(
        "Start connection task, device capabilities: {:?}",
        controller.capabilities()
    );

    let credentials = Credentials {
        ssid: CONFIG.wifi_ssid,
        psk: CONFIG.wifi_psk,
    };
    station::bring_up(&mut controller, &credentials, &STATUS).await;
    station::watch(&mut controller, &STATUS).await
}

#[embassy_executor::task]
async fn address(stack: Stack<'static>) {
    loop {
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            notify(NetEvent::GotIp(config.address.address()));
        }
        stack.wait_config_down().await;
    }
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
