#![no_std]
#![no_main]

use static_cell::StaticCell;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{self as hal};
use esp_println::logger::init_logger;

use hal::{
    gpio::{Input, InputConfig, Pull},
    i2c::master::I2c,
    rng::Rng,
    time::Rate,
    timer::timg::TimerGroup,
};
use log::{info, warn};

use esp32_media_remote::{
    config::CONFIG,
    constants::*,
    controller::Controller,
    display::{self, StatusDisplay},
    http::Endpoint,
    input::Buttons,
    remote::HttpRemote,
    status::{self, STATUS},
    transport::TcpConnector,
    wifi::Wifi,
};

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

static RX_BUF: StaticCell<[u8; RX_BUFFER_SIZE]> = StaticCell::new();
static TX_BUF: StaticCell<[u8; TX_BUFFER_SIZE]> = StaticCell::new();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    init_logger(log::LevelFilter::Info);
    info!("Media remote v{}", VERSION);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    spawner.spawn(status_log().expect("Failed to spawn status log task"));

    let radio = RADIO.init(esp_radio::init().expect("Failed to initialise radio"));
    let wifi = Wifi::new(radio, peripherals.WIFI, Rng::new(), spawner)
        .expect("Failed to initialise WiFi");

    // Association runs in the background, carry on whatever its outcome
    Timer::after(Duration::from_millis(NETWORK_SETTLE_MS)).await;
    info!("WiFi was initiated");

    let i2c_config = hal::i2c::master::Config::default()
        .with_frequency(Rate::from_khz(DISPLAY_I2C_FREQUENCY_KHZ));

    // Held until the end of `main`, which never returns
    let _display = match I2c::new(peripherals.I2C1, i2c_config) {
        Ok(i2c) => {
            let i2c = i2c.with_sda(peripherals.GPIO21).with_scl(peripherals.GPIO22);
            StatusDisplay::new(display::new_ssd1306(i2c))
                .map_err(|e| warn!("Display init failed: {:?}", e))
                .ok()
        }
        Err(e) => {
            warn!("Display bus config failed: {:?}", e);
            None
        }
    };

    let input_config = InputConfig::default().with_pull(Pull::Up);
    let buttons = Buttons::new(
        Input::new(peripherals.GPIO25, input_config),
        Input::new(peripherals.GPIO27, input_config),
        Input::new(peripherals.GPIO26, input_config),
    );

    let connector = TcpConnector::new(
        wifi.stack,
        RX_BUF.init([0; RX_BUFFER_SIZE]),
        TX_BUF.init([0; TX_BUFFER_SIZE]),
    );
    let remote = HttpRemote::new(
        connector,
        Endpoint {
            host: CONFIG.server_hostname,
            port: CONFIG.server_port,
            api_path: CONFIG.api_path,
        },
    );

    info!("Polling buttons");
    Controller::new(buttons, remote).run().await
}

#[embassy_executor::task]
async fn status_log() {
    status::log_events(&STATUS).await
}
