pub struct Config {
    // Device ID (used as DHCP hostname)
    pub device_id: &'static str,

    // Base path of the controller API, commands are appended as `/{command}`
    pub api_path: &'static str,

    // Media controller hostname (plain HTTP)
    pub server_hostname: &'static str,

    // Media controller port (usually 80)
    pub server_port: u16,

    // Wi-Fi pre-shared key (password)
    pub wifi_psk: &'static str,

    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));
