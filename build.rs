use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

const CONFIG_FILE: &str = "cfg.toml";
const EXAMPLE_CONFIG_FILE: &str = "cfg.toml.example";

#[derive(Deserialize)]
struct RawConfig {
    device_id: String,
    wifi_ssid: String,
    wifi_psk: String,
    server_hostname: String,
    server_port: u16,
    api_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed={CONFIG_FILE}");
    println!("cargo:rerun-if-changed={EXAMPLE_CONFIG_FILE}");

    // Firmware images need the esp-hal linker script
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg=-Tlinkall.x");
    }

    let config_file = if Path::new(CONFIG_FILE).exists() {
        CONFIG_FILE
    } else {
        println!("cargo:warning={CONFIG_FILE} not found, falling back to {EXAMPLE_CONFIG_FILE}");
        EXAMPLE_CONFIG_FILE
    };

    // Read and parse
    let toml_str = fs::read_to_string(config_file)?;
    let raw: RawConfig = toml::from_str(&toml_str)?;

    if !raw.api_path.starts_with('/') || raw.api_path.ends_with('/') {
        return Err(format!(
            "api_path must start with '/' and have no trailing '/', got {:?}",
            raw.api_path
        )
        .into());
    }
    if raw.device_id.len() > 32 {
        return Err(format!("device_id is limited to 32 bytes, got {}", raw.device_id.len()).into());
    }

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            device_id: {id:?},
            api_path: {path:?},
            server_hostname: {host:?},
            server_port: {port},
            wifi_psk: {psk:?},
            wifi_ssid: {ssid:?},
        }};
    "#,
        id = raw.device_id,
        path = raw.api_path,
        host = raw.server_hostname,
        port = raw.server_port,
        psk = raw.wifi_psk,
        ssid = raw.wifi_ssid,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
