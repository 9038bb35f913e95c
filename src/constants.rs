/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of the heap in DRAM, needed by the radio driver
pub const HEAP_SIZE: usize = 72 * 1024;

/// Size of the TCP socket receive buffer
pub const RX_BUFFER_SIZE: usize = 1536;
/// Size of the TCP socket transmit buffer
pub const TX_BUFFER_SIZE: usize = 1024;

/// Bytes of the HTTP response kept for diagnostics, the rest is not read
pub const RESPONSE_BUFFER_SIZE: usize = 512;
/// Maximum length of the HTTP request line and headers
pub const REQUEST_HEAD_MAX: usize = 256;

/// Timeout applied to every TCP socket operation
pub const SOCKET_TIMEOUT_SECS: u64 = 10;

/// Number of sockets in the network stack (DHCP, DNS and the request socket)
pub const STACK_SOCKETS: usize = 3;

/// Interval between two samples of the buttons
pub const POLL_INTERVAL_MS: u64 = 10;

/// Time given to the Wi-Fi association before the rest of the device starts
pub const NETWORK_SETTLE_MS: u64 = 2000;

/// Pending lifecycle notifications before new ones are dropped
pub const STATUS_CHANNEL_CAPACITY: usize = 8;

/// I2C clock of the display bus
pub const DISPLAY_I2C_FREQUENCY_KHZ: u32 = 100;

/// Label shown once the device is up
pub const READY_LABEL: &str = "READY";
/// Top-left corner of the ready label, in pixels
pub const READY_POSITION: (i32, i32) = (70, 10);
