use embassy_net::{
    dns::{DnsQueryType, Error as DNSError},
    tcp::{ConnectError, TcpSocket},
    Stack,
};
use embassy_time::Duration;
use embedded_io_async::{ErrorType, Read, Write};

use crate::constants::{RX_BUFFER_SIZE, SOCKET_TIMEOUT_SECS, TX_BUFFER_SIZE};
use crate::remote::Connector;

#[derive(Debug)]
pub enum Error {
    #[allow(dead_code)]
    DNSQueryFailed(DNSError),
    DNSLookupFailed,
    #[allow(dead_code)]
    SocketConnectionError(ConnectError),
}

/// Plain TCP connection, opened for a single request.
pub struct Transport<'a> {
    socket: TcpSocket<'a>,
}

impl<'a> Transport<'a> {
    pub async fn connect(
        stack: Stack<'static>,
        rx_buffer: &'a mut [u8],
        tx_buffer: &'a mut [u8],
        hostname: &str,
        port: u16,
    ) -> Result<Self, Error> {
        let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(SOCKET_TIMEOUT_SECS)));

        let addr = stack
            .dns_query(hostname, DnsQueryType::A)
            .await
            .map_err(Error::DNSQueryFailed)?
            .first()
            .copied()
            .ok_or(Error::DNSLookupFailed)?;

        log::debug!("Connecting TCP socket to {}:{}", hostname, port);
        socket
            .connect((addr, port))
            .await
            .map_err(Error::SocketConnectionError)?;

        Ok(Self { socket })
    }

    /// Sends FIN and waits for outstanding data to go out.
    pub async fn close(mut self) {
        self.socket.close();
        if let Err(e) = self.socket.flush().await {
            log::debug!("Flush on close failed: {:?}", e);
        }
    }
}

impl ErrorType for Transport<'_> {
    type Error = embassy_net::tcp::Error;
}

impl Read for Transport<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.socket.read(buf).await
    }
}

impl Write for Transport<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.socket.write(buf).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.socket.flush().await
    }
}

/// Opens a [`Transport`] per request, reusing one pair of socket buffers.
pub struct TcpConnector {
    stack: Stack<'static>,
    rx_buffer: &'static mut [u8; RX_BUFFER_SIZE],
    tx_buffer: &'static mut [u8; TX_BUFFER_SIZE],
}

impl TcpConnector {
    pub fn new(
        stack: Stack<'static>,
        rx_buffer: &'static mut [u8; RX_BUFFER_SIZE],
        tx_buffer: &'static mut [u8; TX_BUFFER_SIZE],
    ) -> Self {
        Self {
            stack,
            rx_buffer,
            tx_buffer,
        }
    }
}

impl Connector for TcpConnector {
    type Session<'a> = Transport<'a>;
    type Error = Error;

    async fn connect(&mut self, host: &str, port: u16) -> Result<Transport<'_>, Error> {
        Transport::connect(
            self.stack,
            &mut self.rx_buffer[..],
            &mut self.tx_buffer[..],
            host,
            port,
        )
        .await
    }

    async fn close(session: Self::Session<'_>) {
        session.close().await
    }
}
