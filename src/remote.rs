use core::fmt::Debug;

use embedded_io_async::{Read, Write};
use log::{info, warn};

use crate::command::Command;
use crate::constants::RESPONSE_BUFFER_SIZE;
use crate::controller::CommandSink;
use crate::http::{self, Endpoint};

/// Opens one connection per request to the media controller.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session<'a>: Read + Write
    where
        Self: 'a;
    type Error: Debug;

    async fn connect(&mut self, host: &str, port: u16) -> Result<Self::Session<'_>, Self::Error>;

    /// Shuts the session down, whatever state the exchange left it in.
    async fn close(session: Self::Session<'_>);
}

#[derive(Debug)]
pub enum Error<E> {
    #[allow(dead_code)]
    Connect(E),
    #[allow(dead_code)]
    Http(http::Error),
}

/// Posts commands to the media controller, one connection per command.
pub struct HttpRemote<'e, C> {
    connector: C,
    endpoint: Endpoint<'e>,
    response: [u8; RESPONSE_BUFFER_SIZE],
}

impl<'e, C: Connector> HttpRemote<'e, C> {
    pub fn new(connector: C, endpoint: Endpoint<'e>) -> Self {
        Self {
            connector,
            endpoint,
            response: [0; RESPONSE_BUFFER_SIZE],
        }
    }

    async fn post(&mut self, command: Command) -> Result<u16, Error<C::Error>> {
        let mut session = self
            .connector
            .connect(self.endpoint.host, self.endpoint.port)
            .await
            .map_err(Error::Connect)?;

        let result = http::post(&mut session, &self.endpoint, command, &mut self.response).await;
        C::close(session).await;

        result.map_err(Error::Http)
    }
}

impl<C: Connector> CommandSink for HttpRemote<'_, C> {
    async fn send(&mut self, command: Command) {
        match self.post(command).await {
            Ok(status) => info!("POST {}/{} -> {}", self.endpoint.api_path, command, status),
            Err(e) => warn!(
                "POST {}/{} failed: {:?}",
                self.endpoint.api_path, command, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use embassy_futures::block_on;
    use embedded_io_async::{ErrorKind, ErrorType};
    use std::rc::Rc;

    const ENDPOINT: Endpoint<'static> = Endpoint {
        host: "media.local",
        port: 80,
        api_path: "/api/media",
    };

    #[derive(Debug)]
    struct Refused;

    /// Shared view of what the connector saw, kept after the remote is built.
    #[derive(Default)]
    struct Log {
        connects: Cell<usize>,
        closes: Cell<usize>,
        sent: RefCell<Vec<u8>>,
    }

    struct FakeConnector {
        log: Rc<Log>,
        refuse: bool,
        fail_write: bool,
        reply: &'static [u8],
    }

    struct FakeSession<'a> {
        log: &'a Log,
        fail_write: bool,
        reply: &'static [u8],
    }

    impl ErrorType for FakeSession<'_> {
        type Error = ErrorKind;
    }

    impl Read for FakeSession<'_> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
            let n = self.reply.len().min(buf.len());
            buf[..n].copy_from_slice(&self.reply[..n]);
            self.reply = &self.reply[n..];
            Ok(n)
        }
    }

    impl Write for FakeSession<'_> {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
            if self.fail_write {
                return Err(ErrorKind::ConnectionReset);
            }
            self.log.sent.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    impl Connector for FakeConnector {
        type Session<'a> = FakeSession<'a>;
        type Error = Refused;

        async fn connect(&mut self, host: &str, port: u16) -> Result<FakeSession<'_>, Refused> {
            assert_eq!((host, port), (ENDPOINT.host, ENDPOINT.port));
            self.log.connects.set(self.log.connects.get() + 1);
            if self.refuse {
                return Err(Refused);
            }
            Ok(FakeSession {
                log: &*self.log,
                fail_write: self.fail_write,
                reply: self.reply,
            })
        }

        async fn close(session: Self::Session<'_>) {
            session.log.closes.set(session.log.closes.get() + 1);
        }
    }

    fn remote(refuse: bool, fail_write: bool) -> (HttpRemote<'static, FakeConnector>, Rc<Log>) {
        let log = Rc::new(Log::default());
        let connector = FakeConnector {
            log: log.clone(),
            refuse,
            fail_write,
            reply: b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n",
        };
        (HttpRemote::new(connector, ENDPOINT), log)
    }

    #[test]
    fn each_press_opens_and_closes_one_connection() {
        let (mut remote, log) = remote(false, false);

        block_on(remote.send_next());

        assert_eq!(log.connects.get(), 1);
        assert_eq!(log.closes.get(), 1);
        let sent = log.sent.borrow();
        assert!(sent.starts_with(b"POST /api/media/next HTTP/1.1\r\n"));
        assert!(sent.ends_with(b"\r\n\r\nnext"));
    }

    #[test]
    fn refused_connection_is_swallowed() {
        let (mut remote, log) = remote(true, false);

        block_on(remote.send_prev());

        assert_eq!(log.connects.get(), 1);
        assert_eq!(log.closes.get(), 0);
        assert!(log.sent.borrow().is_empty());
    }

    #[test]
    fn failed_request_still_closes_the_connection() {
        let (mut remote, log) = remote(false, true);

        block_on(remote.send_play());

        assert_eq!(log.connects.get(), 1);
        assert_eq!(log.closes.get(), 1);
    }

    #[test]
    fn failure_does_not_stick_to_the_next_press() {
        let (mut remote, log) = remote(true, false);
        block_on(remote.send_prev());

        remote.connector.refuse = false;
        block_on(remote.send_prev());

        assert_eq!(log.connects.get(), 2);
        assert_eq!(log.closes.get(), 1);
        assert!(log.sent.borrow().starts_with(b"POST /api/media/prev "));
    }
}
