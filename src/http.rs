//! Minimal HTTP/1.1 client for the controller API.
//!
//! One request per connection: the request asks the server to close the
//! connection, and the response is read until the message is complete, EOF,
//! or the diagnostic buffer is full.

use core::fmt::Write as _;

use embedded_io_async::{Read, Write};
use heapless::String;

use crate::command::Command;
use crate::constants::REQUEST_HEAD_MAX;

// The server expects this header even though the body is plain text
const CONTENT_TYPE: &str = "application/json";

const DEFAULT_PORT: u16 = 80;

#[derive(Debug)]
pub enum Error {
    RequestTooLong,
    Write,
    Read,
    MalformedResponse,
}

/// Where commands are posted to.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: u16,
    pub api_path: &'a str,
}

/// Status line and headers of the POST for `command`.
pub fn request_head(
    endpoint: &Endpoint<'_>,
    command: Command,
) -> Result<String<REQUEST_HEAD_MAX>, Error> {
    let mut head = String::new();

    write!(
        head,
        "POST {}/{} HTTP/1.1\r\nHost: {}",
        endpoint.api_path,
        command.name(),
        endpoint.host
    )
    .map_err(|_| Error::RequestTooLong)?;

    if endpoint.port != DEFAULT_PORT {
        write!(head, ":{}", endpoint.port).map_err(|_| Error::RequestTooLong)?;
    }

    write!(
        head,
        "\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        CONTENT_TYPE,
        command.body().len()
    )
    .map_err(|_| Error::RequestTooLong)?;

    Ok(head)
}

/// Sends one POST for `command` over `session` and returns the status code.
///
/// The response is read into `response` and its body logged at debug level.
/// Nothing is retried.
pub async fn post<S>(
    session: &mut S,
    endpoint: &Endpoint<'_>,
    command: Command,
    response: &mut [u8],
) -> Result<u16, Error>
where
    S: Read + Write,
{
    let head = request_head(endpoint, command)?;

    session
        .write_all(head.as_bytes())
        .await
        .map_err(|_| Error::Write)?;
    session
        .write_all(command.body().as_bytes())
        .await
        .map_err(|_| Error::Write)?;
    session.flush().await.map_err(|_| Error::Write)?;

    let received = read_response(session, response).await?;
    let response = &response[..received];

    let status = parse_status(response).ok_or(Error::MalformedResponse)?;

    if let Some(body_start) = find_header_end(response) {
        let body = &response[body_start..];
        if !body.is_empty() {
            log::debug!(
                "Response data: {}",
                core::str::from_utf8(body).unwrap_or("<binary>")
            );
        }
    }

    Ok(status)
}

// Reads until the message is complete, EOF or a full buffer. The message is
// complete once the headers and `Content-Length` body bytes are in, so a
// server keeping the connection open does not stall the caller. An error
// after some bytes arrived ends the response instead of failing it.
async fn read_response<S: Read>(session: &mut S, buf: &mut [u8]) -> Result<usize, Error> {
    let mut total_read = 0;
    let mut message_end = None;

    loop {
        if total_read == buf.len() || message_end.is_some_and(|end| total_read >= end) {
            break;
        }

        match session.read(&mut buf[total_read..]).await {
            Ok(0) => break,
            Ok(n) => total_read += n,
            Err(_) if total_read > 0 => break,
            Err(_) => return Err(Error::Read),
        }

        if message_end.is_none() {
            message_end = expected_length(&buf[..total_read]);
        }
    }

    Ok(total_read)
}

// Full message length once the headers are in, if the headers tell it.
fn expected_length(data: &[u8]) -> Option<usize> {
    let body_start = find_header_end(data)?;
    let head = &data[..body_start];

    if matches!(parse_status(head), Some(204 | 304)) {
        return Some(body_start);
    }

    content_length(head).map(|len| body_start.saturating_add(len))
}

/// Value of the `Content-Length` header, matched case-insensitively.
pub fn content_length(head: &[u8]) -> Option<usize> {
    let head = core::str::from_utf8(head).ok()?;

    head.split("\r\n").skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if !name.trim().eq_ignore_ascii_case("content-length") {
            return None;
        }
        let value = value.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse().ok()
    })
}

/// Status code from an `HTTP/1.x NNN reason` status line.
pub fn parse_status(response: &[u8]) -> Option<u16> {
    let line_end = response.iter().position(|&b| b == b'\r' || b == b'\n')?;
    let line = core::str::from_utf8(&response[..line_end]).ok()?;

    let mut parts = line.split(' ');
    if !parts.next()?.starts_with("HTTP/1.") {
        return None;
    }

    let code = parts.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Offset of the first body byte, just past the blank line ending the headers.
pub fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}
