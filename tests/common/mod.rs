//! A one-shot HTTP server for driving the client over a real socket.

#![allow(dead_code)]

use std::io::{ Read, Write };
use std::net::{ TcpListener, TcpStream };
use std::thread::{ self, JoinHandle };
use std::time::Duration;

pub struct Server {
    pub url: String,
    handle: JoinHandle<Exchange>,
}

/// What the server saw: the raw request and whether the client hung up afterwards.
pub struct Exchange {
    pub request: String,
    pub closed_by_client: bool,
}

impl Server {
    /// Accepts a single connection, reads one request, writes `reply` and closes.
    pub fn reply(reply: &'static [u8]) -> Self {
        Self::spawn(move |stream| {
            stream.write_all(reply).unwrap();
        })
    }

    /// Accepts a single connection and says nothing for `delay` before closing.
    pub fn silent(delay: Duration) -> Self {
        Self::spawn(move |_| thread::sleep(delay))
    }

    fn spawn<F: FnOnce(&mut TcpStream) + Send + 'static>(respond: F) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
            let request = read_request(&mut stream);
            respond(&mut stream);
            stream.shutdown(std::net::Shutdown::Write).unwrap_or(());

            let mut rest = Vec::new();
            let closed_by_client = matches!(stream.read_to_end(&mut rest), Ok(_));
            Exchange { request, closed_by_client }
        });

        Self { url, handle }
    }

    pub fn finish(self) -> Exchange {
        self.handle.join().unwrap()
    }
}

/// Reads the head and, when a `Content-Length` is announced, the body plus its trailing CRLF.
fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        let text = String::from_utf8_lossy(&buffer).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .split("\r\n")
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .map(|(_, value)| value.trim().parse::<usize>().unwrap());
            match length {
                None => return text,
                Some(length) if buffer.len() >= end + 4 + length + 2 => return text,
                Some(_) => {}
            }
        }

        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return String::from_utf8_lossy(&buffer).to_string(),
            Ok(size) => buffer.extend_from_slice(&chunk[..size]),
        }
    }
}

pub fn quiet() -> httpclient::ClientConfig {
    httpclient::ClientConfig { echo_reply: false, ..httpclient::ClientConfig::new() }
}
