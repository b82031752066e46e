use std::io::{ Read, Write };
use std::net::{ Shutdown, TcpStream };
use std::time::Duration;
use lazy_static::lazy_static;
use log::{ debug, trace };
use regex::Regex;
use crate::def::*;
use crate::error::{ Error, Result };
use crate::message::*;

pub const PORT_HTTP: u16 = 80;
const CHUNK_SIZE: usize = 1024;

lazy_static! {
    static ref URI_REGEX: Regex = Regex::new(r"(?ix)
        ^(?:[a-z][a-z0-9+.\-]*://)?
        (?:[^@/?\#\s]*@)?
        (?P<host>\[[0-9a-f:.]*\]|[^:/?\#\s\[\]@]*)
        (?::(?P<port>[0-9]*))?
        (?P<path>/[^?\#\s]*)?
        (?:\?(?P<query>[^\#\s]*))?
        (?:\#\S*)?$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl Address {
    pub fn new<S: Into<String>>(host: S, port: Option<u16>) -> Self {
        Self { host: host.into(), port: port.unwrap_or(PORT_HTTP) }
    }

    pub fn to_string(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// A URL split into what a request needs: where to connect and what to ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uri {
    pub address: Address,
    pub target: Target,
}

impl Uri {
    pub fn parse(uri: &str) -> Result<Self> {
        let capture = URI_REGEX.captures(uri.trim()).ok_or_else(|| Error::invalid_url(uri, "unrecognised url"))?;

        let host = capture["host"].trim_start_matches('[').trim_end_matches(']').to_lowercase();
        if host.is_empty() {
            return Err(Error::invalid_url(uri, "no host"));
        }

        let port = match capture.name("port").map(|p| p.as_str()) {
            None | Some("") => None,
            Some(port) => Some(port.parse::<u16>().map_err(|_| Error::invalid_url(uri, "port out of range"))?),
        };

        let mut target = Target::default();
        if let Some(path) = capture.name("path") {
            target.location = path.as_str().to_string();
        }
        target.query = capture.name("query").map(|q| q.as_str().to_string());

        Ok(Self { address: Address::new(host, port), target })
    }

    /// Attaches encoded `args` as the query, unless the URL already brought its own.
    pub fn merge_query(&mut self, args: &Args) {
        if self.target.has_query() { return }
        if let Some(query) = args.encode() {
            self.target.query = Some(query);
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
    /// Print every raw reply to stdout as it arrives.
    pub echo_reply: bool,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self { read_timeout: None, write_timeout: None, echo_reply: true }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One live TCP connection. Dropping it shuts the socket down, so the connection is released
/// exactly once whichever way the request ends.
pub struct Socket {
    stream: TcpStream,
    address: String,
}

impl Socket {
    pub fn connect(address: &Address, config: &ClientConfig) -> Result<Self> {
        let name = address.to_string();
        let connection_error = |source| Error::Connection { address: name.clone(), source };
        let stream = TcpStream::connect((address.host.as_str(), address.port)).map_err(connection_error)?;
        stream.set_read_timeout(config.read_timeout).map_err(connection_error)?;
        stream.set_write_timeout(config.write_timeout).map_err(connection_error)?;
        debug!("connected to {}", name);

        Ok(Self { stream, address: name })
    }

    pub fn send_all(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data).map_err(Error::transport("sending"))?;
        self.stream.flush().map_err(Error::transport("sending"))?;
        debug!("sent {} bytes to {}", data.len(), self.address);
        Ok(())
    }

    /// Reads until the peer closes its side, then decodes the whole reply as utf-8.
    pub fn receive_all(&mut self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(size) => buffer.extend_from_slice(&chunk[..size]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::transport("receiving")(e)),
            }
        }
        debug!("received {} bytes from {}", buffer.len(), self.address);

        Ok(String::from_utf8(buffer)?)
    }

    pub fn close(self) {
        drop(self)
    }
}

impl Drop for Socket {
    fn drop(&mut self) {
        // the peer usually hung up already
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!("closed connection to {}", self.address);
    }
}

/// Blocking HTTP/1.1 client. Holds nothing but its configuration, every call opens and closes
/// its own connection.
#[derive(Clone, Debug)]
pub struct HttpClient {
    config: ClientConfig,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(ClientConfig::new())
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, url: &str, args: Args) -> Result<HttpResponse> {
        let mut uri = Uri::parse(url)?;
        uri.merge_query(&args);
        let request = Request::get(&uri.target, &uri.address.host);
        self.send(&uri.address, &request)
    }

    pub fn post(&self, url: &str, args: Args) -> Result<HttpResponse> {
        let uri = Uri::parse(url)?;
        let request = Request::post(&uri.target, &uri.address.host, &args);
        self.send(&uri.address, &request)
    }

    pub fn command(&self, url: &str, command: &str, args: Args) -> Result<HttpResponse> {
        match Method::from_command(command) {
            Method::POST => self.post(url, args),
            Method::GET => self.get(url, args),
        }
    }

    fn send(&self, address: &Address, request: &Request) -> Result<HttpResponse> {
        let mut socket = Socket::connect(address, &self.config)?;
        trace!("{} {} -> {}", request.method, request.target, address.to_string());
        socket.send_all(&request.construct())?;
        let reply = socket.receive_all()?;
        let response = HttpResponse::parse(&reply)?;

        if self.config.echo_reply {
            println!("{}", reply);
        }
        socket.close();

        Ok(response)
    }
}
