use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
}

impl Method {
    /// Only the exact string "POST" selects POST, every other command falls back to GET.
    pub fn from_command(command: &str) -> Self {
        match command {
            "POST" => Method::POST,
            _ => Method::GET,
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
        }
    }
}

pub const VERSION: &'static str = "HTTP/1.1";

pub struct Header<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
    compact: bool,
}

impl<'a> Header<'a> {
    pub fn new<N: Into<Cow<'a, str>>, V: Into<Cow<'a, str>>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into(), compact: false }
    }

    /// A header written without the space after the colon (`Host:example.com`).
    pub fn compact<N: Into<Cow<'a, str>>, V: Into<Cow<'a, str>>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into(), compact: true }
    }

    pub fn from<T: ToHeader>(to_header: T) -> Self {
        Self::new(T::name(), to_header.value())
    }

    pub fn parse(header: &'a str) -> Option<Self> {
        match header.find(':') {
            Some(colon_index) if colon_index > 0 =>
                Some(Self::new(&header[..colon_index], header[(colon_index + 1)..].trim())),
            _ => None
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn construct(&self) -> String {
        if self.compact {
            format!("{}:{}", self.name, self.value)
        } else {
            format!("{}: {}", self.name, self.value)
        }
    }
}

impl<'a> Display for Header<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.construct())
    }
}

impl<'a> fmt::Debug for Header<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self.construct())
    }
}

pub trait ToHeader {
    fn name() -> &'static str;
    fn value(&self) -> &'static str;
}

const CONNECTION_CLOSE: &'static str = "close";

/// Every request asks the server to hang up once the response is written, since that is the only
/// end-of-response signal the transport understands.
pub enum Connection {
    Close,
}

impl ToHeader for Connection {
    fn name() -> &'static str { "Connection" }
    fn value(&self) -> &'static str {
        match self {
            Connection::Close => CONNECTION_CLOSE,
        }
    }
}

const CONTENT_TYPE_FORM: &'static str = "application/x-www-form-urlencoded";

pub enum ContentType {
    FormUrlEncoded,
}

impl ToHeader for ContentType {
    fn name() -> &'static str { "Content-Type" }
    fn value(&self) -> &'static str {
        match self {
            ContentType::FormUrlEncoded => CONTENT_TYPE_FORM,
        }
    }
}
