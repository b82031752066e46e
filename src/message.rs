use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display, Formatter};
use url::form_urlencoded;
use crate::def::*;
use crate::error::{Error, Result};

const NEWLINE: &'static str = "\r\n";
const HEAD_DELIMITER: &'static str = "\r\n\r\n";

/// What `parse_body` reports when the response has no header/body delimiter.
pub const BODY_NOT_FOUND: i64 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Parameter<'a> {
    pub fn new<N: Into<Cow<'a, str>>, V: Into<Cow<'a, str>>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn parse_many(encoded: &'a str) -> Vec<Self> {
        form_urlencoded::parse(encoded.as_bytes())
            .map(|(name, value)| Self { name, value })
            .collect()
    }

    pub fn construct_many(parameters: &[Self]) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(parameters.iter().map(|p| (&p.name, &p.value)))
            .finish()
    }
}

/// Key/value arguments of a request: the query string of a GET or the form body of a POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Args {
    NoArgs,
    Mapping(Vec<Parameter<'static>>),
}

impl Args {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where I: IntoIterator<Item = (K, V)>, K: Into<String>, V: Into<String> {
        Args::Mapping(pairs.into_iter().map(|(k, v)| Parameter::new(k.into(), v.into())).collect())
    }

    /// `None` when there is no mapping at all; an empty mapping still encodes to `Some("")`.
    pub fn encode(&self) -> Option<String> {
        match self {
            Args::NoArgs => None,
            Args::Mapping(parameters) => Some(Parameter::construct_many(parameters)),
        }
    }
}

impl Default for Args {
    fn default() -> Self { Args::NoArgs }
}

impl<K: Into<String>, V: Into<String>> From<Option<HashMap<K, V>>> for Args {
    fn from(mapping: Option<HashMap<K, V>>) -> Self {
        mapping.map_or(Args::NoArgs, Args::from_pairs)
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Args {
    fn from(mapping: HashMap<K, V>) -> Self {
        Args::from_pairs(mapping)
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Args {
    fn from(mapping: BTreeMap<K, V>) -> Self {
        Args::from_pairs(mapping)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub location: String,
    pub query: Option<String>,
}

impl Target {
    pub fn has_query(&self) -> bool {
        self.query.as_ref().map_or(false, |q| !q.is_empty())
    }
}

impl Default for Target {
    fn default() -> Self {
        Self { location: "/".to_string(), query: None }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.query {
            Some(query) if !query.is_empty() => write!(f, "{}?{}", self.location, query),
            _ => write!(f, "{}", self.location),
        }
    }
}

pub struct Request<'a> {
    pub method: Method,
    pub target: &'a Target,
    pub host: &'a str,
    pub body: Option<String>,
}

impl<'a> Request<'a> {
    pub fn get(target: &'a Target, host: &'a str) -> Self {
        Self { method: Method::GET, target, host, body: None }
    }

    pub fn post(target: &'a Target, host: &'a str, args: &Args) -> Self {
        Self { method: Method::POST, target, host, body: Some(args.encode().unwrap_or_default()) }
    }

    pub fn headers(&self) -> Vec<Header> {
        match &self.body {
            None => vec![
                Header::new("Host", self.host),
                Header::from(Connection::Close),
            ],
            Some(body) => vec![
                Header::compact("Host", self.host),
                Header::compact("Content-Length", body.len().to_string()),
                Header::from(ContentType::FormUrlEncoded),
                Header::from(Connection::Close),
            ],
        }
    }

    pub fn construct(&self) -> Vec<u8> {
        let mut request = format!("{} {} {}{}", self.method, self.target, VERSION, NEWLINE);
        for header in self.headers() {
            request.push_str(&header.construct());
            request.push_str(NEWLINE);
        }
        request.push_str(NEWLINE);
        if let Some(body) = &self.body {
            request.push_str(body);
            request.push_str(NEWLINE);
        }

        request.into_bytes()
    }
}

/// The part of a raw response after the head. `Missing` stands in for the failed delimiter
/// search and prints as that marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Found(String),
    Missing,
}

impl Body {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Body::Found(body) => Some(body),
            Body::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Body::Missing)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Body::Found(body) => write!(f, "{}", body),
            Body::Missing => write!(f, "{}", BODY_NOT_FOUND),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Header lines between the status line and the first blank line. Lines without a colon are
    /// skipped.
    pub fn parse(raw: &str) -> Self {
        let head = raw.find(HEAD_DELIMITER).map_or(raw, |end| &raw[..end]);
        Self(head.split(NEWLINE)
            .skip(1)
            .filter_map(Header::parse)
            .map(|h| (h.name.into_owned(), h.value.into_owned()))
            .collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn parse_code(raw: &str) -> Result<u16> {
    let code = raw.split(' ').nth(1).ok_or(Error::MalformedResponse("missing status code"))?;
    code.trim().parse::<u16>().map_err(|_| Error::MalformedResponse("status code is not a number"))
}

pub fn parse_body(raw: &str) -> Body {
    match raw.find(HEAD_DELIMITER) {
        Some(index) => Body::Found(raw[index + HEAD_DELIMITER.len()..].to_string()),
        None => Body::Missing,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub code: u16,
    pub body: Body,
    pub headers: Headers,
}

impl HttpResponse {
    pub fn new(code: u16, body: Body) -> Self {
        Self { code, body, headers: Headers::default() }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self { code: parse_code(raw)?, body: parse_body(raw), headers: Headers::parse(raw) })
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new(200, Body::Found(String::new()))
    }
}

impl Display for HttpResponse {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}\n{}", self.code, self.body)
    }
}
