//! A small HTTP/1.1 client written directly against `TcpStream`: requests are serialized by hand,
//! replies are read until the server hangs up and then picked apart as text.

pub mod def;
pub mod error;
pub mod message;
pub mod http;

pub use crate::def::Method;
pub use crate::error::{ Error, Result };
pub use crate::http::{ Address, ClientConfig, HttpClient, Socket, Uri };
pub use crate::message::{ parse_body, parse_code, Args, Body, Headers, HttpResponse, Parameter };
