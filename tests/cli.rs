mod common;

use std::process::Command;
use common::Server;

fn httpclient() -> Command {
    Command::new(env!("CARGO_BIN_EXE_httpclient"))
}

#[test]
fn no_arguments_prints_usage() {
    let output = httpclient().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("httpclient [GET/POST] [URL]"));
}

#[test]
fn too_many_arguments_prints_usage() {
    let output = httpclient().args(&["GET", "http://localhost/", "extra"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("httpclient [GET/POST] [URL]"));
}

#[test]
fn single_argument_is_a_get() {
    let server = Server::reply(b"HTTP/1.1 200 OK\r\nContent-Length:2\r\n\r\nhi");
    let output = httpclient().arg(&server.url).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("HTTP/1.1 200 OK"));
    assert!(stdout.ends_with("200\nhi\n"));
    assert!(server.finish().request.starts_with("GET / HTTP/1.1\r\n"));
}

#[test]
fn method_then_url() {
    let server = Server::reply(b"HTTP/1.1 200 OK\r\n\r\nok");
    let output = httpclient().args(&["--quiet", "POST", server.url.as_str()]).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "200\nok\n");
    assert!(server.finish().request.starts_with("POST / HTTP/1.1\r\nHost:127.0.0.1\r\nContent-Length:0\r\n"));
}

#[test]
fn failures_exit_with_one() {
    let output = httpclient().arg("http:///no-host").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid url"));
}
