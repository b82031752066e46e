use std::process;
use std::time::Duration;
use anyhow::Context;
use log::LevelFilter;
use structopt::StructOpt;
use httpclient::{ Args, ClientConfig, HttpClient };

const USAGE: &'static str = "httpclient [GET/POST] [URL]\n";

#[derive(StructOpt, Debug)]
#[structopt(name = "httpclient", about = "Send a single GET or POST request over a raw TCP socket")]
struct Options {
    /// Seconds to wait for the server before giving up on a read or write
    #[structopt(long)]
    timeout: Option<f64>,

    /// Do not echo the raw reply
    #[structopt(short, long)]
    quiet: bool,

    /// Log connection details to stderr (repeat for more)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// [METHOD] URL
    #[structopt(name = "ARGS")]
    positional: Vec<String>,
}

impl Options {
    fn config(&self) -> ClientConfig {
        let timeout = self.timeout.filter(|t| t.is_finite() && *t > 0.0).map(Duration::from_secs_f64);
        ClientConfig { read_timeout: timeout, write_timeout: timeout, echo_reply: !self.quiet }
    }

    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn run(client: &HttpClient, method: &str, url: &str) -> anyhow::Result<()> {
    let response = client.command(url, method, Args::NoArgs)
        .with_context(|| format!("{} {} failed", method, url))?;
    println!("{}", response);
    Ok(())
}

fn main() {
    let options = Options::from_args();

    env_logger::Builder::from_default_env()
        .filter_level(options.level())
        .init();

    let (method, url) = match options.positional.as_slice() {
        [url] => ("GET", url.as_str()),
        [method, url] => (method.as_str(), url.as_str()),
        _ => {
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    let client = HttpClient::new(options.config());
    if let Err(e) = run(&client, method, url) {
        eprintln!("httpclient error: {:#}", e);
        process::exit(1);
    }
}
