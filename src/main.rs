use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

mod error;
mod option;
mod protocol;
mod serve;
mod server;

use crate::error::Phase;
use crate::option::ServerOption;
use crate::server::OneshotServer;

/// oneshot-http accepts a single TCP connection, answers it with a fixed
/// HTTP/1.1 response and exits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// optional JSON config file; the fixed 0.0.0.0:8080 binding is used without it
    #[arg(short, long)]
    pub config: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let opts = match args.config {
        Some(path) => match ServerOption::load(&path) {
            Ok(opts) => opts,
            Err(e) => {
                eprintln!("config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ServerOption::default(),
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(opts.log_level.as_str())).init();
    if let Ok(jsonstr) = serde_json::to_string_pretty(&opts) {
        debug!("options:\n{}", jsonstr);
    }

    let svc = match OneshotServer::new(&opts) {
        Ok(svc) => svc,
        Err(e) => {
            eprintln!("config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("server: starting on {}:{}", opts.listen_addr, opts.listen_port);
    match svc.bootstrap() {
        // write failures were already reported; the exchange still counts
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let phase = match e.phase() {
                Phase::Setup => "setup",
                Phase::Connection => "connection",
            };
            debug!("{} failed, exiting", phase);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
