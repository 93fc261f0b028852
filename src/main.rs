//! CLI entry point: JSON request on stdin, JSON report on stdout.

use std::io::Read;

use vypush::error::Error;
use vypush::{ApplyRequest, Report, SshConfig, SshSession, pipeline, platform};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the report.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let report = run().await;
    println!("{}", report.to_json());
    std::process::exit(report.exit_code());
}

async fn run() -> Report {
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        return Report::failure(&Error::InvalidInput(e.to_string()));
    }

    let request = match ApplyRequest::from_json(&input) {
        Ok(request) => request,
        Err(e) => return Report::failure(&e),
    };

    if let Err(e) = request.validate() {
        return Report::failure(&e);
    }

    let config = SshConfig::with_password(
        request.host.clone(),
        request.port(),
        request.username.clone(),
        request.password(),
    );

    // No session exists yet on this path, so no logs are reported.
    let session = match SshSession::open(&config, platform::vyos()).await {
        Ok(session) => session,
        Err(e) => return Report::failure(&Error::Connect(e)),
    };

    pipeline::execute(&request, session).await
}
