use std::process::ExitCode;

use clap::Parser;
use pmctl::adapter::inbound::cli::command::Cli;
use pmctl::adapter::inbound::cli::output::{self, OutputConfig};
use pmctl::adapter::inbound::cli::run;
use pmctl::infrastructure::config::Config;
use pmctl::infrastructure::ClientContext;
use pmctl::Error;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = u8::from(e.use_stderr());
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        output::color_enabled(&cli.color),
    ));

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    config.init_logging(cli.verbose);
    debug!(command = ?cli.command, "pmctl starting");

    let ctx = ClientContext::from_config(config);
    match run::execute(&cli.command, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &Error) -> ExitCode {
    debug!(error = %err, kind = err.kind(), "Command failed");
    if output::is_json() {
        output::json_error(err.kind(), &err.to_string());
    } else {
        output::error(&err.to_string());
    }
    ExitCode::FAILURE
}
