pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod render;

use std::ffi::OsString;
use std::io::Write;

use anyhow::Context;
use clap::Parser;
use sprintboard_core::ClientConfig;
use tracing::{debug, info};

use crate::commands::{Confirm, Session, StdinConfirm};
use crate::http::HttpApi;
use crate::render::Renderer;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::Cli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting sprintboard CLI"
    );

    let config = config::resolve(&cli)?;
    debug!(?config, "resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut confirm = StdinConfirm;
    let renderer = Renderer::for_stdout(config.color);
    runtime.block_on(execute(
        cli.command,
        &config,
        renderer,
        &mut out,
        &mut confirm,
    ))?;
    out.flush().context("failed flushing stdout")?;
    Ok(())
}

/// Runs one command against the HTTP API
/// described by `config`.
pub async fn execute<W: Write>(
    command: cli::Command,
    config: &ClientConfig,
    renderer: Renderer,
    out: &mut W,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let api = HttpApi::new(&config.api_base_url, config.request_timeout())?;
    debug!(base = %api.routes().base(), "using task API");
    let mut session = Session::new(api, config, renderer, out, confirm)?;
    session.dispatch(command).await
}
