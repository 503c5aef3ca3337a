//! Command implementations for the IBDx CLI

pub mod charts;
pub mod config;
pub mod export;
pub mod query;
pub mod targets;

use anyhow::Result;
use ibdx_core::{IbdxError, Session};
use ibdx_render::{render_message, SvgSurface};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::container::{run_renders, Container, RenderReport, RenderRequest};

/// Generate the session tables for this invocation
pub fn build_session(config: &Config) -> Session {
    let generator = config.generator_config();
    log::debug!(
        "Building session with seed {:?} ({:?} strategy)",
        generator.session_seed,
        generator.strategy
    );
    Session::new(generator)
}

/// Draw a chart into a fresh SVG surface and serialize it
pub fn svg_document<F>(config: &Config, chart: &str, draw: F) -> String
where
    F: FnOnce(&mut SvgSurface),
{
    let mut surface = SvgSurface::new(config.export_config(chart));
    draw(&mut surface);
    surface.to_svg_string()
}

/// SVG carrying only a status banner, for not-found states
pub fn status_document(config: &Config, chart: &str, message: &str) -> String {
    let style = config.render_style();
    svg_document(config, chart, |surface| render_message(surface, &style, message))
}

/// Queue documents behind the configured render delay
pub fn submit(config: &Config, requests: Vec<RenderRequest>) -> Result<RenderReport> {
    let delay = Duration::from_millis(config.general.delay_ms);
    log::debug!("Submitting {} render request(s), delay {:?}", requests.len(), delay);
    run_renders(requests, delay)
}

pub fn single(config: &Config, chart: &str, out: &Path, document: String) -> Result<RenderReport> {
    submit(config, vec![RenderRequest::new(chart, Container::new(out), document)])
}

/// Print and log a lookup miss; other errors pass through
pub fn report_miss(err: IbdxError) -> Result<String> {
    if err.is_lookup_miss() {
        let status = err.status_line();
        log::warn!("{}", status);
        eprintln!("{}", status);
        Ok(status)
    } else {
        Err(crate::error::CliError::from(err).into())
    }
}
