//! Application orchestration layer
//!
//! Wires the phases of a session together: concurrent indexing into a catalog, the
//! summary, then the interactive navigation loop. The loop itself is synchronous and
//! runs on a blocking thread, fed by a stdin reader thread and a Ctrl+C listener.

use crate::config::PagerConfig;
use crate::discovery::Discovered;
use crate::error::{PagerError, Result};
use crate::index::{Aggregator, Catalog};
use crate::navigation::{
    spawn_interrupt_listener, spawn_stdin_thread, ChannelSource, CommandSource,
    NavigationController,
};
use crate::render::{render_summary, PageReader, Palette};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Nothing to show: no files, or the filter matched nothing anywhere
    EmptyResult,
    /// Navigation ran until input ended or was interrupted
    Closed,
}

/// Application orchestrator - owns configuration and presentation settings
pub struct Application {
    config: PagerConfig,
    palette: Palette,
}

impl Application {
    /// Validate the configuration and build the application.
    pub fn new(config: PagerConfig) -> Result<Self> {
        config.validate()?;
        let palette = Palette::for_color_setting(config.no_color);
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Index the discovered files concurrently into a catalog.
    pub async fn build_catalog(&self, discovered: Discovered) -> Result<Catalog> {
        let aggregator = Aggregator::new(self.config.page_size, Arc::clone(&self.config.filter))
            .with_single_file(discovered.single_file);
        aggregator.build_catalog(discovered.files).await
    }

    /// Run a full interactive session on stdin/stdout.
    pub async fn run(&self, discovered: Discovered) -> Result<SessionOutcome> {
        let catalog = self.build_catalog(discovered).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let interrupt = spawn_interrupt_listener(&tx);
        spawn_stdin_thread(tx);

        let outcome = self
            .run_session(catalog, ChannelSource::new(rx), std::io::stdout())
            .await;
        interrupt.abort();
        outcome
    }

    /// Present `catalog` on `out` and navigate it with commands from `source`.
    ///
    /// Returns once the source ends or is interrupted.
    pub async fn run_session<S, W>(
        &self,
        catalog: Catalog,
        mut source: S,
        mut out: W,
    ) -> Result<SessionOutcome>
    where
        S: CommandSource + Send + 'static,
        W: Write + Send + 'static,
    {
        writeln!(
            out,
            "{}\n",
            self.palette
                .info("Welcome to rlpager. Paginate and filter log files of any size.")
        )?;

        if catalog.is_empty() {
            for failure in catalog.failures() {
                log::warn!("{}: {}", failure.path.display(), failure.reason);
            }
            writeln!(out, "{}", self.palette.info("Sorry. Nothing to show here!"))?;
            out.flush()?;
            return Ok(SessionOutcome::EmptyResult);
        }

        if catalog.len() > 1 || !catalog.failures().is_empty() {
            writeln!(
                out,
                "{}",
                render_summary(&catalog, self.config.filter.is_active(), &self.palette)
            )?;
        }
        out.flush()?;

        let reader = PageReader::from_config(&self.config, self.palette.clone());
        let palette = self.palette.clone();
        let initial_page = self.config.initial_page;

        let session = tokio::task::spawn_blocking(move || -> Result<()> {
            let mut controller =
                NavigationController::start(&catalog, &reader, palette, initial_page, out)?;
            controller.run(&mut source)
        })
        .await;

        match session {
            Ok(result) => result.map(|()| SessionOutcome::Closed),
            Err(join_err) => Err(PagerError::other(format!(
                "navigation task failed: {}",
                join_err
            ))),
        }
    }
}
