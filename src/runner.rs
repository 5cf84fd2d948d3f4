//! Command Runner
//!
//! Drives the scripted interaction against the harness: randomly enter
//! paused (live toggled) mode, push a batch of random slider values, then
//! either leave paused mode again or reset all views.

use std::time::Duration;

use log::{info, debug};
use rand::Rng;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::command::{UiCommand, SLIDER_MAX};
use crate::connection::{Connection, ConnectionConfig, Endpoint};
use crate::error::Result;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Harness address
    pub endpoint: Endpoint,
    pub connection: ConnectionConfig,
    /// View whose time filter and data signal are addressed
    pub view: String,
    /// Top-level loop iterations
    pub iterations: usize,
    /// Slider commands per iteration
    pub sliders_per_iteration: usize,
    /// Pause after each slider command
    pub slider_delay: Duration,
    /// Pause after a live toggle or view reset
    pub action_delay: Duration,
    /// Delay wait condition attached to slider commands
    pub slider_wait: Duration,
    /// Signal timeout attached to live toggles
    pub live_wait: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::new("localhost", 27960),
            connection: ConnectionConfig::default(),
            view: "ScatterPlotView0".to_string(),
            iterations: 5,
            sliders_per_iteration: 10,
            slider_delay: Duration::from_secs(5),
            action_delay: Duration::from_secs(5),
            slider_wait: Duration::from_secs(30),
            live_wait: Duration::from_secs(10),
        }
    }
}

/// What a completed run sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: usize,
    pub slider_commands: usize,
    pub live_toggles: usize,
    pub view_resets: usize,
}

impl RunSummary {
    pub fn total_commands(&self) -> usize {
        self.slider_commands + self.live_toggles + self.view_resets
    }
}

/// Scripted command runner
///
/// The random source decides the coin flips and slider values, so a
/// seeded generator reproduces a run exactly.
pub struct Runner<R> {
    config: RunnerConfig,
    rng: R,
}

impl<R: Rng> Runner<R> {
    pub fn new(config: RunnerConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Send `count` random slider values, pausing `delay` after each
    pub async fn send_slider_values<S>(
        &mut self,
        conn: &mut Connection<S>,
        count: usize,
        delay: Duration,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        for i in 0..count {
            let value = self.rng.gen_range(0..SLIDER_MAX);
            debug!("Slider {}/{} -> {}", i + 1, count, value);
            let cmd = UiCommand::slider_set(&self.config.view, value, self.config.slider_wait);
            conn.exchange(&cmd).await?;
            pause(delay).await;
        }
        Ok(())
    }

    /// Press the live button and wait for the view to reload
    pub async fn toggle_live_mode<S>(&mut self, conn: &mut Connection<S>) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("⏯  Toggling live mode");
        let cmd = UiCommand::live_toggle(&self.config.view, self.config.live_wait);
        conn.exchange(&cmd).await?;
        pause(self.config.action_delay).await;
        Ok(())
    }

    /// Trigger the "Reset Views" menu action
    pub async fn reset_views<S>(&mut self, conn: &mut Connection<S>) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("🔄 Resetting views");
        conn.exchange(&UiCommand::reset_views()).await?;
        pause(self.config.action_delay).await;
        Ok(())
    }

    /// Connect to the configured endpoint and run the script once
    pub async fn run(&mut self) -> Result<RunSummary> {
        let conn = Connection::connect(&self.config.endpoint, self.config.connection.clone()).await?;
        self.run_connection(conn).await
    }

    /// Run the script over an already established stream
    pub async fn run_on<S>(&mut self, stream: S) -> Result<RunSummary>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let conn = Connection::from_stream(stream, self.config.connection.clone());
        self.run_connection(conn).await
    }

    async fn run_connection<S>(&mut self, mut conn: Connection<S>) -> Result<RunSummary>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut summary = RunSummary::default();
        let count = self.config.sliders_per_iteration;
        let delay = self.config.slider_delay;

        for iteration in 0..self.config.iterations {
            info!("▶ Iteration {}/{}", iteration + 1, self.config.iterations);

            let paused = self.rng.gen_bool(0.5);
            if paused {
                self.toggle_live_mode(&mut conn).await?;
                summary.live_toggles += 1;
            }

            self.send_slider_values(&mut conn, count, delay).await?;
            summary.slider_commands += count;

            if paused {
                if self.rng.gen_bool(0.5) {
                    self.toggle_live_mode(&mut conn).await?;
                    summary.live_toggles += 1;
                } else {
                    self.reset_views(&mut conn).await?;
                    summary.view_resets += 1;
                }
            }

            summary.iterations += 1;
        }

        conn.close().await?;
        Ok(summary)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
