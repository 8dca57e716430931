//! The batch pipeline driver
//!
//! Orchestrates the stages strictly in order: fetch + parse every source,
//! halt if nothing was obtained, drop dead streams, normalize and filter
//! categories, serialize, write. Each stage logs a count; no stage retries.
//! The output file is only touched after every stage has succeeded.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::categories::{CategoryFilter, CategoryNormalizer};
use crate::config::Config;
use crate::errors::AppError;
use crate::ingestor::M3uParser;
use crate::liveness::LivenessChecker;
use crate::models::Channel;
use crate::playlist;
use crate::sources::SourceFetcher;

/// Per-stage counts from a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Channels aggregated across all sources before any filtering
    pub aggregated: usize,
    /// Channels whose stream URL answered the probe
    pub alive: usize,
    /// Channels surviving category cleanup, as written to the output
    pub written: usize,
    pub output_path: PathBuf,
}

pub struct Pipeline {
    config: Config,
    fetcher: SourceFetcher,
    parser: M3uParser,
    checker: LivenessChecker,
    normalizer: CategoryNormalizer,
    filter: CategoryFilter,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let fetcher = SourceFetcher::new(Duration::from_secs(config.fetch.timeout_secs));
        let checker = LivenessChecker::new(&config.liveness);
        let normalizer = CategoryNormalizer::new(&config.categories);
        let filter = CategoryFilter::new(&config.categories);

        Self {
            config,
            fetcher,
            parser: M3uParser::new(),
            checker,
            normalizer,
            filter,
        }
    }

    /// Run the whole pipeline once
    pub async fn run(&self) -> Result<RunSummary> {
        let channels = self.aggregate_sources().await;
        info!("Aggregated {} channels from all sources", channels.len());

        if channels.is_empty() {
            return Err(AppError::EmptyPipeline.into());
        }
        let aggregated = channels.len();

        let channels = self.drop_dead_streams(channels).await;
        info!("{} channels alive after liveness checking", channels.len());
        let alive = channels.len();

        let channels = self.clean_categories(channels);
        info!("{} channels kept after category cleanup", channels.len());
        let written = channels.len();

        let content = playlist::generate_m3u(&channels);
        playlist::write_playlist(&self.config.output.path, &content)?;
        info!(
            "Playlist written to {}",
            self.config.output.path.display()
        );

        Ok(RunSummary {
            aggregated,
            alive,
            written,
            output_path: self.config.output.path.clone(),
        })
    }

    /// Fetch every source sequentially and concatenate the parsed channels
    ///
    /// A failing source is logged and contributes nothing; parsing skips are
    /// logged per record.
    async fn aggregate_sources(&self) -> Vec<Channel> {
        let mut all_channels = Vec::new();

        for source in &self.config.sources {
            let content = match self.fetcher.fetch(source).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping source: {}", e);
                    continue;
                }
            };

            let parsed = self.parser.parse(&content);
            for skip in &parsed.skipped {
                warn!("{}: line {}: {}", source, skip.line, skip.reason);
            }
            info!(
                "{}: {} channels ({} records skipped)",
                source,
                parsed.channels.len(),
                parsed.skipped.len()
            );
            all_channels.extend(parsed.channels);
        }

        all_channels
    }

    /// Keep only channels whose probe outcome is alive
    ///
    /// Probe outcomes are index-aligned with the input, so zipping is exact.
    async fn drop_dead_streams(&self, channels: Vec<Channel>) -> Vec<Channel> {
        let outcomes = self.checker.check_all(&channels).await;

        channels
            .into_iter()
            .zip(outcomes)
            .filter_map(|(channel, outcome)| outcome.is_alive().then_some(channel))
            .collect()
    }

    /// Normalize categories in place, then apply the deny-list
    fn clean_categories(&self, channels: Vec<Channel>) -> Vec<Channel> {
        let mut cleaned = Vec::with_capacity(channels.len());

        for mut channel in channels {
            let normalized = self.normalizer.normalize(&channel.category);

            if self.filter.is_denied(&normalized) {
                info!("Filtered '{}' - category: {}", channel.name, normalized);
                continue;
            }

            channel.category = normalized;
            cleaned.push(channel);
        }

        cleaned
    }
}
