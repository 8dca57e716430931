//! m3u-sweeper: aggregate M3U playlists, drop dead streams, clean up categories
//!
//! The crate is a one-shot batch pipeline: fetch every configured source, parse
//! the playlists into channels, probe each stream URL with bounded concurrency,
//! normalize and filter the channel categories, and write the merged playlist
//! back out as M3U.

pub mod categories;
pub mod config;
pub mod errors;
pub mod ingestor;
pub mod liveness;
pub mod models;
pub mod pipeline;
pub mod playlist;
pub mod sources;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use models::Channel;
pub use pipeline::Pipeline;
