//! Playlist ingestion: turning raw M3U text into channels

pub mod m3u_parser;

pub use m3u_parser::M3uParser;
