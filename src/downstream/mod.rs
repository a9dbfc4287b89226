pub mod client;

pub use client::DownstreamClient;
