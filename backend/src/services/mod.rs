pub mod assembler;
pub mod catalog;
pub mod channel_cache;
pub mod clock;
pub mod criteria;
pub mod earnings;
pub mod filter;
pub mod outlier_service;
pub mod presets;
pub mod scoring;
pub mod youtube_client;
