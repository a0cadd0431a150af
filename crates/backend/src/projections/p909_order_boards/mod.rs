pub mod service;
pub mod synthesizer;
