pub mod batch;
pub mod config;
pub mod entropy;
pub mod error;
pub mod report;
pub mod source;

pub use config::{RunConfig, Settings};
pub use entropy::{shannon_entropy, Base, Entropy};
pub use error::{Error, Result};
pub use report::{Format, Metrics, Report};
pub use source::Source;

/// Read the configured source into a fresh accumulator.
pub fn load(config: &RunConfig) -> Result<Entropy> {
    let mut entropy = Entropy::new(config.base);
    entropy.update(config.source.read()?);
    Ok(entropy)
}
