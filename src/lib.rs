//! # delivery-e2e
//!
//! End-to-end UI suite for the delivery-booking form. Scenarios live in a
//! YAML table; each one opens the form fresh, fills the fields, submits, and
//! asserts the resulting UI state (validation message, loading indicator,
//! success notification).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use delivery_e2e::{Runner, Suite};
//!
//! # #[tokio::main]
//! # async fn main() -> delivery_e2e::Result<()> {
//! let suite = Suite::load("configs/delivery.yaml")?;
//! let runner = Runner::new(&suite.browser).await?;
//! let result = runner.run(&suite).await?;
//! println!("{}/{} passed", result.passed_count(), result.results.len());
//! runner.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dates;
pub mod messages;
pub mod page;
pub mod runner;

pub use config::{BrowserConfig, CityEntry, DateEntry, Expectation, Scenario, Suite, TargetUrl};
pub use page::{DeliveryForm, Field};
pub use runner::{Runner, ScenarioResult, SuiteResult};

/// Result type for suite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during suite loading or execution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),

    #[error("action failed: {0}")]
    ActionFailed(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("assertion failed: {0}")]
    AssertionFailed(String),
}
