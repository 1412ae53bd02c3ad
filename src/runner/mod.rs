mod executor;

use crate::config::{BrowserConfig, Suite};
use crate::page::DeliveryForm;
use crate::Result;
use eoka::Browser;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// Whether the expected outcome was observed.
    pub passed: bool,
    /// Failure description if not.
    pub error: Option<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Outcome of a full suite run.
#[derive(Debug)]
pub struct SuiteResult {
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    /// Whether every scenario passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }
}

/// Executes booking scenarios against a live browser.
pub struct Runner {
    browser: Browser,
}

impl Runner {
    /// Launch a browser per the suite's browser config.
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: config.headless,
            proxy: config.proxy.clone(),
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, proxy: {:?})",
            config.headless, config.proxy
        );
        let browser = Browser::launch_with_config(stealth).await?;
        Ok(Self { browser })
    }

    /// Run every scenario in order, each against a freshly opened form.
    ///
    /// A scenario failure (wrong message, missing notification, timeout) is
    /// recorded in its `ScenarioResult` and the run continues; only browser
    /// launch/navigation errors abort the whole run.
    pub async fn run(&self, suite: &Suite) -> Result<SuiteResult> {
        let mut results = Vec::with_capacity(suite.scenarios.len());

        for scenario in &suite.scenarios {
            info!("scenario: {}", scenario.name);
            let start = Instant::now();

            // Fresh page per scenario: no error state accumulates across runs.
            let page = self.browser.new_page(&suite.target.url).await?;
            let form = DeliveryForm::new(&page, suite.timeout_ms);

            let outcome = executor::execute(&form, scenario).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(()) => {
                    debug!("passed in {}ms", duration_ms);
                    results.push(ScenarioResult {
                        name: scenario.name.clone(),
                        passed: true,
                        error: None,
                        duration_ms,
                    });
                }
                Err(e) => {
                    warn!("scenario '{}' failed: {}", scenario.name, e);
                    results.push(ScenarioResult {
                        name: scenario.name.clone(),
                        passed: false,
                        error: Some(e.to_string()),
                        duration_ms,
                    });
                }
            }
        }

        Ok(SuiteResult { results })
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}
