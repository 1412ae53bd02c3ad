pub mod scenario;
pub mod schema;

pub use scenario::{CityEntry, DateEntry, Expectation, Scenario};
pub use schema::{BrowserConfig, Suite, TargetUrl, Viewport};
