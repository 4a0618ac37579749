pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod taxonomy;

pub use config::{AppConfig, RetryPolicy, RunContext};
pub use engine::{Organizer, RunResult};
pub use error::Error;
pub use metadata::{MetadataClient, MetadataRecord, OmdbClient};
pub use parser::{NameParser, ParsedName, ReleaseNameParser};
pub use pipeline::RunSummary;
pub use progress::{LogReporter, ProgressReporter, SilentReporter};
pub use report::{RunReport, Stage};
