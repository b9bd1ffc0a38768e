//! Source ingestion: fetching creator exports, parsing them as CSV, and
//! normalizing heterogeneous columns into [`infldb_core::Profile`]s.

pub mod client;
pub mod error;
pub mod followers;
pub mod loader;
pub mod normalize;
pub mod performance;
pub(crate) mod retry;
pub mod schema;
pub mod table;

pub use client::SourceClient;
pub use error::IngestError;
pub use followers::{format_followers, parse_followers, FollowerValue};
pub use loader::ProfileLoader;
pub use normalize::{normalize_row, normalize_table, NormalizedTable};
pub use performance::{load_performance, parse_performance, performance_location};
pub use schema::{Field, ResolvedSchema, SourceSchema};
pub use table::{CsvRow, CsvTable};
