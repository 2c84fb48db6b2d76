pub mod ingestor;

pub use ingestor::{has_accepted_extension, split_lines, IngestStats, LogIngestor};
