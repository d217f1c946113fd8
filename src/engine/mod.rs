//! Engine module: aggregation, ranking, output, and the CLI glue around them

pub mod aggregate;
pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod rank;
pub mod render;

// Re-export commonly used functions
pub use aggregate::{Aggregator, aggregate_outcomes, merge_tally};
pub use arg_parser::{Cli, Commands};
pub use cli::handle_run;
pub use rank::{compare_entries, rank, validate_limit};
pub use render::{write_names, write_ranked, write_total};
