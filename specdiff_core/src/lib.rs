pub mod config;
pub mod content_diff;
pub mod endpoints_diff;
pub mod loader;
pub mod map_diff;
pub mod matching;
pub mod operation_diff;
pub mod parameter_diff;
pub mod response_diff;
pub mod schema_diff;
pub mod schema_list_diff;
mod state;
pub mod value_diff;

pub use config::DiffConfig;
pub use content_diff::{MediaTypeDiff, RequestBodyDiff};
pub use endpoints_diff::{DiffResult, DiffSummary, SpecDiffEngine};
pub use loader::{is_json_file, is_yaml_file, load_spec};
pub use map_diff::MapDiff;
pub use matching::{match_pairs, Matching};
pub use operation_diff::OperationDiff;
pub use parameter_diff::ParameterDiff;
pub use response_diff::{HeaderDiff, ResponseDiff};
pub use schema_diff::SchemaDiff;
pub use schema_list_diff::SchemaListDiff;
pub use value_diff::{StringListDiff, ValueDiff};
