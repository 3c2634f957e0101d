pub mod block;
pub mod bru_file;
pub mod error;
pub mod http_method;
pub mod keywords;
pub mod parse_result;
pub mod parsers;
pub mod validate;

pub use block::{extract_block, extract_list_block, find_block_labels};
pub use bru_file::BruFile;
pub use error::{ParseWarning, WarningKind};
pub use http_method::HttpMethod;
pub use parse_result::{Body, BodyKind, EnvironmentDefinition, RequestDefinition};
pub use parsers::{parse_environment, parse_environment_variables, parse_request};
