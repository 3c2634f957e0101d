pub mod environment;
pub mod parse_trait;
pub mod request;
pub mod utils;

pub use environment::{parse_environment, parse_environment_variables, EnvironmentParser};
pub use parse_trait::BlockParser;
pub use request::{parse_request, BodyParser, KeyValueParser, MetaParser, MethodParser, TestsParser};
