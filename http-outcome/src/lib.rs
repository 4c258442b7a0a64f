extern crate reqwest;
extern crate serde_json;
#[cfg(test)]
extern crate indoc;

#[cfg(test)]
#[macro_use]
pub mod test_utils;

mod assembly;
mod body;
mod config;
mod content_type;
mod errors;
mod outcome;
mod request_options;

pub use assembly::{ResponseAssembler, ResponseParts};
pub use body::{BodyType, ResponseBody};
pub use config::{Config, DETAIL, NOTICE};
pub use content_type::ContentType;
pub use errors::StatusError;
pub use outcome::{Failure, Headers, Outcome, Success};
pub use request_options::RequestOptions;
