//! # dynjson
//!
//! A mutable, dynamically-typed JSON tree with a recursive-descent parser and a
//! canonical serializer.
//!
//! Text goes in through [`parse`], comes out as one owned [`Value`] tree, is read or
//! edited in place through accessors and auto-vivifying indexing, and goes back to
//! text through [`serialize`] (or `Display`).
//!
//! ## Quick start
//!
//! ```rust
//! use dynjson::{parse, serialize, Value};
//!
//! let mut v = parse(r#"{"code":200,"data":{"total":"12"}}"#).unwrap();
//! assert_eq!(v["code"].as_i64().unwrap(), 200);
//! assert_eq!(v["data"]["total"].as_str().unwrap(), "12");
//!
//! v["tags"].append("new");
//! v["tags"][2] = Value::from(true);
//! assert_eq!(
//!     serialize(&v),
//!     r#"{"code":200,"data":{"total":"12"},"tags":["new",null,true]}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` sum type, accessors, indexing, equality
//! - [`parser`]: text → `Value`
//! - [`encoder`]: `Value` → canonical text
//! - [`error`]: error taxonomy shared by all of the above

pub mod encoder;
pub mod error;
pub mod parser;
mod serde_impl;
pub mod value;

pub use encoder::serialize;
pub use error::{JsonError, Result};
pub use parser::{parse, parse_bytes, parse_with_config, Parser, ParserConfig};
pub use value::{Kind, Map, Value};
