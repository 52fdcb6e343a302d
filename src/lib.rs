//! Encoder and decoder for [rison], a compact, URI-friendly notation for JSON-like data.
//!
//! Rison avoids most characters that need percent-encoding in URLs: strings that look
//! like identifiers are written without quotes, `!` is the escape character, arrays are
//! written `!(...)` and objects `(...)`.
//!
//! ```
//! use rison::{dump, load, Value};
//!
//! let value = load("(a:!(1,2.50,'it!'s'),b:!n)").unwrap();
//! assert_eq!(value.get("b"), Some(&Value::Null));
//! assert_eq!(dump(&value).unwrap(), "(a:!(1,2.50,'it!'s'),b:!n)");
//!
//! assert_eq!(load("(a:"), Err(rison::Error::InvalidInput));
//! ```
//!
//! [`load`] and [`dump`] report every failure as [`Error::InvalidInput`]. [`decode`] and
//! [`encode`] panic instead, for callers that already know their input is well-formed.
//! Percent-encoding for use in a URL is left to the caller.
//!
//! Any type implementing [`serde::Deserialize`] can also be read with [`from_str`]:
//!
//! ```
//! #[derive(serde::Deserialize)]
//! struct Query {
//!     page: u32,
//!     tags: Vec<String>,
//! }
//!
//! let query: Query = rison::from_str("(page:2,tags:!(rust,'url safe'))").unwrap();
//! assert_eq!(query.page, 2);
//! assert_eq!(query.tags, ["rust", "url safe"]);
//! ```
//!
//! [rison]: https://github.com/Nanonid/rison

pub mod de;
pub mod ser;

mod error;
mod read;
mod value;

pub use de::{decode, from_reader, from_slice, from_str, load, load_reader, load_slice};
pub use error::{Error, Result};
pub use ser::{dump, encode};
pub use value::Value;
