//! A minimal JSON model: parse, inspect and stringify arbitrary JSON values.
//!
//! This is not a general-purpose JSON library. It covers exactly what the
//! feature reader needs: decoding one header or feature object into a
//! [`JsonValue`] tree and serializing it back into a compact string.

mod array;
mod object;
mod parse;
mod stringify;
mod value;

pub use array::JsonArray;
pub use object::JsonObject;
pub use parse::parse_json_str;
pub use value::JsonValue;
