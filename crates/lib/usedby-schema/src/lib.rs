pub mod error;
#[cfg(feature = "introspection")]
pub mod introspection;
pub mod parser;
pub mod prelude;
pub mod schema;
