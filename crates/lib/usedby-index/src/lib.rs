//! Reverse dependency ("used by") index over a GraphQL type graph.
//!
//! [ReverseIndex] records, for every type and directive name, which
//! declarations and operations reference it. [UsedByPlugin] owns one index
//! per documentation run and appends a `usedBy` block to each rendered page.
pub mod config;
pub mod error;
pub mod index;
pub mod plugin;
pub mod render;
pub mod resolver;

pub use crate::config::RenderConfig;
pub use crate::error::{IndexError, IndexResult, ResolveError};
pub use crate::index::{Category, Dependent, ReverseIndex};
pub use crate::plugin::{Asset, PageRenderer, UsedByPlugin};
pub use crate::render::{Page, RenderBlock, render_used_by};
pub use crate::resolver::resolve_named_type;
