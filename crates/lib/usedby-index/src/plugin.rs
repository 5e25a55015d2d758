use crate::config::RenderConfig;
use crate::error::IndexResult;
use crate::index::{Dependent, ReverseIndex};
use crate::render::{Page, render_used_by};
use std::path::{Path, PathBuf};
use tracing::info;
use usedby_schema::schema::TypeGraph;

/// Stylesheet for the category badges of the `usedBy` block
pub const BADGE_STYLESHEET: &str = include_str!("../assets/css/badge.css");

/// A static file the host generator copies into its output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path of the file relative to the output directory
    pub name: String,
    /// Location of the file on disk
    pub path: PathBuf,
}

impl Asset {
    pub fn badge_stylesheet() -> Self {
        Self {
            name: "css/badge.css".to_string(),
            path: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/css/badge.css"),
        }
    }
}

/// Trait for the base renderer whose pages the plugin decorates
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use usedby_index::{Page, PageRenderer, RenderBlock};
///
/// struct TitleRenderer;
///
/// impl PageRenderer for TitleRenderer {
///     type Error = Infallible;
///
///     fn render_page(&self, type_name: &str) -> Result<Page, Self::Error> {
///         Ok(vec![RenderBlock {
///             name: "title".to_string(),
///             kind: "html".to_string(),
///             value: format!("<h1>{type_name}</h1>"),
///         }])
///     }
/// }
/// ```
pub trait PageRenderer {
    /// The error type returned by this renderer
    type Error: std::error::Error;

    /// Renders the page of one named type
    fn render_page(&self, type_name: &str) -> Result<Page, Self::Error>;
}

/// "Used by" support for one documentation run.
///
/// Owns the reverse index of the schema being documented. Call
/// [UsedByPlugin::init] once the schema is loaded, copy the returned
/// assets, then [UsedByPlugin::render] each type page.
#[derive(Debug, Clone, Default)]
pub struct UsedByPlugin {
    index: ReverseIndex,
    config: RenderConfig,
}

impl UsedByPlugin {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            index: ReverseIndex::new(),
            config,
        }
    }

    pub fn name(&self) -> &'static str {
        "used-by"
    }

    /// Rebuilds the index from `graph` and returns the assets to copy.
    ///
    /// Records from earlier calls are discarded.
    #[tracing::instrument(skip_all, fields(plugin = self.name()))]
    pub fn init(&mut self, graph: &TypeGraph) -> IndexResult<Vec<Asset>> {
        self.index = ReverseIndex::build(graph)?;
        info!(targets = self.index.len(), "Plugin initialised");

        Ok(vec![Asset::badge_stylesheet()])
    }

    /// Adds another graph's records to the current index
    pub fn extend(&mut self, graph: &TypeGraph) -> IndexResult<()> {
        self.index.extend(graph)
    }

    pub fn reset(&mut self) {
        self.index.clear();
    }

    pub fn index(&self) -> &ReverseIndex {
        &self.index
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn lookup(&self, type_name: &str) -> &[Dependent] {
        self.index.lookup(type_name)
    }

    /// Appends the `usedBy` block to a page rendered elsewhere
    pub fn decorate(&self, type_name: &str, page: Page) -> Page {
        render_used_by(&self.index, &self.config, type_name, page)
    }

    /// Renders a type page with the base renderer, then decorates it
    pub fn render<R: PageRenderer>(&self, type_name: &str, base: &R) -> Result<Page, R::Error> {
        let page = base.render_page(type_name)?;

        Ok(self.decorate(type_name, page))
    }
}
