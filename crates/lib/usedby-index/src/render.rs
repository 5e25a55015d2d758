use crate::config::RenderConfig;
use crate::index::{Dependent, ReverseIndex};
use std::fmt::Write;

/// A named block of an already rendered documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBlock {
    pub name: String,
    pub kind: String,
    pub value: String,
}

/// Ordered blocks of one documentation page
pub type Page = Vec<RenderBlock>;

/// Appends the `usedBy` block for `type_name` to a rendered page.
///
/// The page comes back unchanged when nothing references the type.
pub fn render_used_by(
    index: &ReverseIndex,
    config: &RenderConfig,
    type_name: &str,
    mut page: Page,
) -> Page {
    let dependents = index.lookup(type_name);
    if dependents.is_empty() {
        return page;
    }

    page.push(RenderBlock {
        name: config.block_name.clone(),
        kind: config.block_kind.clone(),
        value: used_by_markup(config, dependents),
    });

    page
}

fn used_by_markup(config: &RenderConfig, dependents: &[Dependent]) -> String {
    let mut markup = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(markup, "<section class='usedBy'>");
    let _ = writeln!(markup, "    <h3>{}</h3>", escape_html(&config.heading));
    let _ = writeln!(markup, "    <ul>");
    for dependent in dependents {
        let name = escape_html(&dependent.name);
        let category = dependent.category.as_str();
        let _ = writeln!(markup, "        <li>");
        let _ = writeln!(
            markup,
            "            <a class='type' href='{}/{category}/{name}.{}'>{name}</a><span class=\"badge\">{category}</span>",
            escape_html(&config.link_prefix),
            escape_html(&config.link_extension),
        );
        let _ = writeln!(markup, "        </li>");
    }
    let _ = writeln!(markup, "    </ul>");
    let _ = writeln!(markup, "</section>");

    markup
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}
