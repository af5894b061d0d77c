//! Markdown rendering for symbol pages and the reference index.
//!
//! Pages wrap a Breathe directive in an `eval_rst` fence so that a
//! markdown-based Sphinx site can pull the Doxygen XML for the symbol.

use refbuilder_shared::{DirectiveConfig, IndexConfig, InputLine, Symbol};

/// Render the stub page for one symbol.
///
/// ````text
/// # Audio
///
/// ```eval_rst
/// .. doxygenstruct:: Mono::Audio
///    :project: monoapi
///    :path: xml
///    :members:
///    :protected-members:
/// ```
/// ````
pub fn render_symbol_page(symbol: &Symbol, directive: &DirectiveConfig) -> String {
    let mut out = format!("# {}\n\n", symbol.base_name);
    out.push_str("```eval_rst\n");
    out.push_str(&format!(
        ".. {}:: {}\n",
        symbol.kind.directive(),
        symbol.qualified_name
    ));
    out.push_str(&format!("   :project: {}\n", directive.project));
    out.push_str(&format!("   :path: {}\n", directive.path));
    if directive.members {
        out.push_str("   :members:\n");
    }
    if directive.protected_members {
        out.push_str("   :protected-members:\n");
    }
    out.push_str("```\n");
    out
}

/// Render the index page linking every symbol page in input order.
pub fn render_index(lines: &[InputLine], index: &IndexConfig) -> String {
    let mut out = format!("# {}\n\n", index.title);

    for line in lines {
        match line {
            InputLine::Header(header) => {
                out.push('\n');
                out.push_str(header);
                out.push('\n');
            }
            InputLine::Symbol(symbol) => {
                out.push_str(&format!(
                    "* [{}]({})\n",
                    symbol.base_name,
                    symbol.file_name()
                ));
            }
            InputLine::Blank => {}
        }
    }

    if let Some(trailer) = index.trailer() {
        out.push('\n');
        out.push_str(trailer);
        if !trailer.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use refbuilder_shared::SymbolKind;

    fn no_trailer() -> IndexConfig {
        IndexConfig {
            trailer: None,
            ..IndexConfig::default()
        }
    }

    #[test]
    fn struct_page_matches_layout() {
        let page = render_symbol_page(
            &Symbol::new("Mono::Audio", SymbolKind::Struct),
            &DirectiveConfig::default(),
        );
        assert_eq!(
            page,
            "# Audio\n\n```eval_rst\n.. doxygenstruct:: Mono::Audio\n   :project: monoapi\n   :path: xml\n   :members:\n   :protected-members:\n```\n"
        );
    }

    #[test]
    fn class_page_uses_doxygenclass() {
        let page = render_symbol_page(
            &Symbol::new("UI::Button", SymbolKind::Class),
            &DirectiveConfig::default(),
        );
        assert!(page.starts_with("# Button\n\n"));
        assert!(page.contains(".. doxygenclass:: UI::Button\n"));
    }

    #[test]
    fn member_flags_follow_config() {
        let directive = DirectiveConfig {
            members: true,
            protected_members: false,
            ..DirectiveConfig::default()
        };
        let page = render_symbol_page(&Symbol::new("UI::Button", SymbolKind::Class), &directive);
        assert!(page.contains(":members:"));
        assert!(!page.contains(":protected-members:"));
    }

    #[test]
    fn index_headers_and_bullets_in_order() {
        let lines = vec![
            InputLine::Header("# Display Classes".into()),
            InputLine::Symbol(Symbol::new("UI::Button", SymbolKind::Class)),
            InputLine::Blank,
            InputLine::Symbol(Symbol::new("Mono::Audio", SymbolKind::Struct)),
        ];
        let index = render_index(&lines, &no_trailer());
        assert_eq!(
            index,
            "# API Reference\n\n\n# Display Classes\n* [Button](UI_Button.md)\n* [Audio](Mono_Audio.md)\n"
        );
    }

    #[test]
    fn index_appends_trailer() {
        let config = IndexConfig {
            trailer: Some("# More\n\nSee elsewhere.".into()),
            ..IndexConfig::default()
        };
        let lines = vec![InputLine::Symbol(Symbol::new("UI::Button", SymbolKind::Class))];
        let index = render_index(&lines, &config);
        assert!(index.ends_with("* [Button](UI_Button.md)\n\n# More\n\nSee elsewhere.\n"));
    }

    #[test]
    fn empty_list_renders_title_only() {
        assert_eq!(render_index(&[], &no_trailer()), "# API Reference\n\n");
    }
}
