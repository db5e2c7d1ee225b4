//! Editor block unregistration script.
//!
//! # Responsibilities
//! - Name the author-related editor blocks to remove
//! - Render the inline script that unregisters them client-side
//!
//! # Design Decisions
//! - The script waits for DOMContentLoaded and then the editor runtime's
//!   own readiness signal before touching the block registry
//! - Unregistering an already-absent block is a no-op in the editor
//!   runtime, so the script is safe on every admin page load

/// Author-related editor blocks removed from the block registry.
pub const AUTHOR_BLOCKS: [&str; 3] = [
    "core/post-author",
    "core/post-author-biography",
    "core/post-author-name",
];

/// Render the inline script markup unregistering the author blocks.
pub fn unregister_script() -> String {
    let mut script = String::from("<script type=\"text/javascript\">");
    script.push_str("addEventListener('DOMContentLoaded', function() {");
    script.push_str("window.wp.domReady( function() {");
    for block in AUTHOR_BLOCKS {
        script.push_str("window.wp.blocks.unregisterBlockType( '");
        script.push_str(&escape_js(block));
        script.push_str("' );");
    }
    script.push_str("} );");
    script.push_str("} );");
    script.push_str("</script>");
    script
}

/// Escape a string for embedding inside an inline script literal.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_lists_all_author_blocks() {
        let script = unregister_script();
        for block in AUTHOR_BLOCKS {
            assert!(script.contains(&format!("unregisterBlockType( '{block}' )")));
        }
        assert_eq!(script.matches("unregisterBlockType").count(), 3);
    }

    #[test]
    fn test_script_waits_for_editor_runtime() {
        let script = unregister_script();
        assert!(script.starts_with("<script type=\"text/javascript\">"));
        assert!(script.contains("addEventListener('DOMContentLoaded'"));
        assert!(script.contains("window.wp.domReady("));
        assert!(script.ends_with("</script>"));
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("core/post-author"), "core/post-author");
        assert_eq!(escape_js("a'b"), "a\\'b");
        assert_eq!(escape_js("</script>"), "\\u003C/script\\u003E");
        assert_eq!(escape_js("a\\b"), "a\\\\b");
    }
}
