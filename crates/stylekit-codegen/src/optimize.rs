//! CSS clean-up and minification.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use tracing::warn;

/// Optimizes generated CSS.
///
/// Without `minify` the text is normalized: trailing whitespace removed, runs
/// of blank lines collapsed, one trailing newline. With `minify` the sheet is
/// parsed and printed back minified by `lightningcss`. Input that does not
/// parse is logged and returned normalized.
#[must_use]
pub fn optimize_css(css: &str, minify: bool) -> String {
    if !minify {
        return normalize(css);
    }
    match minify_css(css) {
        Ok(code) => code,
        Err(err) => {
            warn!("Skipping minification: {err}");
            normalize(css)
        }
    }
}

fn minify_css(css: &str) -> Result<String, String> {
    let sheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| e.to_string())?;
    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;
    Ok(printed.code)
}

fn normalize(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut blank = false;
    for line in css.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !out.is_empty() {
                blank = true;
            }
            continue;
        }
        if blank {
            out.push('\n');
            blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_blank_lines() {
        assert_eq!(
            optimize_css("a {\n  color: red;   \n}\n\n\n\nb {}\n\n", false),
            "a {\n  color: red;\n}\n\nb {}\n"
        );
    }

    #[test]
    fn minify_drops_comments_and_whitespace() {
        let css = "/* reset */\n@layer base {\n  html, body {\n    margin: 0;\n  }\n}\n";
        assert_eq!(optimize_css(css, true), "@layer base{html,body{margin:0}}");
    }

    #[test]
    fn minify_keeps_descendant_combinators() {
        assert_eq!(
            optimize_css(".a:hover :focus {\n  color: red;\n}\n", true),
            ".a:hover :focus{color:red}"
        );
        assert_eq!(
            optimize_css(".a > .b :hover {\n  color: red;\n}\n", true),
            ".a>.b :hover{color:red}"
        );
    }

    #[test]
    fn minify_keeps_escaped_class_names() {
        assert_eq!(
            optimize_css(".hover\\:color_red:hover {\n  color: red;\n}\n", true),
            ".hover\\:color_red:hover{color:red}"
        );
    }

    #[test]
    fn unparsable_css_is_only_normalized() {
        assert_eq!(
            optimize_css("..a {  \n  color: red;\n}\n\n\n", true),
            "..a {\n  color: red;\n}\n"
        );
    }
}
