//! Case conversion and class name helpers.

/// Converts `buttonStyle` or `button_style` to `button-style`.
#[must_use]
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' || c == ' ' {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts `button-style` to `buttonStyle`.
#[must_use]
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' || c == '_' || c == ' ' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts `button-style` to `ButtonStyle`.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let camel = camel_case(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Converts a camelCase CSS property to its hyphenated form.
///
/// Vendor prefixes get a leading dash (`WebkitAppearance` →
/// `-webkit-appearance`). Custom properties are returned unchanged.
#[must_use]
pub fn hyphenate_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let hyphenated = dash_case(property);
    let vendor = ["webkit-", "moz-", "ms-"]
        .iter()
        .any(|p| hyphenated.starts_with(p))
        && property.starts_with(|c: char| c.is_ascii_uppercase());
    if vendor {
        format!("-{hyphenated}")
    } else {
        hyphenated
    }
}

/// Normalizes a value or condition into a class name segment.
///
/// Whitespace runs become `_`; other characters are kept and escaped at
/// render time by [`escape_class`].
#[must_use]
pub fn class_segment(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Escapes a class name for use in a CSS selector.
#[must_use]
pub fn escape_class(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 8);
    for (i, c) in class.chars().enumerate() {
        let plain = c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii();
        if plain && !(i == 0 && c.is_ascii_digit()) {
            out.push(c);
        } else if c.is_ascii_digit() {
            out.push_str(&format!("\\3{c} "));
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_case_from_camel_and_snake() {
        assert_eq!(dash_case("buttonStyle"), "button-style");
        assert_eq!(dash_case("link_box"), "link-box");
        assert_eq!(dash_case("box"), "box");
    }

    #[test]
    fn camel_and_pascal_case() {
        assert_eq!(camel_case("visually-hidden"), "visuallyHidden");
        assert_eq!(pascal_case("aspect-ratio"), "AspectRatio");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn hyphenate_properties() {
        assert_eq!(hyphenate_property("backgroundColor"), "background-color");
        assert_eq!(hyphenate_property("WebkitAppearance"), "-webkit-appearance");
        assert_eq!(hyphenate_property("--my-var"), "--my-var");
        assert_eq!(hyphenate_property("color"), "color");
    }

    #[test]
    fn class_segment_collapses_whitespace() {
        assert_eq!(class_segment("1px  solid red"), "1px_solid_red");
    }

    #[test]
    fn escape_class_handles_special_chars() {
        assert_eq!(escape_class("hover:color_red"), "hover\\:color_red");
        assert_eq!(escape_class("w_50%"), "w_50\\%");
        assert_eq!(escape_class("p_0.5"), "p_0\\.5");
        assert_eq!(escape_class("1col"), "\\31 col");
    }
}
