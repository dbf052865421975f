//! Built-in layout patterns.

use indexmap::IndexMap;
use stylekit_core::{PatternConfig, StyleObject, StyleValue};

fn pattern(description: &str, properties: &[&str], base: StyleObject) -> PatternConfig {
    PatternConfig {
        description: Some(description.to_string()),
        properties: properties.iter().map(|p| (*p).to_string()).collect(),
        base,
        defaults: StyleObject::new(),
        jsx: None,
    }
}

fn style(entries: &[(&str, &str)]) -> StyleObject {
    entries
        .iter()
        .fold(StyleObject::new(), |s, (k, v)| s.with(*k, *v))
}

/// Returns the base patterns in registration order.
#[must_use]
pub fn base_patterns() -> IndexMap<String, PatternConfig> {
    let flex_props = ["alignItems", "justifyContent", "flexDirection", "flexWrap", "gap"];

    let mut stack = pattern(
        "A vertical or horizontal stack of elements",
        &flex_props,
        style(&[("display", "flex"), ("flexDirection", "column")]),
    );
    stack.defaults = style(&[("gap", "10px")]);

    let mut vstack = pattern(
        "A vertical stack of centered elements",
        &flex_props,
        style(&[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("alignItems", "center"),
        ]),
    );
    vstack.defaults = style(&[("gap", "10px")]);

    let mut hstack = pattern(
        "A horizontal stack of centered elements",
        &flex_props,
        style(&[
            ("display", "flex"),
            ("flexDirection", "row"),
            ("alignItems", "center"),
        ]),
    );
    hstack.defaults = style(&[("gap", "10px")]);

    let mut wrap = pattern(
        "A wrapping row of elements",
        &flex_props,
        style(&[("display", "flex"), ("flexWrap", "wrap")]),
    );
    wrap.defaults = style(&[("gap", "10px")]);

    let mut grid = pattern(
        "A CSS grid container",
        &["gridTemplateColumns", "gap", "columnGap", "rowGap"],
        style(&[("display", "grid")]),
    );
    grid.defaults = style(&[("gap", "10px")]);

    let mut aspect_ratio = pattern(
        "Constrains its content to a ratio",
        &["aspectRatio"],
        style(&[
            ("position", "relative"),
            ("overflow", "hidden"),
            ("display", "flex"),
            ("justifyContent", "center"),
            ("alignItems", "center"),
        ]),
    );
    aspect_ratio.defaults = style(&[("aspectRatio", "4 / 3")]);

    let mut divider = pattern(
        "A horizontal or vertical separator",
        &["borderColor", "borderWidth"],
        style(&[("borderStyle", "solid"), ("width", "100%")]),
    );
    divider.defaults = style(&[("borderWidth", "0 0 1px 0")]);

    let mut bleed = pattern(
        "Lets content escape its container's padding",
        &["marginInline", "paddingInline"],
        StyleObject::new(),
    );
    bleed.defaults = style(&[("marginInline", "-1.5rem"), ("paddingInline", "1.5rem")]);

    let mut visually_hidden = pattern(
        "Hides content visually but keeps it accessible",
        &[],
        style(&[
            ("position", "absolute"),
            ("width", "1px"),
            ("height", "1px"),
            ("padding", "0"),
            ("margin", "-1px"),
            ("overflow", "hidden"),
            ("clip", "rect(0, 0, 0, 0)"),
            ("whiteSpace", "nowrap"),
            ("borderWidth", "0"),
        ]),
    );
    visually_hidden.jsx = Some("VisuallyHidden".to_string());

    let mut link_overlay = pattern(
        "Stretches a link over its link-box",
        &[],
        style(&[("position", "static")]),
    );
    link_overlay.base.insert(
        "_before",
        StyleValue::Nested(style(&[
            ("content", "\"\""),
            ("position", "absolute"),
            ("inset", "0"),
            ("zIndex", "0"),
        ])),
    );

    let entries = vec![
        ("box", pattern("A plain element", &[], StyleObject::new())),
        (
            "flex",
            pattern("A flex container", &flex_props, style(&[("display", "flex")])),
        ),
        ("stack", stack),
        ("vstack", vstack),
        ("hstack", hstack),
        (
            "spacer",
            pattern(
                "Fills the remaining space of a flex container",
                &["flexBasis"],
                style(&[("flex", "1"), ("justifySelf", "stretch"), ("alignSelf", "stretch")]),
            ),
        ),
        (
            "square",
            pattern(
                "An element with equal width and height",
                &["width", "height"],
                style(&[
                    ("display", "flex"),
                    ("alignItems", "center"),
                    ("justifyContent", "center"),
                    ("flex", "0 0 auto"),
                ]),
            ),
        ),
        (
            "circle",
            pattern(
                "A round element with equal width and height",
                &["width", "height"],
                style(&[
                    ("display", "flex"),
                    ("alignItems", "center"),
                    ("justifyContent", "center"),
                    ("flex", "0 0 auto"),
                    ("borderRadius", "9999px"),
                ]),
            ),
        ),
        (
            "center",
            pattern(
                "Centers its content",
                &["display"],
                style(&[
                    ("display", "flex"),
                    ("alignItems", "center"),
                    ("justifyContent", "center"),
                ]),
            ),
        ),
        (
            "link-box",
            pattern(
                "A container that a link-overlay can cover",
                &[],
                style(&[("position", "relative")]),
            ),
        ),
        ("link-overlay", link_overlay),
        ("aspect-ratio", aspect_ratio),
        ("grid", grid),
        (
            "grid-item",
            pattern(
                "A grid cell",
                &["gridColumn", "gridRow", "gridColumnStart", "gridColumnEnd"],
                StyleObject::new(),
            ),
        ),
        ("wrap", wrap),
        (
            "container",
            pattern(
                "A centered, width-limited container",
                &["maxWidth"],
                style(&[
                    ("position", "relative"),
                    ("maxWidth", "1280px"),
                    ("marginInline", "auto"),
                    ("paddingInline", "1.5rem"),
                ]),
            ),
        ),
        ("divider", divider),
        (
            "float",
            pattern(
                "Positions content over the corner of its parent",
                &["top", "left", "insetInlineEnd", "transform"],
                style(&[
                    ("display", "inline-flex"),
                    ("justifyContent", "center"),
                    ("alignItems", "center"),
                    ("position", "absolute"),
                ]),
            ),
        ),
        ("bleed", bleed),
        ("visually-hidden", visually_hidden),
    ];

    entries
        .into_iter()
        .map(|(name, config)| (name.to_string(), config))
        .collect()
}
