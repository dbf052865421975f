//! Integration test: TOML configuration drives condition resolution.

use stylekit_core::{Atom, Config, ConditionKind, StyleObject, StyleResult};

const CONFIG: &str = r#"
[conditions]
hover = "&:hover"
print = "@media print"

[breakpoints]
tablet = "700px"
desktop = "1100px"
"#;

fn config() -> Config {
    let config = Config::parse(CONFIG).expect("fixture config should parse");
    config.validate().expect("fixture config should be valid");
    config
}

#[test]
fn configured_breakpoints_replace_defaults() {
    let conditions = config().conditions();
    let names: Vec<&str> = conditions.breakpoints().collect();
    assert_eq!(names, vec!["tablet", "desktop"]);
    assert_eq!(conditions.condition_name("md"), None);
    assert_eq!(
        conditions.resolve("desktop"),
        Some(ConditionKind::AtRule(
            "@media screen and (min-width: 1100px)".to_string()
        ))
    );
}

#[test]
fn style_objects_flatten_with_configured_conditions() {
    let conditions = config().conditions();
    let style = StyleObject::new()
        .with("display", "grid")
        .with_nested(
            "tablet",
            StyleObject::new().with_nested("_print", StyleObject::new().with("display", "none")),
        )
        .with_nested(
            "gap",
            StyleObject::new().with("base", "2").with("desktop", "6"),
        );

    let mut result = StyleResult::for_file("src/grid.tsx");
    result.add_style(&style, &conditions);

    let classes: Vec<String> = result.atoms().map(Atom::class_name).collect();
    insta::assert_debug_snapshot!(classes, @r#"
    [
        "display_grid",
        "tablet:print:display_none",
        "gap_2",
        "desktop:gap_6",
    ]
    "#);
}
