//! Integration test: catalog selection against the fixture configuration.

use stylekit_codegen::Generator;
use stylekit_core::{ArtifactGroup, ArtifactId, Config};

const FIXTURE: &str = r#"
[recipes.text-style]
description = "The styles for Text component"

[recipes.text-style.variants.size.h1]
fontSize = "5rem"
lineHeight = "1em"
fontWeight = 800

[recipes.text-style.variants.size.h2]
fontSize = "3rem"
lineHeight = "1.2em"

[recipes.tooltip-style.base]
"&[data-tooltip], & [data-tooltip]" = { color = "red" }

[recipes.button-style]
description = "The styles for Button component"

[recipes.button-style.base]
display = "inline-flex"
alignItems = "center"

[recipes.button-style.variants.size.sm]
height = "2.5rem"
minWidth = "2.5rem"

[recipes.button-style.variants.size.md]
height = "3rem"
minWidth = "3rem"

[recipes.button-style.variants.variant.solid]
backgroundColor = "blue"
color = "white"

[recipes.button-style.default_variants]
size = "md"
variant = "solid"
"#;

fn generator() -> Generator {
    let config = Config::parse(FIXTURE).expect("fixture should parse");
    Generator::new(config).expect("generator should build")
}

fn select(generator: &Generator, ids: &[&str]) -> Vec<Vec<String>> {
    let ids: Vec<ArtifactId> = ids.iter().map(|id| ArtifactId::new(id).unwrap()).collect();
    generator
        .get_artifacts(Some(&ids))
        .iter()
        .map(ArtifactGroup::paths)
        .collect()
}

#[test]
fn filter_by_artifact_id() {
    let generator = generator();

    insta::assert_debug_snapshot!(select(&generator, &["create-recipe"]), @r#"
    [
        [
            "recipes/create-recipe.mjs",
            "recipes/create-recipe.d.ts",
        ],
    ]
    "#);

    insta::assert_debug_snapshot!(select(&generator, &["create-recipe", "css-fn"]), @r#"
    [
        [
            "css/conditions.mjs",
            "css/css.mjs",
            "css/css.d.ts",
        ],
        [
            "recipes/create-recipe.mjs",
            "recipes/create-recipe.d.ts",
        ],
    ]
    "#);

    insta::assert_debug_snapshot!(select(&generator, &["recipes"]), @r#"
    [
        [
            "recipes/text-style.mjs",
            "recipes/text-style.d.ts",
            "recipes/tooltip-style.mjs",
            "recipes/tooltip-style.d.ts",
            "recipes/button-style.mjs",
            "recipes/button-style.d.ts",
            "recipes/index.mjs",
            "recipes/index.d.ts",
        ],
    ]
    "#);

    insta::assert_debug_snapshot!(select(&generator, &["recipes", "recipes.button-style"]), @r#"
    [
        [
            "recipes/button-style.mjs",
            "recipes/button-style.d.ts",
            "recipes/index.mjs",
            "recipes/index.d.ts",
        ],
    ]
    "#);

    insta::assert_debug_snapshot!(
        select(
            &generator,
            &["recipes", "recipes.button-style", "recipes.tooltip-style"]
        ),
        @r#"
    [
        [
            "recipes/tooltip-style.mjs",
            "recipes/tooltip-style.d.ts",
            "recipes/button-style.mjs",
            "recipes/button-style.d.ts",
            "recipes/index.mjs",
            "recipes/index.d.ts",
        ],
    ]
    "#
    );

    insta::assert_debug_snapshot!(select(&generator, &["patterns.box"]), @"[]");

    insta::assert_debug_snapshot!(select(&generator, &["patterns", "patterns.box"]), @r#"
    [
        [
            "patterns/box.mjs",
            "patterns/box.d.ts",
        ],
    ]
    "#);
}

#[test]
fn all_patterns_in_registration_order() {
    let generator = generator();
    let groups = select(&generator, &["patterns"]);
    assert_eq!(groups.len(), 1);
    let stems: Vec<&str> = groups[0]
        .iter()
        .filter_map(|p| p.strip_prefix("patterns/")?.strip_suffix(".mjs"))
        .collect();
    assert_eq!(
        stems,
        vec![
            "box", "flex", "stack", "vstack", "hstack", "spacer", "square", "circle", "center",
            "link-box", "link-overlay", "aspect-ratio", "grid", "grid-item", "wrap", "container",
            "divider", "float", "bleed", "visually-hidden",
        ]
    );
    assert_eq!(groups[0].len(), 40);
}

#[test]
fn default_build() {
    let generator = generator();
    let groups: Vec<Vec<String>> = generator
        .get_artifacts(None)
        .iter()
        .map(|group| {
            // Namespaces are checked above; keep the listing readable.
            if group.files.len() > 10 {
                vec![format!("<{} files>", group.files.len())]
            } else {
                group.paths()
            }
        })
        .collect();

    insta::assert_debug_snapshot!(groups, @r#"
    [
        [
            "/helpers.mjs",
        ],
        [
            "tokens/index.css",
            "tokens/index.d.ts",
            "tokens/index.mjs",
            "tokens/tokens.d.ts",
        ],
        [
            "tokens/keyframes.css",
        ],
        [],
        [
            "types/global.d.ts",
            "types/index.d.ts",
        ],
        [
            "types/prop-type.d.ts",
            "types/style-props.d.ts",
        ],
        [
            "types/conditions.d.ts",
        ],
        [
            "types/csstype.d.ts",
            "types/selectors.d.ts",
            "types/composition.d.ts",
            "types/recipe.d.ts",
            "types/pattern.d.ts",
            "types/parts.d.ts",
        ],
        [
            "types/system-types.d.ts",
        ],
        [
            "css/conditions.mjs",
            "css/css.mjs",
            "css/css.d.ts",
        ],
        [
            "css/cva.mjs",
            "css/cva.d.ts",
        ],
        [
            "css/sva.mjs",
            "css/sva.d.ts",
        ],
        [
            "css/cx.mjs",
            "css/cx.d.ts",
        ],
        [
            "recipes/create-recipe.mjs",
            "recipes/create-recipe.d.ts",
        ],
        [
            "recipes/index.mjs",
            "recipes/index.d.ts",
        ],
        [
            "recipes/text-style.mjs",
            "recipes/text-style.d.ts",
            "recipes/tooltip-style.mjs",
            "recipes/tooltip-style.d.ts",
            "recipes/button-style.mjs",
            "recipes/button-style.d.ts",
            "recipes/index.mjs",
            "recipes/index.d.ts",
        ],
        [
            "patterns/index.mjs",
            "patterns/index.d.ts",
        ],
        [
            "<40 files>",
        ],
        [],
        [],
        [],
        [],
        [],
        [
            "css/index.mjs",
            "css/index.d.ts",
        ],
        [],
        [
            "/global.css",
        ],
        [
            "/static.css",
        ],
        [],
    ]
    "#);
}

#[test]
fn selection_is_ordered_subset_of_default_build() {
    let generator = generator();
    let all: Vec<String> = generator
        .get_artifacts(None)
        .into_iter()
        .map(|g| g.id.to_string())
        .collect();
    let ids: Vec<ArtifactId> = ["static.css", "cx", "helpers", "recipes"]
        .iter()
        .map(|id| ArtifactId::new(id).unwrap())
        .collect();
    let picked: Vec<usize> = generator
        .get_artifacts(Some(&ids))
        .into_iter()
        .map(|g| all.iter().position(|a| *a == g.id.to_string()).unwrap())
        .collect();
    assert_eq!(picked.len(), 4);
    assert!(picked.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn tokens_only_keeps_token_artifacts() {
    let mut config = Config::parse(FIXTURE).unwrap();
    config.emit_tokens_only = true;
    let generator = Generator::new(config).unwrap();
    let ids: Vec<String> = generator
        .get_artifacts(None)
        .into_iter()
        .map(|g| g.id.to_string())
        .collect();
    assert_eq!(ids, vec!["design-tokens", "keyframes"]);
}

#[test]
fn jsx_and_package_fill_optional_groups() {
    let mut config = Config::parse(FIXTURE).unwrap();
    config.jsx_framework = Some(stylekit_core::JsxFramework::React);
    config.emit_package = true;
    config.preflight = true;
    let generator = Generator::new(config).unwrap();

    let paths = |id: &str| {
        let ids = [ArtifactId::new(id).unwrap()];
        generator.get_artifacts(Some(&ids))[0].paths()
    };
    assert_eq!(paths("types-jsx"), vec!["types/jsx.d.ts"]);
    assert_eq!(paths("jsx-factory"), vec!["jsx/factory.mjs", "jsx/factory.d.ts"]);
    assert_eq!(paths("jsx-patterns").len(), 40);
    assert_eq!(paths("package.json"), vec!["/package.json"]);
    assert_eq!(paths("reset.css"), vec!["/reset.css"]);
}

#[test]
fn recipe_modules_are_lazy() {
    let generator = generator();
    let ids = [
        ArtifactId::new("recipes").unwrap(),
        ArtifactId::new("recipes.button-style").unwrap(),
    ];
    let group = generator.get_artifacts(Some(&ids)).remove(0);
    assert!(group.files[0].code.is_lazy());
    let js = group.files[0].code.resolve();
    assert!(js.contains("export const buttonStyle"));
    assert!(js.contains(r#"{"size":"md","variant":"solid"}"#));
    assert_eq!(js, group.files[0].code.resolve());
}
