//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r##"# stylekit configuration

# Source files to extract styles from (relative to this file)
include = ["src/**/*.{js,jsx,ts,tsx}"]
exclude = []

# Where generated artifacts are written
outdir = "styled-system"

# Include the CSS reset in bundles
preflight = true

# Generate JSX components for patterns ("react" or "preact")
# jsx_framework = "react"

# Empty the output directory before codegen
# clean = true

# Minify generated CSS
# minify = true

[tokens.colors]
# primary = "#2563eb"

[breakpoints]
sm = "640px"
md = "768px"
lg = "1024px"
xl = "1280px"
2xl = "1536px"

# [recipes.button]
# base = { display = "inline-flex", alignItems = "center" }
# variants.size.sm = { height = "2rem" }
# variants.size.md = { height = "2.5rem" }
# default_variants = { size = "md" }
"##;

/// File name written by `init`.
const CONFIG_NAME: &str = "stylekit.toml";

/// Runs the init command.
pub fn run(project_dir: &Path, force: bool) -> Result<()> {
    let config_path = project_dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to declare tokens, recipes and patterns");
    println!("  2. Run: stylekit build");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_and_validates() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        config.validate().unwrap();
        assert!(config.preflight);
        assert_eq!(config.breakpoints.len(), 5);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_NAME), "minify = true\n").unwrap();

        assert!(run(tmp.path(), false).is_err());
        run(tmp.path(), true).unwrap();

        let written = std::fs::read_to_string(tmp.path().join(CONFIG_NAME)).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
    }
}
