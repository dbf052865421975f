//! User-facing summary messages.

use std::path::Path;

/// Message after rebuilding tokens only.
pub const TOKENS_REBUILT: &str =
    "Successfully rebuilt the css variables and js function to query your tokens ✨";

/// Message after extracting CSS from `count` files.
#[must_use]
pub fn build_complete(count: usize) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("Successfully extracted css from {count} {noun} ✨")
}

/// Message after writing artifact groups into `outdir`.
#[must_use]
pub fn artifacts_generated(groups: usize, outdir: &Path) -> String {
    format!(
        "Generated {groups} artifact groups in {} ✨",
        outdir.display()
    )
}

/// Message for an unrecognized root CSS artifact.
#[must_use]
pub fn css_artifact_not_found(kind: &str) -> String {
    format!("No css artifact of type <{kind}> was found")
}

/// Message for a root CSS artifact that rendered nothing.
#[must_use]
pub fn nothing_to_generate(kind: &str) -> String {
    format!("No css to generate for type <{kind}>")
}

/// Message after writing a root CSS artifact.
#[must_use]
pub fn css_artifact_generated(kind: &str) -> String {
    format!("Successfully generated {kind} css artifact ✨")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_file_count() {
        assert_eq!(build_complete(1), "Successfully extracted css from 1 file ✨");
        assert_eq!(build_complete(0), "Successfully extracted css from 0 files ✨");
    }
}
