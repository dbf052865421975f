//! Shared inputs for artifact builders and CSS rendering.

use indexmap::IndexMap;
use stylekit_core::{Conditions, Config, JsxFramework, OutExtension, PatternConfig};

use crate::tokens::TokenDictionary;

/// Borrowed view of everything generation needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) conditions: &'a Conditions,
    pub(crate) tokens: &'a TokenDictionary,
    pub(crate) patterns: &'a IndexMap<String, PatternConfig>,
}

impl RenderContext<'_> {
    pub(crate) fn ext(&self) -> OutExtension {
        self.config.out_extension
    }

    /// `stem` plus the configured JS extension.
    pub(crate) fn file(&self, stem: &str) -> String {
        self.ext().file(stem)
    }

    /// Fills `{ext}` placeholders of a JS template.
    pub(crate) fn render(&self, template: &str) -> String {
        template.replace("{ext}", self.ext().as_str())
    }

    pub(crate) fn jsx(&self) -> Option<JsxFramework> {
        self.config.jsx_framework
    }
}
