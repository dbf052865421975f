//! # stylekit-extract
//!
//! Tree-sitter based style extraction for JavaScript and TypeScript.
//!
//! [`TsStyleParser`] implements [`stylekit_core::SourceParser`] and
//! recognizes:
//!
//! - `css({...})` calls with any number of object arguments
//! - calls to configured recipes by their camelCase name (`buttonStyle({ size: "sm" })`)
//! - calls to configured patterns (`stack({ gap: "4" })`) and their JSX
//!   components (`<Stack gap="4" />`)
//!
//! Only literal values are extracted; everything else is skipped.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod literals;
pub mod typescript;

pub use typescript::{Grammar, TsStyleParser};
