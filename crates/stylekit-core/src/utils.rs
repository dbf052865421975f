//! Naming helpers.

pub mod names;

#[doc(inline)]
pub use names::{
    camel_case, class_segment, dash_case, escape_class, hyphenate_property, pascal_case,
};
