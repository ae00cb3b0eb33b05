//! Markup segmentation for template files.
//!
//! [`segment`] splits a whole file into typed [`Run`]s that cover it
//! exactly; [`parse_tag`] extracts the name and attributes of one start
//! tag run. Both treat template spans (`<& ... &>`) as opaque text, so
//! template code can sit anywhere: in content, inside attribute values,
//! or in place of an attribute.

mod run;
mod segmenter;
mod tag_info;

pub use run::{Run, RunKind};
pub use segmenter::segment;
pub use tag_info::{parse_tag, Attribute, TagInfo};
