//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod tags;

pub(crate) use render::RenderArgs;
pub(crate) use tags::TagsArgs;
