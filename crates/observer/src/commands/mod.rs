//! CLI command implementations.

mod charts;
mod input;
pub(crate) mod publish;
pub(crate) mod render;

pub(crate) use publish::PublishCommand;
pub(crate) use render::RenderCommand;
