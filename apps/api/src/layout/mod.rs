// Text-to-page layout: sanitizing, line classification, page chrome, pagination.
// Pure and synchronous; callers run it inside tokio::task::spawn_blocking.

pub mod classify;
pub mod document;
pub mod engine;
pub mod font_metrics;
pub mod sanitize;
pub mod template;

// Re-export the public API consumed by the renderer and handlers.
pub use engine::layout;
pub use sanitize::sanitize;
pub use template::{default_template, TemplateConfig};
