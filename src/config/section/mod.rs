//! Configuration section definitions.
//!
//! Each module corresponds to a section in `docs.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `site`    | `[site]`     | Supported and default languages      |
//! | `content` | `[content]`  | Content root and file extension      |
//! | `render`  | `[render]`   | Markdown extensions, TOC depth       |
//! | `scroll`  | `[scroll]`   | Active-heading observation tuning    |

mod content;
mod render;
mod scroll;
mod site;

pub use content::ContentConfig;
pub use render::RenderConfig;
pub use scroll::ScrollConfig;
pub use site::SiteSectionConfig;
