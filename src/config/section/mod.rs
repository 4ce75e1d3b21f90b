//! Configuration section definitions.
//!
//! Each module corresponds to a section in `medial.toml`:
//!
//! | Module   | TOML Section | Purpose                               |
//! |----------|--------------|---------------------------------------|
//! | `filter` | `[filter]`   | Format allow-list, zone depth policy  |
//! | `render` | `[render]`   | Stock embed renderer settings         |
//! | `site`   | `[site]`     | Site root                             |

mod filter;
mod render;
mod site;

pub use filter::FilterSectionConfig;
pub use render::RenderConfig;
pub use site::SiteSectionConfig;
