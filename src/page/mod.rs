//! Best-effort post-processing of rendered pages.
//!
//! Every transform here leaves the page unchanged when its input does not
//! look as expected; none of them can fail a build.

mod base_path;
mod locale;
mod placeholder;

pub use base_path::BasePathRewriter;
pub use locale::resolve_page_locale;
pub use placeholder::{
    LINK_CONFIRM_GLOBAL,
    inject_link_confirm_script,
    link_confirm_script,
    substitute_placeholders,
};
