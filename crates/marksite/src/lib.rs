//! # marksite
//!
//! Generate a static site from a directory of Markdown pages.
//!
//! Every `.md` file under the content directory is converted with
//! [`marksite_core`], substituted into an HTML template and written to the
//! same relative path under the output directory. Static assets are copied
//! across verbatim.
//!
//! ## Template placeholders
//!
//! - `{{ Title }}` - the text of the page's first `# ` heading
//! - `{{ Content }}` - the rendered page body
//!
//! Root-relative `href="/` and `src="/` references are rewritten to the
//! configured base path, so a site can be served from a sub-directory.
//!
//! ## Example
//!
//! ```rust
//! use marksite::render_page;
//!
//! let page = render_page(
//!     "<title>{{ Title }}</title><a href=\"/about\">{{ Content }}</a>",
//!     "Home",
//!     "<div><p>Hi</p></div>",
//!     "/blog/",
//! );
//! assert_eq!(
//!     page,
//!     "<title>Home</title><a href=\"/blog/about\"><div><p>Hi</p></div></a>"
//! );
//! ```

use std::path::PathBuf;

use marksite_core::MarkupError;

mod options;
mod publish;
mod template;

pub use options::SiteOptions;
pub use publish::{
    clean_output, copy_static, generate_page, generate_pages, PublishReport, SiteGenerator,
};
pub use template::{normalize_basepath, render_page, CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER};

/// Error type for site generation
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert {}: {source}", .path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    #[error("Refusing to delete {}: it contains site inputs", .path.display())]
    UnsafeClean { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, SiteError>;
