//! Configuration options for site generation

use std::path::PathBuf;

/// Options for [`SiteGenerator`](crate::SiteGenerator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// Directory holding the Markdown pages
    pub content_dir: PathBuf,

    /// Directory whose files are copied verbatim
    pub static_dir: PathBuf,

    /// Directory the site is written to (deleted and recreated)
    pub output_dir: PathBuf,

    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders
    pub template: PathBuf,

    /// Base path root-relative links are rewritten to
    pub basepath: String,

    /// Verbose logging
    pub debug: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("docs"),
            template: PathBuf::from("template.html"),
            basepath: "/".to_string(),
            debug: false,
        }
    }
}
