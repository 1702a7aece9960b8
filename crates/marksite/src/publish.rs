//! SiteGenerator - cleans the output directory, copies static assets and
//! renders every Markdown page.

use std::fs;
use std::io;
use std::path::Path;

use marksite_core::{extract_title, markdown_to_html, MarkupError};
use tracing::{debug, info};

use crate::options::SiteOptions;
use crate::template::render_page;
use crate::{Result, SiteError};

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

/// Counts of what a publish run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub files_copied: usize,
    pub pages_generated: usize,
}

/// The main service for building a site
pub struct SiteGenerator {
    options: SiteOptions,
}

impl SiteGenerator {
    /// Create a SiteGenerator with default options
    pub fn new() -> Self {
        Self {
            options: SiteOptions::default(),
        }
    }

    /// Create a SiteGenerator with custom options
    pub fn with_options(options: SiteOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    /// Build the whole site: clean, copy static files, generate pages
    ///
    /// The first error aborts the run.
    pub fn publish(&self) -> Result<PublishReport> {
        let options = &self.options;
        let template =
            fs::read_to_string(&options.template).map_err(io_error(&options.template))?;

        let template_dir = options
            .template
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        clean_output(
            &options.output_dir,
            &[
                options.content_dir.as_path(),
                options.static_dir.as_path(),
                template_dir,
            ],
        )?;

        let files_copied = copy_static(&options.static_dir, &options.output_dir)?;
        let pages_generated = generate_pages(
            &options.content_dir,
            &template,
            &options.output_dir,
            &options.basepath,
        )?;

        info!(
            files_copied,
            pages_generated,
            output = %options.output_dir.display(),
            "published site"
        );
        Ok(PublishReport {
            files_copied,
            pages_generated,
        })
    }
}

impl Default for SiteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Delete the output directory if it exists
///
/// Refuses when the output directory is, or contains, any of `guarded`.
pub fn clean_output(output_dir: &Path, guarded: &[&Path]) -> Result<()> {
    if !output_dir.exists() {
        debug!(
            path = %output_dir.display(),
            "output directory does not exist, nothing to delete"
        );
        return Ok(());
    }

    let output = output_dir.canonicalize().map_err(io_error(output_dir))?;
    for input in guarded {
        if let Ok(input) = input.canonicalize() {
            if input.starts_with(&output) {
                return Err(SiteError::UnsafeClean {
                    path: output_dir.to_path_buf(),
                });
            }
        }
    }

    debug!(path = %output_dir.display(), "deleting output directory");
    fs::remove_dir_all(output_dir).map_err(io_error(output_dir))
}

/// Recursively copy every file under `src` into `dst`
///
/// Returns the number of files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).map_err(io_error(dst))?;

    let mut copied = 0;
    for entry in sorted_entries(src)? {
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            debug!(path = %from.display(), "entering directory");
            copied += copy_static(&from, &to)?;
        } else {
            debug!(from = %from.display(), to = %to.display(), "copying file");
            fs::copy(&from, &to).map_err(io_error(&from))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Render one Markdown file through the template and write it out
pub fn generate_page(
    markdown_path: &Path,
    template: &str,
    output_path: &Path,
    basepath: &str,
) -> Result<()> {
    debug!(
        from = %markdown_path.display(),
        to = %output_path.display(),
        "generating page"
    );

    let markdown = fs::read_to_string(markdown_path).map_err(io_error(markdown_path))?;
    // Blocks are split on bare `\n` runs
    let markdown = markdown.replace("\r\n", "\n");
    let title = extract_title(&markdown).map_err(page_error(markdown_path))?;
    let content = markdown_to_html(&markdown).map_err(page_error(markdown_path))?;
    let page = render_page(template, &title, &content, basepath);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(output_path, page).map_err(io_error(output_path))
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory structure under `output_dir`
///
/// Returns the number of pages generated.
pub fn generate_pages(
    content_dir: &Path,
    template: &str,
    output_dir: &Path,
    basepath: &str,
) -> Result<usize> {
    fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

    let mut generated = 0;
    for entry in sorted_entries(content_dir)? {
        let path = entry.path();

        if path.is_dir() {
            debug!(path = %path.display(), "entering directory");
            generated += generate_pages(
                &path,
                template,
                &output_dir.join(entry.file_name()),
                basepath,
            )?;
        } else if is_markdown(&path) {
            let output_path = output_dir
                .join(entry.file_name())
                .with_extension(HTML_EXTENSION);
            generate_page(&path, template, &output_path, basepath)?;
            generated += 1;
        } else {
            debug!(path = %path.display(), "skipping non-markdown file");
        }
    }

    Ok(generated)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

/// Directory entries sorted by file name
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(io_error(dir))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError {
    let path = path.to_path_buf();
    move |source| SiteError::Io { path, source }
}

fn page_error(path: &Path) -> impl FnOnce(MarkupError) -> SiteError {
    let path = path.to_path_buf();
    move |source| SiteError::Page { path, source }
}
