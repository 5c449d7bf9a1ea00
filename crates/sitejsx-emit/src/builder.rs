//! Batch builder for a directory of captured pages.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use sitejsx_convert::{AssetMap, ConvertOptions, Converter};

use crate::assets::{load_asset_map, minify_css};
use crate::component::{component_name, render_page_component};
use crate::error::EmitError;
use crate::validate::validate_jsx_module;

/// Configuration for building a project.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Directory of captured `.html` snapshots
    pub pages_dir: PathBuf,

    /// Output project root; modules land in `src/pages`
    pub output_dir: PathBuf,

    /// JSON sanitized filename map
    pub asset_map: Option<PathBuf>,

    /// Flat image directory, relative to the page modules
    pub images_dir: String,

    /// Element carrying body attributes
    pub wrapper_tag: String,

    /// Base prefix for custom-property classes; each page extends it
    pub custom_var_prefix: String,

    /// Keep HTML comments as JSX comments
    pub keep_comments: bool,

    /// Minify the per-page CSS
    pub minify: bool,

    /// Parse every generated module before writing it
    pub validate: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            pages_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("out"),
            asset_map: None,
            images_dir: options.images_dir,
            wrapper_tag: options.wrapper_tag,
            custom_var_prefix: options.custom_var_prefix,
            keep_comments: options.keep_comments,
            minify: false,
            validate: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of page modules written
    pub pages: usize,

    /// Distinct image imports across all pages
    pub images: usize,

    /// Custom-property classes across all pages
    pub css_classes: usize,

    /// Pages that could not be built
    pub failures: Vec<PageFailure>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// A page that failed without stopping the build.
#[derive(Debug)]
pub struct PageFailure {
    pub source: PathBuf,
    pub error: EmitError,
}

/// An entry of `pages.json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub route: String,
    pub component: String,
    pub module: String,
    pub source: String,
}

/// A discovered page.
#[derive(Debug)]
struct PageInfo {
    source_path: PathBuf,
    relative_path: PathBuf,
    route: String,
    component: String,
    /// Lowercase slug used in the page's class prefix
    slug: String,
}

/// What one page contributed.
#[derive(Debug)]
struct PageOutput {
    entry: ManifestEntry,
    images: HashSet<String>,
    css_classes: usize,
}

/// Converts every page under a directory into a React page module.
pub struct ProjectBuilder {
    config: ProjectConfig,
    assets: AssetMap,
}

impl ProjectBuilder {
    /// Create a builder, loading the asset map if one is configured.
    pub fn new(config: ProjectConfig) -> Result<Self, EmitError> {
        let assets = match &config.asset_map {
            Some(path) => load_asset_map(path)?,
            None => AssetMap::new(),
        };

        // Fail on bad options before touching any page.
        base_options(&config).validate()?;

        Ok(Self { config, assets })
    }

    /// Build every page, in parallel.
    pub fn build(&self) -> Result<BuildResult, EmitError> {
        let start = Instant::now();

        let pages = self.discover_pages()?;
        tracing::info!(
            "Converting {} pages from {}",
            pages.len(),
            self.config.pages_dir.display()
        );

        let pages_out = self.pages_out_dir();
        fs::create_dir_all(&pages_out).map_err(|e| EmitError::WriteError(e.to_string()))?;

        let results: Vec<(&PageInfo, Result<PageOutput, EmitError>)> = pages
            .par_iter()
            .map(|page| (page, self.build_page(page)))
            .collect();

        let mut manifest = Vec::new();
        let mut images = HashSet::new();
        let mut css_classes = 0;
        let mut failures = Vec::new();

        for (page, result) in results {
            match result {
                Ok(output) => {
                    manifest.push(output.entry);
                    images.extend(output.images);
                    css_classes += output.css_classes;
                }
                Err(error) => {
                    tracing::warn!("Failed to build {}: {}", page.source_path.display(), error);
                    failures.push(PageFailure {
                        source: page.source_path.clone(),
                        error,
                    });
                }
            }
        }

        manifest.sort_by(|a, b| a.route.cmp(&b.route));
        self.write_manifest(&manifest)?;

        let duration = start.elapsed();
        tracing::info!(
            pages = manifest.len(),
            failures = failures.len(),
            "Build finished in {}ms",
            duration.as_millis()
        );

        Ok(BuildResult {
            pages: manifest.len(),
            images: images.len(),
            css_classes,
            failures,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn pages_out_dir(&self) -> PathBuf {
        self.config.output_dir.join("src").join("pages")
    }

    /// Find all HTML pages, sorted by path, with unique component names.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, EmitError> {
        let pages_dir = &self.config.pages_dir;
        if !pages_dir.is_dir() {
            return Err(EmitError::MissingPagesDir(pages_dir.display().to_string()));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(pages_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| path.is_file() && is_html(path))
            .collect();
        paths.sort();

        let mut taken = HashSet::new();
        let pages = paths
            .into_iter()
            .map(|source_path| {
                let relative_path = source_path
                    .strip_prefix(pages_dir)
                    .unwrap_or(&source_path)
                    .to_path_buf();
                let stem = page_stem(&relative_path);

                let base = component_name(&stem);
                let mut component = base.clone();
                let mut n = 2;
                while !taken.insert(component.clone()) {
                    component = format!("{base}{n}");
                    n += 1;
                }

                PageInfo {
                    route: route_for(&stem),
                    slug: component.to_ascii_lowercase(),
                    component,
                    source_path,
                    relative_path,
                }
            })
            .collect();

        Ok(pages)
    }

    fn build_page(&self, page: &PageInfo) -> Result<PageOutput, EmitError> {
        let html = fs::read_to_string(&page.source_path).map_err(|e| EmitError::ReadError {
            path: page.source_path.display().to_string(),
            message: e.to_string(),
        })?;

        let options = ConvertOptions {
            custom_var_prefix: format!("{}-{}", self.config.custom_var_prefix, page.slug),
            ..base_options(&self.config)
        };
        let conversion = Converter::new(options)?.convert(&html, &self.assets);

        let css_file = (!conversion.css_vars.is_empty()).then(|| format!("{}.css", page.component));
        let module = render_page_component(&page.component, &conversion, css_file.as_deref())?;

        if self.config.validate {
            validate_jsx_module(&module)?;
        }

        let pages_out = self.pages_out_dir();
        let module_path = pages_out.join(format!("{}.jsx", page.component));
        fs::write(&module_path, module).map_err(|e| EmitError::WriteError(e.to_string()))?;

        if let Some(css_file) = &css_file {
            let css = conversion.css();
            let css = if self.config.minify { minify_css(&css)? } else { css };
            fs::write(pages_out.join(css_file), css)
                .map_err(|e| EmitError::WriteError(e.to_string()))?;
        }

        tracing::debug!(
            component = %page.component,
            diagnostics = conversion.diagnostics.len(),
            "wrote {}",
            module_path.display()
        );

        Ok(PageOutput {
            entry: ManifestEntry {
                route: page.route.clone(),
                component: page.component.clone(),
                module: format!("src/pages/{}.jsx", page.component),
                source: page.relative_path.to_string_lossy().replace('\\', "/"),
            },
            images: conversion
                .images
                .iter()
                .map(|(filename, _)| filename.to_string())
                .collect(),
            css_classes: conversion.css_vars.len(),
        })
    }

    fn write_manifest(&self, manifest: &[ManifestEntry]) -> Result<(), EmitError> {
        let json = serde_json::to_string_pretty(manifest)
            .map_err(|e| EmitError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("pages.json"), json)
            .map_err(|e| EmitError::WriteError(e.to_string()))
    }
}

fn base_options(config: &ProjectConfig) -> ConvertOptions {
    ConvertOptions {
        wrapper_tag: config.wrapper_tag.clone(),
        images_dir: config.images_dir.clone(),
        custom_var_prefix: config.custom_var_prefix.clone(),
        keep_comments: config.keep_comments,
        normalize_output: false,
    }
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html" | "htm")
    )
}

/// `blog/post.html` -> `blog/post`.
fn page_stem(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `index` -> `/`, `blog/index` -> `/blog`, `blog/post` -> `/blog/post`.
fn route_for(stem: &str) -> String {
    let route = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };
    format!("/{route}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &[u8]) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(temp: &TempDir) -> ProjectConfig {
        ProjectConfig {
            pages_dir: temp.path().join("pages"),
            output_dir: temp.path().join("out"),
            ..Default::default()
        }
    }

    #[test]
    fn derives_routes() {
        assert_eq!(route_for("index"), "/");
        assert_eq!(route_for("blog/index"), "/blog");
        assert_eq!(route_for("blog/post"), "/blog/post");
        assert_eq!(route_for("reindex"), "/reindex");
        assert_eq!(page_stem(Path::new("blog/post.html")), "blog/post");
    }

    #[test]
    fn builds_pages_and_manifest() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(
            &pages,
            "index.html",
            br#"<html><body class="home"><div style="--accent: red">Hi</div><img src="/img/logo.png"></body></html>"#,
        );
        write(&pages, "blog/post.html", b"<body><article>Post</article></body>");
        write(&pages, "notes.txt", b"ignored");
        write(
            temp.path(),
            "assets.json",
            br#"{"/img/logo.png": "_img_logo.png"}"#,
        );

        let builder = ProjectBuilder::new(ProjectConfig {
            asset_map: Some(temp.path().join("assets.json")),
            ..config(&temp)
        })
        .unwrap();
        let result = builder.build().unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.images, 1);
        assert_eq!(result.css_classes, 1);
        assert!(result.failures.is_empty());

        let out = temp.path().join("out");
        let index = fs::read_to_string(out.join("src/pages/Index.jsx")).unwrap();
        assert!(index.contains("import imgLogo from './images-flat/_img_logo.png';"));
        assert!(index.contains("import './Index.css';"));
        assert!(index.contains(r#"className="custom-var-index-1">Hi</div>"#));

        let css = fs::read_to_string(out.join("src/pages/Index.css")).unwrap();
        assert_eq!(css, ".custom-var-index-1 {\n  --accent: red;\n}\n");

        assert!(out.join("src/pages/BlogPost.jsx").exists());
        assert!(!out.join("src/pages/BlogPost.css").exists());

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("pages.json")).unwrap()).unwrap();
        assert_eq!(
            manifest,
            serde_json::json!([
                {"route": "/", "component": "Index", "module": "src/pages/Index.jsx", "source": "index.html"},
                {"route": "/blog/post", "component": "BlogPost", "module": "src/pages/BlogPost.jsx", "source": "blog/post.html"}
            ])
        );
    }

    #[test]
    fn records_failures_without_stopping() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages, "good.html", b"<p>fine</p>");
        write(&pages, "bad.html", &[0xff, 0xfe, 0x00]);

        let result = ProjectBuilder::new(config(&temp)).unwrap().build().unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].source.ends_with("bad.html"));
        assert!(matches!(result.failures[0].error, EmitError::ReadError { .. }));
    }

    #[test]
    fn disambiguates_component_names() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        write(&pages, "blog-post.html", b"<p>a</p>");
        write(&pages, "blog/post.html", b"<p>b</p>");

        let result = ProjectBuilder::new(config(&temp)).unwrap().build().unwrap();

        assert_eq!(result.pages, 2);
        let out = temp.path().join("out/src/pages");
        assert!(out.join("BlogPost.jsx").exists());
        assert!(out.join("BlogPost2.jsx").exists());
    }

    #[test]
    fn minifies_page_css() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("pages"),
            "index.html",
            br#"<body><i style="--a: 1px"></i></body>"#,
        );

        ProjectBuilder::new(ProjectConfig {
            minify: true,
            ..config(&temp)
        })
        .unwrap()
        .build()
        .unwrap();

        let css = fs::read_to_string(temp.path().join("out/src/pages/Index.css")).unwrap();
        assert!(!css.contains('\n'));
        assert!(css.starts_with(".custom-var-index-1{"));
    }

    #[test]
    fn rejects_missing_pages_dir_and_bad_options() {
        let temp = TempDir::new().unwrap();

        let builder = ProjectBuilder::new(config(&temp)).unwrap();
        assert!(matches!(builder.build(), Err(EmitError::MissingPagesDir(_))));

        let bad = ProjectBuilder::new(ProjectConfig {
            wrapper_tag: "Not A Tag".to_string(),
            ..config(&temp)
        });
        assert!(matches!(bad, Err(EmitError::Convert(_))));
    }
}
