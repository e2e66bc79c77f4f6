//! Configuration types for confsched runs.
//!
//! All types implement [`serde::Deserialize`] and every key is optional, so a
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`JobConfig`] - Output names of the combined documents.
//! - [`MarkerConfig`] - Region markers and annotation control words.
//! - [`RendererConfig`] - External typesetting commands.
//! - [`TemplateConfig`] - Document preambles.
//!
//! # Example
//!
//! ```
//! # use confsched::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.program(), "program.tex");
//! assert_eq!(config.renderer().passes(), 2);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use confsched_parser::Markers;

use crate::{document::templates, error::ConfschedError};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File name of the program document, relative to the working directory.
    program: String,

    /// Directory for scratch areas; the system temporary directory if unset.
    scratch_root: Option<PathBuf>,

    jobs: JobConfig,
    markers: MarkerConfig,
    renderer: RendererConfig,
    templates: TemplateConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            program: "program.tex".to_string(),
            scratch_root: None,
            jobs: JobConfig::default(),
            markers: MarkerConfig::default(),
            renderer: RendererConfig::default(),
            templates: TemplateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns the program document file name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the scratch root, if configured.
    pub fn scratch_root(&self) -> Option<&Path> {
        self.scratch_root.as_deref()
    }

    /// Returns the output job names.
    pub fn jobs(&self) -> &JobConfig {
        &self.jobs
    }

    /// Returns the marker configuration.
    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the document preambles.
    pub fn templates(&self) -> &TemplateConfig {
        &self.templates
    }

    /// Overrides the program document file name.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Checks values that deserialization alone cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfschedError::Config`] for an empty renderer command, zero
    /// passes, an empty marker, or an empty or duplicated job name.
    pub fn validate(&self) -> Result<(), ConfschedError> {
        if self.renderer.command.trim().is_empty() {
            return Err(ConfschedError::Config(
                "renderer.command must not be empty".to_string(),
            ));
        }
        if self.renderer.passes == 0 {
            return Err(ConfschedError::Config(
                "renderer.passes must be at least 1".to_string(),
            ));
        }
        if let Some(key) = self.markers.first_empty() {
            return Err(ConfschedError::Config(format!(
                "markers.{key} must not be empty"
            )));
        }

        let names = [&self.jobs.master, &self.jobs.rooms, &self.jobs.chairs];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfschedError::Config(
                "job names must not be empty".to_string(),
            ));
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(ConfschedError::Config(format!(
                "job names must be distinct, got master=`{}` rooms=`{}` chairs=`{}`",
                names[0], names[1], names[2]
            )));
        }
        Ok(())
    }
}

/// Output names (without extension) of the combined documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    master: String,
    rooms: String,
    chairs: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            master: "abstracts".to_string(),
            rooms: "rooms".to_string(),
            chairs: "chairs".to_string(),
        }
    }
}

impl JobConfig {
    pub fn master(&self) -> &str {
        &self.master
    }

    pub fn rooms(&self) -> &str {
        &self.rooms
    }

    pub fn chairs(&self) -> &str {
        &self.chairs
    }
}

/// Marker overrides; unset keys keep the [`Markers`] defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    region_start: Option<String>,
    region_end: Option<String>,
    group_header: Option<String>,
    session: Option<String>,
    timed_item: Option<String>,
}

impl MarkerConfig {
    /// Builds the scanner [`Markers`].
    pub fn to_markers(&self) -> Markers {
        let mut markers = Markers::default();
        if let Some(marker) = &self.region_start {
            markers = markers.with_region_start(marker);
        }
        if let Some(marker) = &self.region_end {
            markers = markers.with_region_end(marker);
        }
        if let Some(marker) = &self.group_header {
            markers = markers.with_group_header(marker);
        }
        if let Some(marker) = &self.session {
            markers = markers.with_session(marker);
        }
        if let Some(marker) = &self.timed_item {
            markers = markers.with_timed_item(marker);
        }
        markers
    }

    /// Name of the first marker set to a blank string.
    fn first_empty(&self) -> Option<&'static str> {
        [
            ("region_start", &self.region_start),
            ("region_end", &self.region_end),
            ("group_header", &self.group_header),
            ("session", &self.session),
            ("timed_item", &self.timed_item),
        ]
        .into_iter()
        .find(|(_, marker)| marker.as_deref().is_some_and(|m| m.trim().is_empty()))
        .map(|(key, _)| key)
    }
}

/// External renderer configuration.
///
/// The renderer runs `command args... <jobname>` `passes` times in the scratch
/// area. For single-abstract documents the `crop` command, when not empty, is
/// then run as `crop... <jobname>.pdf` and must produce `<jobname>-crop.pdf`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    command: String,
    args: Vec<String>,
    passes: u8,
    crop: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "pdflatex".to_string(),
            args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
            passes: 2,
            crop: vec![
                "pdfcrop".to_string(),
                "--margins".to_string(),
                "12".to_string(),
            ],
        }
    }
}

impl RendererConfig {
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of typesetting passes (cross references need two).
    pub fn passes(&self) -> u8 {
        self.passes
    }

    /// Crop command and its leading arguments; empty disables cropping.
    pub fn crop(&self) -> &[String] {
        &self.crop
    }
}

/// Document preambles, defaulting to the built-in templates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    single: String,
    master: String,
    rooms: String,
    chairs: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            single: templates::SINGLE.to_string(),
            master: templates::MASTER.to_string(),
            rooms: templates::ROOMS.to_string(),
            chairs: templates::CHAIRS.to_string(),
        }
    }
}

impl TemplateConfig {
    pub fn single(&self) -> &str {
        &self.single
    }

    pub fn master(&self) -> &str {
        &self.master
    }

    pub fn rooms(&self) -> &str {
        &self.rooms
    }

    pub fn chairs(&self) -> &str {
        &self.chairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            program = "schedule.tex"

            [markers]
            timed_item = "\\talk"

            [renderer]
            passes = 1
            crop = []
            "#,
        )
        .unwrap();

        assert_eq!(config.program(), "schedule.tex");
        assert_eq!(config.jobs().master(), "abstracts");
        assert_eq!(config.markers().to_markers().timed_item(), "\\talk");
        assert_eq!(config.markers().to_markers().session(), "\\session");
        assert_eq!(config.renderer().command(), "pdflatex");
        assert_eq!(config.renderer().passes(), 1);
        assert!(config.renderer().crop().is_empty());
        assert!(config.templates().single().contains("\\abstract"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_passes() {
        let config: AppConfig = toml::from_str("[renderer]\npasses = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfschedError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let config: AppConfig = toml::from_str("[markers]\nsession = \"\"\n").unwrap();
        match config.validate() {
            Err(ConfschedError::Config(msg)) => assert!(msg.contains("markers.session")),
            other => panic!("Expected a configuration error, got {other:?}"),
        }

        let config: AppConfig = toml::from_str("[markers]\nsession = \"\\\\talk\"\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_job_names() {
        let config: AppConfig =
            toml::from_str("[jobs]\nrooms = \"signs\"\nchairs = \"signs\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }
}
