//! Literal markers recognised by the scanner.

/// The region markers and annotation control words of a program document.
///
/// # Examples
///
/// ```
/// # use confsched_parser::Markers;
/// let markers = Markers::default().with_timed_item("\\talk");
/// assert_eq!(markers.region_start(), "\\begin{parallelsessions}");
/// assert_eq!(markers.timed_item(), "\\talk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    region_start: String,
    region_end: String,
    group_header: String,
    session: String,
    timed_item: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            region_start: "\\begin{parallelsessions}".to_string(),
            region_end: "\\end{parallelsessions}".to_string(),
            group_header: "\\sessionhead".to_string(),
            session: "\\session".to_string(),
            timed_item: "\\at".to_string(),
        }
    }
}

impl Markers {
    /// Sets the line prefix opening the region.
    pub fn with_region_start(mut self, marker: impl Into<String>) -> Self {
        self.region_start = marker.into();
        self
    }

    /// Sets the line prefix closing the region.
    pub fn with_region_end(mut self, marker: impl Into<String>) -> Self {
        self.region_end = marker.into();
        self
    }

    /// Sets the session-group header control word.
    pub fn with_group_header(mut self, marker: impl Into<String>) -> Self {
        self.group_header = marker.into();
        self
    }

    /// Sets the session control word.
    pub fn with_session(mut self, marker: impl Into<String>) -> Self {
        self.session = marker.into();
        self
    }

    /// Sets the timed-item control word.
    pub fn with_timed_item(mut self, marker: impl Into<String>) -> Self {
        self.timed_item = marker.into();
        self
    }

    pub fn region_start(&self) -> &str {
        &self.region_start
    }

    pub fn region_end(&self) -> &str {
        &self.region_end
    }

    pub fn group_header(&self) -> &str {
        &self.group_header
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn timed_item(&self) -> &str {
        &self.timed_item
    }
}
