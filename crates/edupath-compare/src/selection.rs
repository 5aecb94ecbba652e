//! Comparison selection building and compare-link encoding/decoding.
//!
//! A selection is one course *name* (comparison groups by name across
//! institutes, not by course ID) plus 2–3 distinct institute slugs.
//! The link format is `course=<percent-encoded>&institutes=<comma-
//! joined slugs>`; slugs are URL-safe by construction and need no
//! escaping.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::CompareError;

/// Maximum institutes in one comparison.
pub const MAX_INSTITUTES: usize = 3;

/// Minimum institutes for a valid comparison.
pub const MIN_INSTITUTES: usize = 2;

/// Query-string escaping for the course name. Keep the unreserved
/// characters of RFC 3986 readable.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Accumulates user picks for a comparison. Pure state, no side
/// effects.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelection {
    course_name: Option<String>,
    institute_slugs: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the course name. Changing it resets the institute
    /// picks, since they were options for the previous course.
    pub fn choose_course(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.course_name.as_deref() != Some(name.as_str()) {
            self.institute_slugs.clear();
        }
        self.course_name = Some(name);
    }

    /// Add an institute pick. Duplicates are ignored; picks beyond
    /// [`MAX_INSTITUTES`] are rejected.
    pub fn pick_institute(&mut self, slug: impl Into<String>) -> bool {
        let slug = slug.into();
        if self.institute_slugs.contains(&slug) {
            return false;
        }
        if self.institute_slugs.len() >= MAX_INSTITUTES {
            return false;
        }
        self.institute_slugs.push(slug);
        true
    }

    pub fn unpick_institute(&mut self, slug: &str) {
        self.institute_slugs.retain(|s| s != slug);
    }

    pub fn course_name(&self) -> Option<&str> {
        self.course_name.as_deref()
    }

    pub fn institute_slugs(&self) -> &[String] {
        &self.institute_slugs
    }

    /// The compare action is enabled iff a course name is chosen and
    /// at least [`MIN_INSTITUTES`] distinct institutes are picked.
    pub fn is_ready(&self) -> bool {
        self.course_name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false)
            && self.institute_slugs.len() >= MIN_INSTITUTES
    }

    /// Produce the navigable link, or fail if the selection is not
    /// ready.
    pub fn build(&self) -> Result<CompareLink, CompareError> {
        if !self.is_ready() {
            return Err(CompareError::InvalidSelection);
        }
        Ok(CompareLink {
            course_name: self.course_name.clone().unwrap_or_default(),
            institute_slugs: self.institute_slugs.clone(),
        })
    }
}

/// A validated, shareable comparison link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareLink {
    course_name: String,
    institute_slugs: Vec<String>,
}

impl CompareLink {
    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn institute_slugs(&self) -> &[String] {
        &self.institute_slugs
    }

    /// Encode as query parameters:
    /// `course=<encoded name>&institutes=<comma-joined slugs>`.
    pub fn to_query(&self) -> String {
        format!(
            "course={}&institutes={}",
            utf8_percent_encode(&self.course_name, QUERY),
            self.institute_slugs.join(",")
        )
    }

    /// Full path form, e.g. `/compare?course=MBA&institutes=a,b`.
    pub fn to_path(&self) -> String {
        format!("/compare?{}", self.to_query())
    }
}

/// Decoded comparison parameters, as arriving from a compare link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareParams {
    pub course_name: String,
    pub institute_slugs: Vec<String>,
}

impl CompareParams {
    /// Build from already-decoded query values (e.g. an HTTP layer's
    /// query extractor). Absent/empty course name or fewer than 2
    /// slugs (after dropping empties) is the terminal
    /// invalid-comparison state.
    pub fn from_query_parts(
        course: Option<&str>,
        institutes: Option<&str>,
    ) -> Result<Self, CompareError> {
        let course_name = match course {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Err(CompareError::InvalidSelection),
        };

        let institute_slugs: Vec<String> = institutes
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        if institute_slugs.len() < MIN_INSTITUTES {
            return Err(CompareError::InvalidSelection);
        }

        Ok(Self {
            course_name,
            institute_slugs,
        })
    }

    /// Parse a raw query string (`course=..&institutes=..`),
    /// percent-decoding values. Inverse of [`CompareLink::to_query`].
    pub fn from_query(query: &str) -> Result<Self, CompareError> {
        let mut course = None;
        let mut institutes = None;

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decoded = percent_decode_str(value)
                .decode_utf8()
                .map_err(|_| CompareError::InvalidSelection)?
                .into_owned();
            match key {
                "course" => course = Some(decoded),
                "institutes" => institutes = Some(decoded),
                _ => {}
            }
        }

        Self::from_query_parts(course.as_deref(), institutes.as_deref())
    }
}
