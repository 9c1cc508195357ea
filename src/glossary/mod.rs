//! Read-only reference data for form dropdowns.
//!
//! Glossary files are loaded once at startup and injected into the
//! application state; request traffic never mutates the store. Loading is
//! best-effort: a missing or malformed file is logged and skipped so one bad
//! reference file cannot prevent startup.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// The fixed set of glossary categories served to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlossaryType {
    AcademicSession,
    Programme,
    Course,
    Group,
    Faculty,
    Activity,
    SpecialRoom,
}

impl GlossaryType {
    pub const ALL: [GlossaryType; 7] = [
        GlossaryType::AcademicSession,
        GlossaryType::Programme,
        GlossaryType::Course,
        GlossaryType::Group,
        GlossaryType::Faculty,
        GlossaryType::Activity,
        GlossaryType::SpecialRoom,
    ];

    /// The category name as it appears in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            GlossaryType::AcademicSession => "academicsession",
            GlossaryType::Programme => "programme",
            GlossaryType::Course => "course",
            GlossaryType::Group => "group",
            GlossaryType::Faculty => "faculty",
            GlossaryType::Activity => "activity",
            GlossaryType::SpecialRoom => "specialroom",
        }
    }

    /// Parses an API path segment into a glossary type.
    pub fn parse(name: &str) -> Option<GlossaryType> {
        GlossaryType::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// The reference file holding this category's entries.
    pub fn file_name(&self) -> &'static str {
        match self {
            GlossaryType::AcademicSession => "glossary_sgcm_academicsessioncode.json",
            GlossaryType::Programme => "glossary_sgcm_programmecode.json",
            GlossaryType::Course => "glossary_sgcm_coursecode.json",
            GlossaryType::Group => "glossary_sgcm_groupcode.json",
            GlossaryType::Faculty => "glossary_sgcm_facultycode.json",
            GlossaryType::Activity => "glossary_dtct_activitycode.json",
            GlossaryType::SpecialRoom => "glossary_dtct_specialroomcode.json",
        }
    }
}

/// One reference code with its display description.
///
/// The commencement-week fields are only populated for the academic-session
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commencement_week_1: Option<String>,
    #[serde(default)]
    pub commencement_week_2: Option<String>,
}

impl GlossaryEntry {
    /// Serializes the entry the way the form expects it: code and
    /// description always, commencement weeks only for academic sessions.
    pub fn to_value(&self, glossary_type: GlossaryType) -> Value {
        if glossary_type == GlossaryType::AcademicSession {
            json!({
                "code": self.code,
                "description": self.description,
                "commencement_week_1": self.commencement_week_1.clone().unwrap_or_default(),
                "commencement_week_2": self.commencement_week_2.clone().unwrap_or_default(),
            })
        } else {
            json!({
                "code": self.code,
                "description": self.description,
            })
        }
    }
}

/// In-memory glossary cache, immutable after load.
pub struct GlossaryStore {
    entries: HashMap<GlossaryType, Vec<GlossaryEntry>>,
}

impl GlossaryStore {
    /// Creates an empty store
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Loads every glossary category from `glossary_dir`.
    ///
    /// Files that are absent or fail to parse are skipped with a warning.
    /// Duplicate codes within a file keep the first occurrence; entries with
    /// an empty code are dropped.
    pub fn load_from_directory(glossary_dir: &Path) -> Self {
        let mut entries = HashMap::new();

        for glossary_type in GlossaryType::ALL {
            let path = glossary_dir.join(glossary_type.file_name());

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(
                        "Glossary file not found, skipping: {} ({e})",
                        path.display()
                    );
                    continue;
                }
            };

            let parsed: Vec<GlossaryEntry> = match serde_json::from_str(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Malformed glossary file, skipping: {} ({e})", path.display());
                    continue;
                }
            };

            let mut seen = HashSet::new();
            let loaded: Vec<GlossaryEntry> = parsed
                .into_iter()
                .filter(|entry| !entry.code.is_empty() && seen.insert(entry.code.clone()))
                .collect();

            info!(
                "Loaded {} entries for {}",
                loaded.len(),
                glossary_type.as_str()
            );
            entries.insert(glossary_type, loaded);
        }

        Self { entries }
    }

    /// Returns the cached entries for a category (empty if never loaded).
    pub fn entries(&self, glossary_type: GlossaryType) -> &[GlossaryEntry] {
        self.entries
            .get(&glossary_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of cached entries across all categories.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
