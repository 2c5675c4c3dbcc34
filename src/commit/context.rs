//! Cheap project-type detection used to enrich the prompt.

use std::collections::HashSet;
use std::path::Path;

/// Marker files and the descriptor each contributes, in output order.
const PROJECT_MARKERS: &[(&str, &str)] = &[
    ("go.mod", "Go project."),
    ("package.json", "JavaScript/Node.js project."),
    ("pom.xml", "Java/Maven project."),
    ("CMakeLists.txt", "C/C++ project with CMake."),
    ("pyproject.toml", "Python project."),
    ("Cargo.toml", "Rust project."),
];

/// Project-type descriptors such as `"Go project."`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    pub descriptors: Vec<String>,
}

impl ProjectContext {
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors joined with single spaces.
    pub fn sentence(&self) -> String {
        self.descriptors.join(" ")
    }
}

/// Describe the project rooted at `workdir` from its top-level entries.
///
/// Only the directory itself is listed. Matching descriptors follow the
/// marker table order, not file-system order.
pub fn describe(workdir: &Path) -> std::io::Result<ProjectContext> {
    let mut names = HashSet::new();
    for entry in std::fs::read_dir(workdir)? {
        let entry = entry?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(from_entries(&names))
}

fn from_entries(names: &HashSet<String>) -> ProjectContext {
    let descriptors = PROJECT_MARKERS
        .iter()
        .filter(|(marker, _)| names.contains(*marker))
        .map(|(_, descriptor)| descriptor.to_string())
        .collect();

    ProjectContext { descriptors }
}
