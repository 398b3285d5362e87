//! Project manifest loading for the templated report.
//!
//! Every loader is tolerant: a missing or unreadable file yields nothing
//! rather than an error, since manifests only enrich the report.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const README_NAMES: &[&str] = &[
    "README.md",
    "README.MD",
    "README.txt",
    "README",
    "readme.md",
    "readme.txt",
];

const REQUIREMENTS_NAMES: &[&str] = &["requirements.txt", "requirements-dev.txt"];

/// Characters of `pom.xml` kept for the report.
pub const POM_EXCERPT_CHARS: usize = 2000;

/// The subset of `package.json` the report uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    /// Declaration order is kept (`preserve_order`).
    #[serde(default)]
    pub dependencies: Map<String, Value>,
}

impl PackageJson {
    /// Dependency names in the order the manifest declares them.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies.keys().map(String::as_str).collect()
    }
}

/// Manifests found at the repository root.
#[derive(Debug, Clone, Default)]
pub struct ProjectManifests {
    pub readme: Option<String>,
    pub package_json: Option<PackageJson>,
    pub requirements: Vec<String>,
    pub pom_xml: Option<String>,
}

impl ProjectManifests {
    pub fn load(root: &Path) -> Self {
        Self {
            readme: load_readme(root),
            package_json: load_package_json(root),
            requirements: load_requirements(root),
            pom_xml: load_pom_xml(root),
        }
    }
}

/// Read a file as UTF-8, replacing invalid sequences.
fn read_lossy(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read manifest");
            None
        }
    }
}

/// Contents of the first README found.
pub fn load_readme(root: &Path) -> Option<String> {
    let found = README_NAMES
        .iter()
        .find_map(|name| read_lossy(&root.join(name)));
    if found.is_none() {
        debug!("no README found");
    }
    found
}

/// Parsed `package.json`, or None if absent or malformed.
pub fn load_package_json(root: &Path) -> Option<PackageJson> {
    let content = read_lossy(&root.join("package.json"))?;
    match serde_json::from_str(&content) {
        Ok(pkg) => Some(pkg),
        Err(e) => {
            debug!(error = %e, "ignoring malformed package.json");
            None
        }
    }
}

/// Requirement lines of the first requirements file found.
pub fn load_requirements(root: &Path) -> Vec<String> {
    REQUIREMENTS_NAMES
        .iter()
        .find_map(|name| read_lossy(&root.join(name)))
        .map(|content| {
            content
                .lines()
                .filter(|line| !line.starts_with('#'))
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Leading excerpt of `pom.xml`.
pub fn load_pom_xml(root: &Path) -> Option<String> {
    read_lossy(&root.join("pom.xml")).map(|c| c.chars().take(POM_EXCERPT_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_readme_priority() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("README"), "plain").unwrap();
        std::fs::write(temp.path().join("README.md"), "# Markdown").unwrap();

        assert_eq!(load_readme(temp.path()).as_deref(), Some("# Markdown"));
    }

    #[test]
    fn test_missing_manifests() {
        let temp = TempDir::new().unwrap();
        let manifests = ProjectManifests::load(temp.path());
        assert!(manifests.readme.is_none());
        assert!(manifests.package_json.is_none());
        assert!(manifests.requirements.is_empty());
        assert!(manifests.pom_xml.is_none());
    }

    #[test]
    fn test_package_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name": "web", "dependencies": {"react": "^18.0.0", "axios": "1.6.0"}}"#,
        )
        .unwrap();

        let pkg = load_package_json(temp.path()).unwrap();
        assert_eq!(pkg.dependency_names(), vec!["react", "axios"]);
    }

    #[test]
    fn test_dependency_names_keep_declaration_order() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"zod": "1", "react": "1", "axios": "1"}, "devDependencies": {"jest": "29"}}"#,
        )
        .unwrap();

        let pkg = load_package_json(temp.path()).unwrap();
        assert_eq!(pkg.dependency_names(), vec!["zod", "react", "axios"]);
    }

    #[test]
    fn test_malformed_package_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{ not json").unwrap();
        assert!(load_package_json(temp.path()).is_none());
    }

    #[test]
    fn test_requirements() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("requirements.txt"),
            "# pinned\nrequests==2.31.0\n\n  flask>=2.0  \n",
        )
        .unwrap();

        assert_eq!(
            load_requirements(temp.path()),
            vec!["requests==2.31.0".to_string(), "flask>=2.0".to_string()]
        );
    }

    #[test]
    fn test_pom_excerpt_is_bounded() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pom.xml"), "x".repeat(5000)).unwrap();
        assert_eq!(load_pom_xml(temp.path()).unwrap().len(), POM_EXCERPT_CHARS);
    }
}
