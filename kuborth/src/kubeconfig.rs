//! Aggregates kubeconfig files into the list of contexts the app can offer,
//! and picks the starting context the same way `kubectl` does (§4.6
//! "KubeconfigManager").

use std::collections::HashMap;
use std::env;
use std::path::{Path as FsPath, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawKubeconfig {
    #[serde(rename = "current-context")]
    current_context: Option<String>,
    contexts: Option<Vec<RawNamedContext>>,
}

#[derive(Debug, Deserialize)]
struct RawNamedContext {
    name: String,
    context: Option<RawContextDetails>,
}

#[derive(Debug, Deserialize)]
struct RawContextDetails {
    namespace: Option<String>,
}

const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// One discovered kubeconfig file and the context names it defines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KubeconfigSource {
    pub path: PathBuf,
    pub contexts: Vec<String>,
    pub current_context: Option<String>,
    /// Per-context `context.namespace` for contexts that declare one.
    pub namespaces: HashMap<String, String>,
}

#[derive(Clone, Debug, Default)]
pub struct KubeconfigManager {
    sources: Vec<KubeconfigSource>,
}

impl KubeconfigManager {
    /// Discover kubeconfig files from `KUBECONFIG` (colon/semicolon
    /// separated), falling back to `~/.kube/config`.
    pub fn discover() -> Self {
        let paths = Self::candidate_paths();
        let sources = paths.iter().filter_map(|p| Self::read_source(p)).collect();
        KubeconfigManager { sources }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        if let Ok(value) = env::var("KUBECONFIG") {
            let paths: Vec<PathBuf> = value.split(PATH_SEPARATOR).filter(|s| !s.is_empty()).map(PathBuf::from).collect();
            if !paths.is_empty() {
                return paths;
            }
        }
        dirs_next_home().map(|h| vec![h.join(".kube").join("config")]).unwrap_or_default()
    }

    fn read_source(path: &FsPath) -> Option<KubeconfigSource> {
        let text = std::fs::read_to_string(path).ok()?;
        let raw: RawKubeconfig = serde_yaml::from_str(&text).ok()?;

        let mut contexts = Vec::new();
        let mut namespaces = HashMap::new();
        for c in raw.contexts.unwrap_or_default() {
            if let Some(ns) = c.context.as_ref().and_then(|d| d.namespace.clone()) {
                namespaces.insert(c.name.clone(), ns);
            }
            contexts.push(c.name);
        }

        Some(KubeconfigSource { path: path.to_path_buf(), contexts, current_context: raw.current_context, namespaces })
    }

    pub fn sources(&self) -> &[KubeconfigSource] {
        &self.sources
    }

    pub fn contexts(&self) -> Vec<String> {
        let mut out: Vec<String> = self.sources.iter().flat_map(|s| s.contexts.iter().cloned()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// The context to start in: the first path of `KUBECONFIG`'s current
    /// context, else any source's current context, else the first
    /// discovered context (§4.6).
    pub fn current_context(&self) -> Option<String> {
        self.sources
            .first()
            .and_then(|s| s.current_context.clone())
            .or_else(|| self.sources.iter().find_map(|s| s.current_context.clone()))
            .or_else(|| self.contexts().into_iter().next())
    }

    pub fn path_for_context(&self, context: &str) -> Option<PathBuf> {
        self.sources.iter().find(|s| s.contexts.iter().any(|c| c == context)).map(|s| s.path.clone())
    }

    /// The `context.namespace` declared for `context`, if any source
    /// declares one, for startup auto-navigation (§8 scenario 1).
    pub fn default_namespace(&self, context: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.namespaces.get(context).cloned())
    }
}

fn dirs_next_home() -> Option<PathBuf> {
    directories_next::UserDirs::new().map(|d| d.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_contexts_and_current_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            "current-context: dev\ncontexts:\n- name: dev\n- name: prod\n"
        )
        .unwrap();
        let source = KubeconfigManager::read_source(&path).unwrap();
        assert_eq!(source.current_context.as_deref(), Some("dev"));
        assert_eq!(source.contexts, vec!["dev".to_string(), "prod".to_string()]);
    }

    #[test]
    fn missing_file_is_skipped_not_fatal() {
        assert!(KubeconfigManager::read_source(FsPath::new("/nonexistent/kubeconfig")).is_none());
    }

    #[test]
    fn default_namespace_reads_the_nested_context_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            "current-context: dev\ncontexts:\n- name: dev\n  context:\n    namespace: staging\n- name: prod\n"
        )
        .unwrap();
        let source = KubeconfigManager::read_source(&path).unwrap();
        assert_eq!(source.namespaces.get("dev").map(String::as_str), Some("staging"));
        assert_eq!(source.namespaces.get("prod"), None);

        let manager = KubeconfigManager { sources: vec![source] };
        assert_eq!(manager.default_namespace("dev"), Some("staging".to_string()));
        assert_eq!(manager.default_namespace("prod"), None);
    }
}
