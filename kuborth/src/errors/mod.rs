//! Typed error taxonomy plus human-readable rendering.
//!
//! Rendering goes through `handlebars` over a table of templates embedded
//! from `errors_output.toml`, mirroring the way presentation text is kept
//! separate from the error values themselves: operators can reword a
//! message without a rebuild.

use handlebars::Handlebars;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use toml::Value;

/// Errors surfaced by the cluster client boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClusterError {
    #[error("cancelled")]
    Cancelled,
    #[error("timed out")]
    Timeout,
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("conflict")]
    Conflict,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unsupported")]
    Unsupported,
}

/// Errors surfaced by folder operations. Wraps `ClusterError` and adds the
/// two folder-specific failure kinds from the taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FolderError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error("enter failed: {0}")]
    EnterFailed(String),
    #[error("no view content")]
    NoViewContent,
}

impl FolderError {
    /// Quiet errors never produce a toast (§7): the loop simply yields back
    /// to idle.
    pub fn is_quiet(&self) -> bool {
        matches!(
            self,
            FolderError::Cluster(ClusterError::Cancelled) | FolderError::Cluster(ClusterError::Timeout)
        )
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, FolderError::NoViewContent)
    }
}

fn parse_templates_from_str(raw: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    match raw.parse::<Value>() {
        Ok(val) => {
            if let Some(errors) = val.get("errors") {
                if let Some(table) = errors.as_table() {
                    for (k, v) in table.iter() {
                        let s = v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string());
                        map.insert(k.clone(), s);
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = ?e, "failed to parse errors_output.toml");
        }
    }
    map
}

static TEMPLATES: OnceLock<HashMap<String, String>> = OnceLock::new();

fn templates() -> &'static HashMap<String, String> {
    TEMPLATES.get_or_init(|| {
        const RAW: &str = include_str!("errors_output.toml");
        parse_templates_from_str(RAW)
    })
}

fn template_or_default(key: &str, default: &str) -> String {
    templates().get(key).cloned().unwrap_or_else(|| default.to_string())
}

static HB: OnceLock<Handlebars<'static>> = OnceLock::new();

fn handlebars() -> &'static Handlebars<'static> {
    HB.get_or_init(Handlebars::new)
}

fn format_template(tmpl: &str, pairs: &[(&str, &str)]) -> String {
    let mut map = serde_json::Map::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), JsonValue::String(v.to_string()));
    }
    let ctx = JsonValue::Object(map);
    handlebars().render_template(tmpl, &ctx).unwrap_or_else(|err| {
        tracing::warn!(error = ?err, "template render failed, falling back");
        tmpl.to_string()
    })
}

/// Render a `ClusterError` as a toast string for a named subject (e.g. the
/// object identity the operation acted on). Returns `None` for the quiet
/// kinds (`Cancelled`/`Timeout`), which the loop must not toast.
pub fn render_cluster_error(err: &ClusterError, what: &str) -> Option<String> {
    match err {
        ClusterError::Cancelled | ClusterError::Timeout => None,
        ClusterError::NotFound => Some(format_template(&template_or_default("not_found", "Not found: {{what}}"), &[("what", what)])),
        ClusterError::Conflict => Some(format_template(&template_or_default("conflict", "Conflict: {{what}}"), &[("what", what)])),
        ClusterError::Forbidden => Some(format_template(&template_or_default("forbidden", "Forbidden: {{what}}"), &[("what", what)])),
        ClusterError::Transport(details) => {
            Some(format_template(&template_or_default("transport", "Connection problem: {{details}}"), &[("details", details)]))
        }
        ClusterError::Unsupported => {
            Some(format_template(&template_or_default("unsupported", "Not supported by this cluster: {{what}}"), &[("what", what)]))
        }
    }
}

/// Render a `FolderError`. Returns `None` for quiet/silent kinds.
pub fn render_folder_error(err: &FolderError, what: &str) -> Option<String> {
    match err {
        FolderError::Cluster(c) => render_cluster_error(c, what),
        FolderError::EnterFailed(details) => {
            Some(format_template(&template_or_default("enter_failed", "Could not open {{what}}: {{details}}"), &[("what", what), ("details", details)]))
        }
        FolderError::NoViewContent => None,
    }
}

pub fn render_deleted(name: &str) -> String {
    format_template(&template_or_default("deleted", "Deleted {{name}}"), &[("name", name)])
}

pub fn render_delete_failed(name: &str, err: &ClusterError) -> String {
    let details = err.to_string();
    format_template(
        &template_or_default("delete_failed", "Failed to delete {{name}}: {{details}}"),
        &[("name", name), ("details", &details)],
    )
}

pub fn render_namespace_created(name: &str) -> String {
    format_template(&template_or_default("namespace_created", "Namespace {{name}} created"), &[("name", name)])
}

pub fn render_namespace_create_failed(name: &str, err: &ClusterError) -> String {
    let details = err.to_string();
    format_template(
        &template_or_default("namespace_create_failed", "Failed to create namespace {{name}}: {{details}}"),
        &[("name", name), ("details", &details)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_errors_render_none() {
        assert_eq!(render_cluster_error(&ClusterError::Cancelled, "x"), None);
        assert_eq!(render_cluster_error(&ClusterError::Timeout, "x"), None);
    }

    #[test]
    fn not_found_renders_subject() {
        let s = render_cluster_error(&ClusterError::NotFound, "pods/foo").unwrap();
        assert!(s.contains("pods/foo"));
    }

    #[test]
    fn no_view_content_is_silent() {
        let e = FolderError::NoViewContent;
        assert!(e.is_silent());
        assert_eq!(render_folder_error(&e, "x"), None);
    }

    #[test]
    fn cancelled_is_quiet() {
        let e: FolderError = ClusterError::Cancelled.into();
        assert!(e.is_quiet());
    }

    #[test]
    fn delete_messages_mention_name() {
        assert!(render_deleted("pods.v1/foo").contains("foo"));
        assert!(render_delete_failed("pods.v1/foo", &ClusterError::Forbidden).contains("foo"));
    }
}
