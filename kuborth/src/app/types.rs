//! Core domain types shared across the navigator, folder, and panel layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of non-empty path segments. The empty sequence
/// renders as `/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<String>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut v = self.0.clone();
        v.push(segment.into());
        Path(v)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.0.join("/"))
        }
    }
}

/// GroupVersionResource — identifies a resource collection (plural).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Gvr {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl Gvr {
    pub fn new(group: impl Into<String>, version: impl Into<String>, resource: impl Into<String>) -> Self {
        Gvr {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for Gvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}.{}", self.resource, self.version)
        } else {
            write!(f, "{}.{}.{}", self.resource, self.version, self.group)
        }
    }
}

/// GroupVersionKind — identifies a resource's type (singular).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Gvk {
    pub group: String,
    pub version: String,
    pub kind: String,
}

/// Which ordering policy a resource-group listing uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceOrder {
    #[default]
    Favorites,
    Alpha,
    Group,
}

impl ResourceOrder {
    pub fn parse(s: &str) -> Self {
        match s {
            "alpha" => ResourceOrder::Alpha,
            "group" => ResourceOrder::Group,
            _ => ResourceOrder::Favorites,
        }
    }
}

impl fmt::Display for ResourceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceOrder::Alpha => write!(f, "alpha"),
            ResourceOrder::Group => write!(f, "group"),
            ResourceOrder::Favorites => write!(f, "favorites"),
        }
    }
}

/// Column display mode for panel tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnsMode {
    #[default]
    Normal,
    Wide,
}

/// How an oversized table is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    #[default]
    Scroll,
    Fit,
}

/// The row-display mode of a `Panel`. Only `List` is fully implemented;
/// the others are placeholders sharing the same contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanelMode {
    #[default]
    List,
    Describe,
    Manifest,
    File,
}

/// Which panel (left/right) an action applies to.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// The kind of textual input requested from the user, guiding how the
/// typed buffer is interpreted once confirmed.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum InputKind {
    CreateNamespace,
}

/// High level user actions dispatched by modal confirm/input handlers and
/// executed by the command layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    DeleteSelected,
    CreateNamespace(String),
    Edit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::CreateNamespace(name) => write!(f, "CreateNamespace({})", name),
            Action::Edit => write!(f, "Edit"),
        }
    }
}

/// The object identity an F4 edit request names, resolved into a `kubectl
/// edit` invocation by the event loop (the one suspension point it runs
/// directly rather than through a background command).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    pub gvr_display: String,
    pub name: String,
    pub namespace: Option<String>,
}

/// CLI-driven startup overrides, parsed by `clap` in `main`.
#[derive(Clone, Debug, Default)]
pub struct StartOptions {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub theme: Option<String>,
    pub no_mouse: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_root_renders_slash() {
        assert_eq!(Path::root().to_string(), "/");
    }

    #[test]
    fn path_push_renders_segments() {
        let p = Path::root().push("namespaces").push("default");
        assert_eq!(p.to_string(), "/namespaces/default");
    }

    #[test]
    fn gvr_display_without_group() {
        let g = Gvr::new("", "v1", "pods");
        assert_eq!(g.to_string(), "pods.v1");
    }

    #[test]
    fn gvr_display_with_group() {
        let g = Gvr::new("apps", "v1", "deployments");
        assert_eq!(g.to_string(), "deployments.v1.apps");
    }

    #[test]
    fn resource_order_parse_defaults_to_favorites() {
        assert_eq!(ResourceOrder::parse("bogus"), ResourceOrder::Favorites);
        assert_eq!(ResourceOrder::parse("alpha"), ResourceOrder::Alpha);
    }
}
