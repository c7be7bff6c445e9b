//! The polymorphic virtual-filesystem node: a lazy, possibly live, list of
//! rows with a column schema. Every folder variant lives in its own module;
//! this file holds the shared contract (`Folder`, `Row`), the back-row
//! decorator, and the ordering policy shared by resource-group listings.

mod ordering;

pub mod cluster_objects;
pub mod cluster_resources;
pub mod configmap_keys;
pub mod context_root;
pub mod namespaced_objects;
pub mod namespaced_resources;
pub mod pod_containers;
pub mod root;
pub mod secret_keys;
pub mod with_back;

pub use with_back::WithBack;

use std::sync::Arc;

use crate::app::types::{Gvr, Path, ResourceOrder};
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub use ordering::order_resource_infos;

/// An immutable reference to an object a row stands for. Rows hold only
/// this descriptor, never the object body, so folders resolve content
/// against the external client on demand rather than caching it on the row
/// (§9 "Polymorphic rows").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub gvr: Gvr,
    pub namespace: Option<String>,
    pub name: String,
}

/// A single row within a folder. Capabilities are plain booleans/options
/// rather than a closed tagged enum so a row can combine *enterable* with
/// *object* (a pod row both opens a child folder and identifies a
/// GVR/namespace/name), matching §9's "Polymorphic rows" note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub cells: Vec<String>,
    pub back: bool,
    pub enterable: bool,
    pub object: Option<ObjectRef>,
    pub viewable: bool,
}

impl Row {
    pub fn simple(id: impl Into<String>, cells: Vec<String>) -> Self {
        Row { id: id.into(), cells, back: false, enterable: false, object: None, viewable: false }
    }

    pub fn enterable(id: impl Into<String>, cells: Vec<String>) -> Self {
        Row { enterable: true, ..Row::simple(id, cells) }
    }

    pub fn object(id: impl Into<String>, cells: Vec<String>, object: ObjectRef) -> Self {
        Row { object: Some(object), viewable: true, ..Row::simple(id, cells) }
    }

    pub fn back_row() -> Self {
        Row { back: true, ..Row::simple("__back__", vec!["..".to_string()]) }
    }
}

/// Viewer content produced by a viewable row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewContent {
    pub title: String,
    pub body: String,
    pub language: String,
    pub mime: String,
    pub filename: String,
}

impl ViewContent {
    pub fn yaml(title: impl Into<String>, body: String) -> Self {
        let title = title.into();
        ViewContent {
            filename: format!("{}.yaml", title),
            title,
            body,
            language: "yaml".to_string(),
            mime: "application/yaml".to_string(),
        }
    }

    pub fn plain(title: impl Into<String>, body: String) -> Self {
        let title = title.into();
        ViewContent {
            filename: title.clone(),
            title,
            body,
            language: "text".to_string(),
            mime: "text/plain".to_string(),
        }
    }
}

/// Shared, explicitly-passed collaborators every folder needs. No folder
/// reaches for a singleton; everything it can call comes from here (§9
/// "No ambient singletons").
#[derive(Clone)]
pub struct Deps {
    pub client: Arc<dyn ClusterClient>,
    pub view: ViewOptions,
    pub contexts: Vec<String>,
    pub current_context: String,
    pub switch_context: Arc<dyn Fn(&str) -> Arc<dyn ClusterClient> + Send + Sync>,
}

/// Per-panel view options that influence resource-group ordering, owned by
/// `Panel` and cloned into `Deps` on folder construction.
#[derive(Clone, Debug, Default)]
pub struct ViewOptions {
    pub resource_order: ResourceOrder,
    pub favorites: Vec<String>,
    pub show_non_empty_only: bool,
}

/// The polymorphic navigation node contract. Operations that may block are
/// given a `FolderCtx` and must honor its cancellation/deadline.
pub trait Folder: Send {
    /// Stable identity, used for logging and dirty comparisons.
    fn key(&self) -> &str;

    /// The virtual path this folder renders as, per §3/§6.
    fn path(&self) -> Path;

    /// Column header text for the current schema.
    fn columns(&self) -> Vec<String>;

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError>;

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError>;

    /// Locate a row by id. Returns `(index, None)` when absent rather than
    /// an error so callers can implement the documented "fall back to top"
    /// behavior.
    fn find(&self, ctx: &FolderCtx, id: &str) -> Result<(usize, Option<Row>), FolderError> {
        let rows = self.lines(ctx, 0, self.len(ctx)?)?;
        match rows.iter().position(|r| r.id == id) {
            Some(idx) => Ok((idx, Some(rows[idx].clone()))),
            None => Ok((0, None)),
        }
    }

    /// Row `n` positions above `id`, clamped to the first row. Returns
    /// `(index, None)` when `id` itself isn't found, mirroring `find`.
    fn above(&self, ctx: &FolderCtx, id: &str, n: usize) -> Result<(usize, Option<Row>), FolderError> {
        let (idx, found) = self.find(ctx, id)?;
        if found.is_none() {
            return Ok((idx, None));
        }
        let target = idx.saturating_sub(n);
        let row = self.lines(ctx, target, 1)?.into_iter().next();
        Ok((target, row))
    }

    /// Row `n` positions below `id`, clamped to the last row. Returns
    /// `(index, None)` when `id` itself isn't found, mirroring `find`.
    fn below(&self, ctx: &FolderCtx, id: &str, n: usize) -> Result<(usize, Option<Row>), FolderError> {
        let (idx, found) = self.find(ctx, id)?;
        if found.is_none() {
            return Ok((idx, None));
        }
        let len = self.len(ctx)?;
        let target = (idx + n).min(len.saturating_sub(1));
        let row = self.lines(ctx, target, 1)?.into_iter().next();
        Ok((target, row))
    }

    /// Enter the given row, returning its child folder.
    fn enter(&self, ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError>;

    /// Produce viewer content for the given row.
    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError>;

    /// Best-effort invalidate. Folders that don't cache return no-op.
    fn refresh(&mut self) {}

    /// Has new data since last read. Folders with no live backing always
    /// report false.
    fn is_dirty(&self) -> bool {
        false
    }

    /// For object-list folders, the `(GVR, namespace)` every non-back row
    /// must share.
    fn object_list_meta(&self) -> Option<(Gvr, Option<String>)> {
        None
    }

    /// The cluster client this folder was built with, for callers that need
    /// to issue a mutation (delete, namespace create) against whatever
    /// context the current folder is actually bound to. Folders with no
    /// `Deps` (the context list, key listings with nothing to mutate from
    /// directly) report `None`.
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        None
    }
}
