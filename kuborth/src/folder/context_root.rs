//! Lists the kubeconfig contexts available to switch into (§3 `/contexts`).
//! Entering a context row rebuilds the cluster client for that context and
//! returns a fresh [`root::RootFolder`] scoped to it.

use std::sync::Arc;

use super::root::RootFolder;
use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::Path;
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub struct ContextRootFolder {
    deps: Deps,
    path: Path,
}

impl ContextRootFolder {
    pub fn new(deps: Deps, path: Path) -> Self {
        ContextRootFolder { deps, path }
    }
}

impl Folder for ContextRootFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "context-root"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Context".into()]
    }

    fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.deps.contexts.len())
    }

    fn lines(&self, _ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let end = (top + count).min(self.deps.contexts.len());
        let top = top.min(self.deps.contexts.len());
        Ok(self.deps.contexts[top..end]
            .iter()
            .map(|name| {
                let marker = if name == &self.deps.current_context { format!("{} (current)", name) } else { name.clone() };
                Row::enterable(name.clone(), vec![marker])
            })
            .collect())
    }

    fn enter(&self, _ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        let client = (self.deps.switch_context)(&row.id);
        let mut deps = self.deps.clone();
        deps.client = client;
        deps.current_context = row.id.clone();
        let child_path = Path::root().push("contexts").push(row.id.clone());
        Ok(Box::new(RootFolder::new(deps, child_path)))
    }

    fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
        Err(FolderError::NoViewContent)
    }
}
