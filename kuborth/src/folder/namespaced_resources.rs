//! Lists namespaced resource *kinds* for one namespace (§3
//! `/namespaces/<ns>`), ordered per the active resource ordering policy.
//! Entering a kind opens a [`namespaced_objects::NamespacedObjectsFolder`].

use std::sync::Arc;

use super::namespaced_objects::NamespacedObjectsFolder;
use super::ordering::order_resource_infos;
use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::Path;
use crate::cluster::{ClusterClient, ResourceInfo};
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub struct NamespacedResourcesFolder {
    deps: Deps,
    namespace: String,
    path: Path,
}

impl NamespacedResourcesFolder {
    pub fn new(deps: Deps, namespace: String, path: Path) -> Self {
        NamespacedResourcesFolder { deps, namespace, path }
    }

    fn kinds(&self, ctx: &FolderCtx) -> Result<Vec<ResourceInfo>, FolderError> {
        let infos = self.deps.client.resource_infos(ctx)?;
        let mut ordered = order_resource_infos(&infos, &self.deps.view, true);
        if self.deps.view.show_non_empty_only {
            ordered.retain(|info| {
                match self.deps.client.list_by_gvr(ctx, &info.gvr, Some(&self.namespace)) {
                    Ok(list) => !list.items.is_empty(),
                    Err(_) => true,
                }
            });
        }
        Ok(ordered)
    }
}

impl Folder for NamespacedResourcesFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "namespaced-resources"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Resource".into()]
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.kinds(ctx)?.len())
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let kinds = self.kinds(ctx)?;
        let end = (top + count).min(kinds.len());
        let top = top.min(kinds.len());
        Ok(kinds[top..end].iter().map(|k| Row::enterable(k.gvr.resource.clone(), vec![k.gvr.resource.clone()])).collect())
    }

    fn enter(&self, ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        let info = self
            .kinds(ctx)?
            .into_iter()
            .find(|k| k.gvr.resource == row.id)
            .ok_or_else(|| FolderError::EnterFailed(format!("unknown resource {}", row.id)))?;
        let child_path = self.path.push(row.id.clone());
        Ok(Box::new(NamespacedObjectsFolder::new(self.deps.clone(), info.gvr, self.namespace.clone(), child_path)))
    }

    fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
        Err(FolderError::NoViewContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::{Gvk, Gvr};
    use crate::cluster::FakeClusterClient;
    use crate::ctx::CancelToken;
    use crate::folder::ViewOptions;
    use std::sync::Arc;

    fn deps(client: FakeClusterClient) -> Deps {
        Deps {
            client: Arc::new(client),
            view: ViewOptions::default(),
            contexts: vec![],
            current_context: String::new(),
            switch_context: Arc::new(|_| Arc::new(FakeClusterClient::new()) as Arc<dyn crate::cluster::ClusterClient>),
        }
    }

    #[test]
    fn lists_namespaced_kinds_only() {
        let client = FakeClusterClient::new()
            .with_resource_info(ResourceInfo {
                gvr: Gvr::new("", "v1", "pods"),
                gvk: Gvk { group: String::new(), version: "v1".into(), kind: "Pod".into() },
                namespaced: true,
                verbs: vec![],
            })
            .with_resource_info(ResourceInfo {
                gvr: Gvr::new("", "v1", "nodes"),
                gvk: Gvk { group: String::new(), version: "v1".into(), kind: "Node".into() },
                namespaced: false,
                verbs: vec![],
            });
        let folder = NamespacedResourcesFolder::new(deps(client), "default".into(), Path::root().push("namespaces").push("default"));
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "pods");
    }
}
