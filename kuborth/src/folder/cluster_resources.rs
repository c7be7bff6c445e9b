//! Lists cluster-scoped resource *kinds* (§3 `/<cluster-resource>`), ordered
//! per the active resource ordering policy. Composed into
//! [`root::RootFolder`] rather than pushed onto the navigator directly.

use std::sync::Arc;

use super::ordering::order_resource_infos;
use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::Path;
use crate::cluster::{ClusterClient, ResourceInfo};
use crate::ctx::FolderCtx;
use crate::errors::FolderError;
use crate::folder::cluster_objects::ClusterObjectsFolder;

pub struct ClusterResourcesFolder {
    deps: Deps,
    path: Path,
}

impl ClusterResourcesFolder {
    pub fn new(deps: Deps, path: Path) -> Self {
        ClusterResourcesFolder { deps, path }
    }

    fn kinds(&self, ctx: &FolderCtx) -> Result<Vec<ResourceInfo>, FolderError> {
        let infos = self.deps.client.resource_infos(ctx)?;
        let mut ordered = order_resource_infos(&infos, &self.deps.view, false);
        if self.deps.view.show_non_empty_only {
            ordered.retain(|info| match self.deps.client.list_by_gvr(ctx, &info.gvr, None) {
                Ok(list) => !list.items.is_empty(),
                Err(_) => true,
            });
        }
        Ok(ordered)
    }

}

impl Folder for ClusterResourcesFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "cluster-resources"
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
        Ok(Box::new(ClusterObjectsFolder::new(self.deps.clone(), info.gvr, child_path)))
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
    use std::sync::Arc;

    #[test]
    fn orders_alphabetically_when_requested() {
        let client = FakeClusterClient::new()
            .with_resource_info(ResourceInfo {
                gvr: Gvr::new("", "v1", "nodes"),
                gvk: Gvk { group: String::new(), version: "v1".into(), kind: "Node".into() },
                namespaced: false,
                verbs: vec![],
            })
            .with_resource_info(ResourceInfo {
                gvr: Gvr::new("", "v1", "namespaces"),
                gvk: Gvk { group: String::new(), version: "v1".into(), kind: "Namespace".into() },
                namespaced: false,
                verbs: vec![],
            });
        let deps = Deps {
            client: Arc::new(client),
            view: crate::folder::ViewOptions { resource_order: crate::app::types::ResourceOrder::Alpha, ..Default::default() },
            contexts: vec![],
            current_context: String::new(),
            switch_context: Arc::new(|_| Arc::new(FakeClusterClient::new()) as Arc<dyn crate::cluster::ClusterClient>),
        };
        let folder = ClusterResourcesFolder::new(deps, Path::root());
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        assert_eq!(rows[0].id, "namespaces");
        assert_eq!(rows[1].id, "nodes");
    }
}
