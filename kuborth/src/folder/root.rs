//! The top-level folder (§3 `/`): two synthetic entries, `contexts` and
//! `namespaces`, followed by every cluster-scoped resource kind. The
//! resource-kind portion is delegated to [`cluster_resources::ClusterResourcesFolder`]
//! rather than duplicated.

use std::sync::Arc;

use super::cluster_objects::ClusterObjectsFolder;
use super::cluster_resources::ClusterResourcesFolder;
use super::context_root::ContextRootFolder;
use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

const SYNTHETIC_ROWS: usize = 2;

pub struct RootFolder {
    deps: Deps,
    path: Path,
    resources: ClusterResourcesFolder,
}

impl RootFolder {
    pub fn new(deps: Deps, path: Path) -> Self {
        let resources = ClusterResourcesFolder::new(deps.clone(), path.clone());
        RootFolder { deps, path, resources }
    }

    fn namespaces_gvr(&self, ctx: &FolderCtx) -> Gvr {
        self.deps.client.gvk_to_gvr(ctx, "Namespace").unwrap_or_else(|_| Gvr::new("", "v1", "namespaces"))
    }
}

impl Folder for RootFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "root"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Resource".into()]
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(SYNTHETIC_ROWS + self.resources.len(ctx)?)
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let synthetic = [Row::enterable("contexts", vec!["contexts".into()]), Row::enterable("namespaces", vec!["namespaces".into()])];
        let mut out = Vec::new();
        for (i, row) in synthetic.iter().enumerate() {
            if i >= top && out.len() < count {
                out.push(row.clone());
            }
        }
        if out.len() < count {
            let remaining = count - out.len();
            let inner_top = top.saturating_sub(SYNTHETIC_ROWS);
            out.extend(self.resources.lines(ctx, inner_top, remaining)?);
        }
        Ok(out)
    }

    fn enter(&self, ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        match row.id.as_str() {
            "contexts" => Ok(Box::new(ContextRootFolder::new(self.deps.clone(), self.path.push("contexts")))),
            "namespaces" => {
                let gvr = self.namespaces_gvr(ctx);
                Ok(Box::new(ClusterObjectsFolder::new(self.deps.clone(), gvr, self.path.push("namespaces"))))
            }
            _ => self.resources.enter(ctx, row),
        }
    }

    fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
        Err(FolderError::NoViewContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::{Gvk, ResourceOrder};
    use crate::cluster::{FakeClusterClient, ResourceInfo};
    use crate::ctx::CancelToken;
    use crate::folder::ViewOptions;
    use std::sync::Arc;

    fn root() -> RootFolder {
        let client = FakeClusterClient::new().with_resource_info(ResourceInfo {
            gvr: Gvr::new("", "v1", "nodes"),
            gvk: Gvk { group: String::new(), version: "v1".into(), kind: "Node".into() },
            namespaced: false,
            verbs: vec![],
        });
        let deps = Deps {
            client: Arc::new(client),
            view: ViewOptions { resource_order: ResourceOrder::Alpha, ..Default::default() },
            contexts: vec!["dev".into()],
            current_context: "dev".into(),
            switch_context: Arc::new(|_| Arc::new(FakeClusterClient::new()) as Arc<dyn crate::cluster::ClusterClient>),
        };
        RootFolder::new(deps, Path::root())
    }

    #[test]
    fn root_starts_with_contexts_and_namespaces() {
        let folder = root();
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        assert_eq!(rows[0].id, "contexts");
        assert_eq!(rows[1].id, "namespaces");
        assert_eq!(rows[2].id, "nodes");
    }

    #[test]
    fn entering_namespaces_yields_cluster_objects_folder() {
        let folder = root();
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        let child = folder.enter(&ctx, &rows[1]).unwrap();
        assert_eq!(child.path().to_string(), "/namespaces");
    }
}
