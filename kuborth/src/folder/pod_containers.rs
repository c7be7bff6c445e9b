//! Lists the containers of a single Pod, `spec.containers` then
//! `spec.initContainers` (§4.1 "View content"). A container is not an API
//! object in its own right; rows are viewable only.

use std::sync::Arc;

use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;
use serde_json::Value;

pub struct PodContainersFolder {
    deps: Deps,
    gvr: Gvr,
    namespace: String,
    name: String,
    path: Path,
}

impl PodContainersFolder {
    pub fn new(deps: Deps, gvr: Gvr, namespace: String, name: String, path: Path) -> Self {
        PodContainersFolder { deps, gvr, namespace, name, path }
    }

    fn containers(&self, ctx: &FolderCtx) -> Result<Vec<Value>, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, Some(&self.namespace), &self.name)?;
        let mut out: Vec<Value> = obj
            .value
            .pointer("/spec/containers")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        out.extend(
            obj.value
                .pointer("/spec/initContainers")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default(),
        );
        Ok(out)
    }

    fn names(&self, ctx: &FolderCtx) -> Result<Vec<String>, FolderError> {
        Ok(self
            .containers(ctx)?
            .iter()
            .filter_map(|c| c.get("name").and_then(|n| n.as_str()).map(str::to_string))
            .collect())
    }
}

impl Folder for PodContainersFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "pod-containers"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Container".into(), "Image".into()]
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.containers(ctx)?.len())
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let containers = self.containers(ctx)?;
        Ok(containers[top.min(containers.len())..(top + count).min(containers.len())]
            .iter()
            .map(|c| {
                let name = c.get("name").and_then(|n| n.as_str()).unwrap_or("").to_string();
                let image = c.get("image").and_then(|n| n.as_str()).unwrap_or("").to_string();
                let mut row = Row::simple(name.clone(), vec![name, image]);
                row.viewable = true;
                row
            })
            .collect())
    }

    fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        Err(FolderError::EnterFailed("a container has no children".into()))
    }

    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError> {
        let names = self.names(ctx)?;
        let containers = self.containers(ctx)?;
        let idx = names.iter().position(|n| n == &row.id).ok_or(FolderError::NoViewContent)?;
        let body = serde_yaml::to_string(&containers[idx]).unwrap_or_default();
        Ok(ViewContent::yaml(row.id.clone(), body))
    }
}
