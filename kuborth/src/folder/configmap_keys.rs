//! Lists the `data`/`binaryData` keys of a single ConfigMap. Rows are
//! viewable only; a key is not an API object in its own right (§4.1 "View
//! content").

use std::sync::Arc;

use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub struct ConfigMapKeysFolder {
    deps: Deps,
    gvr: Gvr,
    namespace: String,
    name: String,
    path: Path,
}

impl ConfigMapKeysFolder {
    pub fn new(deps: Deps, gvr: Gvr, namespace: String, name: String, path: Path) -> Self {
        ConfigMapKeysFolder { deps, gvr, namespace, name, path }
    }

    fn keys(&self, ctx: &FolderCtx) -> Result<Vec<String>, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, Some(&self.namespace), &self.name)?;
        let mut keys: Vec<String> = obj
            .value
            .pointer("/data")
            .and_then(|v| v.as_object())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        keys.extend(
            obj.value
                .pointer("/binaryData")
                .and_then(|v| v.as_object())
                .map(|m| m.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
        );
        keys.sort();
        Ok(keys)
    }
}

impl Folder for ConfigMapKeysFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "configmap-keys"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Key".into()]
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.keys(ctx)?.len())
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let keys = self.keys(ctx)?;
        Ok(keys[top.min(keys.len())..(top + count).min(keys.len())]
            .iter()
            .map(|k| {
                let mut row = Row::simple(k.clone(), vec![k.clone()]);
                row.viewable = true;
                row
            })
            .collect())
    }

    fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        Err(FolderError::EnterFailed("a key has no children".into()))
    }

    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, Some(&self.namespace), &self.name)?;
        if let Some(s) = obj.value.pointer("/data").and_then(|v| v.get(&row.id)).and_then(|v| v.as_str()) {
            return Ok(ViewContent::plain(row.id.clone(), s.to_string()));
        }
        if let Some(s) = obj.value.pointer("/binaryData").and_then(|v| v.get(&row.id)).and_then(|v| v.as_str()) {
            return Ok(ViewContent::plain(row.id.clone(), s.to_string()));
        }
        Err(FolderError::NoViewContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{FakeClusterClient, KubeObject};
    use crate::ctx::CancelToken;
    use crate::folder::ViewOptions;
    use serde_json::json;
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
    fn lists_and_views_data_keys() {
        let gvr = Gvr::new("", "v1", "configmaps");
        let cm = KubeObject::new(json!({
            "kind": "ConfigMap",
            "metadata": {"name": "cfg", "namespace": "default"},
            "data": {"color": "blue"},
        }));
        let client = FakeClusterClient::new().with_object(gvr.clone(), cm);
        let folder = ConfigMapKeysFolder::new(deps(client), gvr, "default".into(), "cfg".into(), Path::root());
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "color");
        let content = folder.view_content(&ctx, &rows[0]).unwrap();
        assert_eq!(content.body, "blue");
    }
}
