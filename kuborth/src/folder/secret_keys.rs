//! Lists the `data` keys of a single Secret. Values are base64-encoded on
//! the wire; the viewer decodes them when the decoded bytes are valid UTF-8,
//! falling back to the raw base64 text otherwise (§4.1 "View content").

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::{Deps, Folder, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::ClusterClient;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub struct SecretKeysFolder {
    deps: Deps,
    gvr: Gvr,
    namespace: String,
    name: String,
    path: Path,
}

impl SecretKeysFolder {
    pub fn new(deps: Deps, gvr: Gvr, namespace: String, name: String, path: Path) -> Self {
        SecretKeysFolder { deps, gvr, namespace, name, path }
    }

    fn keys(&self, ctx: &FolderCtx) -> Result<Vec<String>, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, Some(&self.namespace), &self.name)?;
        let mut keys: Vec<String> = obj
            .value
            .pointer("/data")
            .and_then(|v| v.as_object())
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}

impl Folder for SecretKeysFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "secret-keys"
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
        let raw = obj
            .value
            .pointer("/data")
            .and_then(|v| v.get(&row.id))
            .and_then(|v| v.as_str())
            .ok_or(FolderError::NoViewContent)?;
        let body = match BASE64.decode(raw) {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| raw.to_string()),
            Err(_) => raw.to_string(),
        };
        Ok(ViewContent::plain(row.id.clone(), body))
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
    fn decodes_utf8_secret_values() {
        let gvr = Gvr::new("", "v1", "secrets");
        let encoded = BASE64.encode("hunter2");
        let secret = KubeObject::new(json!({
            "kind": "Secret",
            "metadata": {"name": "db", "namespace": "default"},
            "data": {"password": encoded},
        }));
        let client = FakeClusterClient::new().with_object(gvr.clone(), secret);
        let folder = SecretKeysFolder::new(deps(client), gvr, "default".into(), "db".into(), Path::root());
        let ctx = FolderCtx::derive(&CancelToken::new());
        let rows = folder.lines(&ctx, 0, folder.len(&ctx).unwrap()).unwrap();
        let content = folder.view_content(&ctx, &rows[0]).unwrap();
        assert_eq!(content.body, "hunter2");
    }
}
