//! Lists namespaced objects of a single GVR within one namespace (§3
//! `/namespaces/<ns>/<resource>`). ConfigMaps, Secrets, and Pods are
//! additionally enterable into their key/container sub-folders; every other
//! namespaced kind is a leaf.

use std::sync::Arc;

use super::configmap_keys::ConfigMapKeysFolder;
use super::pod_containers::PodContainersFolder;
use super::secret_keys::SecretKeysFolder;
use super::{Deps, Folder, ObjectRef, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::{ClusterClient, TableList};
use crate::ctx::FolderCtx;
use crate::errors::{ClusterError, FolderError};

pub struct NamespacedObjectsFolder {
    deps: Deps,
    gvr: Gvr,
    namespace: String,
    path: Path,
}

impl NamespacedObjectsFolder {
    pub fn new(deps: Deps, gvr: Gvr, namespace: String, path: Path) -> Self {
        NamespacedObjectsFolder { deps, gvr, namespace, path }
    }

    fn sub_folder_kind(&self) -> Option<&'static str> {
        match self.gvr.resource.as_str() {
            "configmaps" => Some("configmaps"),
            "secrets" => Some("secrets"),
            "pods" => Some("pods"),
            _ => None,
        }
    }

    fn table(&self, ctx: &FolderCtx) -> Result<TableList, FolderError> {
        match self.deps.client.list_table(ctx, &self.gvr, Some(&self.namespace)) {
            Ok(table) => Ok(table),
            Err(ClusterError::Unsupported) => {
                let list = self.deps.client.list_by_gvr(ctx, &self.gvr, Some(&self.namespace))?;
                let rows = list
                    .items
                    .iter()
                    .map(|o| crate::cluster::TableRow { cells: vec![o.name().unwrap_or("").to_string()] })
                    .collect();
                Ok(TableList { headers: vec!["Name".into()], rows, items: list.items })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Folder for NamespacedObjectsFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "namespaced-objects"
    }

    fn path(&self) -> Path {
        self.path.clone()
    }

    fn columns(&self) -> Vec<String> {
        vec!["Name".into()]
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.table(ctx)?.rows.len())
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        let table = self.table(ctx)?;
        let end = (top + count).min(table.rows.len());
        let top = top.min(table.rows.len());
        let enterable = self.sub_folder_kind().is_some();
        Ok((top..end)
            .map(|i| {
                let name = table.items[i].name().unwrap_or("").to_string();
                let object = ObjectRef { gvr: self.gvr.clone(), namespace: Some(self.namespace.clone()), name: name.clone() };
                let mut row = Row::object(name, table.rows[i].cells.clone(), object);
                row.enterable = enterable;
                row
            })
            .collect())
    }

    fn enter(&self, _ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        let child_path = self.path.push(row.id.clone());
        match self.sub_folder_kind() {
            Some("configmaps") => Ok(Box::new(ConfigMapKeysFolder::new(
                self.deps.clone(),
                self.gvr.clone(),
                self.namespace.clone(),
                row.id.clone(),
                child_path,
            ))),
            Some("secrets") => Ok(Box::new(SecretKeysFolder::new(
                self.deps.clone(),
                self.gvr.clone(),
                self.namespace.clone(),
                row.id.clone(),
                child_path,
            ))),
            Some("pods") => Ok(Box::new(PodContainersFolder::new(
                self.deps.clone(),
                self.gvr.clone(),
                self.namespace.clone(),
                row.id.clone(),
                child_path,
            ))),
            _ => Err(FolderError::EnterFailed(format!("{} is not enterable", self.gvr))),
        }
    }

    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, Some(&self.namespace), &row.id)?;
        Ok(ViewContent::yaml(row.id.clone(), obj.to_yaml_stripped()))
    }

    fn object_list_meta(&self) -> Option<(Gvr, Option<String>)> {
        Some((self.gvr.clone(), Some(self.namespace.clone())))
    }
}
