//! Lists cluster-scoped objects of a single GVR (§3 `/<cluster-resource>`).
//! Rows are objects, viewable, and `namespaces` specifically is also
//! enterable into a [`namespaced_resources::NamespacedResourcesFolder`] —
//! every other cluster-scoped kind is a leaf.

use std::sync::Arc;

use super::namespaced_resources::NamespacedResourcesFolder;
use super::{Deps, Folder, ObjectRef, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::cluster::{ClusterClient, TableList};
use crate::ctx::FolderCtx;
use crate::errors::{ClusterError, FolderError};

pub struct ClusterObjectsFolder {
    deps: Deps,
    gvr: Gvr,
    path: Path,
}

impl ClusterObjectsFolder {
    pub fn new(deps: Deps, gvr: Gvr, path: Path) -> Self {
        ClusterObjectsFolder { deps, gvr, path }
    }

    fn is_namespaces(&self) -> bool {
        self.gvr.resource == "namespaces"
    }

    fn table(&self, ctx: &FolderCtx) -> Result<TableList, FolderError> {
        match self.deps.client.list_table(ctx, &self.gvr, None) {
            Ok(table) => Ok(table),
            Err(ClusterError::Unsupported) => {
                let list = self.deps.client.list_by_gvr(ctx, &self.gvr, None)?;
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

impl Folder for ClusterObjectsFolder {
    fn client(&self) -> Option<Arc<dyn ClusterClient>> {
        Some(self.deps.client.clone())
    }

    fn key(&self) -> &str {
        "cluster-objects"
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
        Ok((top..end)
            .map(|i| {
                let name = table.items[i].name().unwrap_or("").to_string();
                let object = ObjectRef { gvr: self.gvr.clone(), namespace: None, name: name.clone() };
                let mut row = Row::object(name, table.rows[i].cells.clone(), object);
                row.enterable = self.is_namespaces();
                row
            })
            .collect())
    }

    fn enter(&self, _ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        if !self.is_namespaces() {
            return Err(FolderError::EnterFailed(format!("{} is not enterable", self.gvr)));
        }
        let ns_path = self.path.push(row.id.clone());
        Ok(Box::new(NamespacedResourcesFolder::new(self.deps.clone(), row.id.clone(), ns_path)))
    }

    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError> {
        let obj = self.deps.client.get_by_gvr(ctx, &self.gvr, None, &row.id)?;
        Ok(ViewContent::yaml(row.id.clone(), obj.to_yaml_stripped()))
    }

    fn object_list_meta(&self) -> Option<(Gvr, Option<String>)> {
        Some((self.gvr.clone(), None))
    }
}
