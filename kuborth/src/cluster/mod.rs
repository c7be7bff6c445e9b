//! The cluster client boundary: the one external collaborator every folder
//! ultimately calls through. Two implementations ship: [`fake::FakeClusterClient`]
//! (in-memory, what every test in this crate runs against) and
//! [`kube_client::KubeClusterClient`] (backed by the real `kube` crate).

pub mod fake;
pub mod kube_client;
pub mod pool;

pub use fake::FakeClusterClient;
pub use kube_client::KubeClusterClient;
pub use pool::ClusterPool;

use crate::app::types::{Gvk, Gvr};
use crate::ctx::FolderCtx;
use crate::errors::ClusterError;
use serde_json::Value as Json;

/// A single Kubernetes object, represented as its decoded JSON/YAML tree.
/// Keeping this as a plain `Json` value (rather than a typed struct) mirrors
/// the dynamic-object style the `kube` crate itself uses for resources this
/// crate has no compile-time schema for.
#[derive(Clone, Debug, PartialEq)]
pub struct KubeObject {
    pub value: Json,
}

impl KubeObject {
    pub fn new(value: Json) -> Self {
        KubeObject { value }
    }

    pub fn name(&self) -> Option<&str> {
        self.value.pointer("/metadata/name").and_then(Json::as_str)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.value.pointer("/metadata/namespace").and_then(Json::as_str)
    }

    /// Canonical viewer representation: YAML with `metadata.managedFields`
    /// stripped.
    pub fn to_yaml_stripped(&self) -> String {
        let mut v = self.value.clone();
        if let Some(meta) = v.get_mut("metadata").and_then(|m| m.as_object_mut()) {
            meta.remove("managedFields");
        }
        serde_yaml::to_string(&v).unwrap_or_else(|_| String::new())
    }
}

/// One row of a server-side Table listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

/// A server-side Table representation: headers, per-row cells, and the
/// backing objects in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableList {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub items: Vec<KubeObject>,
}

/// An unstructured object list (used when the server has no Table
/// representation, or the client never requests one).
#[derive(Clone, Debug, Default)]
pub struct ObjectList {
    pub items: Vec<KubeObject>,
}

/// Metadata about a resource kind, as reported by API discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceInfo {
    pub gvr: Gvr,
    pub gvk: Gvk,
    pub namespaced: bool,
    pub verbs: Vec<String>,
}

/// The external collaborator every folder ultimately calls through. Treated
/// as a black box: transport, cache replication, and cluster authentication
/// are out of scope for this crate.
pub trait ClusterClient: Send + Sync {
    fn gvk_to_gvr(&self, ctx: &FolderCtx, kind: &str) -> Result<Gvr, ClusterError>;
    fn list_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>) -> Result<ObjectList, ClusterError>;
    fn get_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<KubeObject, ClusterError>;
    fn list_table(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>) -> Result<TableList, ClusterError>;
    fn resource_infos(&self, ctx: &FolderCtx) -> Result<Vec<ResourceInfo>, ClusterError>;
    fn delete(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<(), ClusterError>;
    fn create(&self, ctx: &FolderCtx, object: KubeObject) -> Result<(), ClusterError>;
}
