//! An in-memory `ClusterClient` test double. This is the substrate every
//! unit and integration test in this crate runs against; the real cluster
//! is out of scope to emulate faithfully (§1 Non-goals: transport, cluster
//! authentication).

use std::collections::HashMap;
use std::sync::Mutex;

use super::{ClusterClient, KubeObject, ObjectList, ResourceInfo, TableList, TableRow};
use crate::app::types::Gvr;
use crate::ctx::FolderCtx;
use crate::errors::ClusterError;

type CellFn = Box<dyn Fn(&KubeObject) -> Vec<String> + Send + Sync>;

struct TableSpec {
    headers: Vec<String>,
    cells: CellFn,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<Gvr, Vec<KubeObject>>,
    resource_infos: Vec<ResourceInfo>,
    tables: HashMap<Gvr, TableSpec>,
    transport_errors: Vec<Gvr>,
}

/// In-memory cluster client, built up with `.with_*` calls.
pub struct FakeClusterClient {
    inner: Mutex<Inner>,
}

impl Default for FakeClusterClient {
    fn default() -> Self {
        FakeClusterClient { inner: Mutex::new(Inner::default()) }
    }
}

impl FakeClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object under the given GVR. Namespace is read from the
    /// object's own `metadata.namespace`.
    pub fn with_object(self, gvr: Gvr, object: KubeObject) -> Self {
        self.inner.lock().unwrap().objects.entry(gvr).or_default().push(object);
        self
    }

    pub fn with_resource_info(self, info: ResourceInfo) -> Self {
        self.inner.lock().unwrap().resource_infos.push(info);
        self
    }

    /// Register a server-side Table representation for a GVR: column
    /// headers plus a per-object cell-rendering function.
    pub fn with_table(
        self,
        gvr: Gvr,
        headers: Vec<&str>,
        cells: impl Fn(&KubeObject) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.inner.lock().unwrap().tables.insert(
            gvr,
            TableSpec {
                headers: headers.into_iter().map(String::from).collect(),
                cells: Box::new(cells),
            },
        );
        self
    }

    /// Make `list_by_gvr`/`list_table` fail with `Transport` for this GVR,
    /// used to exercise the "freeze on disconnect" behavior (§7).
    pub fn with_transport_error(self, gvr: Gvr) -> Self {
        self.inner.lock().unwrap().transport_errors.push(gvr);
        self
    }

    fn filtered(&self, gvr: &Gvr, ns: Option<&str>) -> Vec<KubeObject> {
        let inner = self.inner.lock().unwrap();
        inner
            .objects
            .get(gvr)
            .map(|items| {
                items
                    .iter()
                    .filter(|o| ns.is_none() || o.namespace() == ns)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ClusterClient for FakeClusterClient {
    fn gvk_to_gvr(&self, ctx: &FolderCtx, kind: &str) -> Result<Gvr, ClusterError> {
        ctx.check()?;
        let inner = self.inner.lock().unwrap();
        inner
            .resource_infos
            .iter()
            .find(|r| r.gvk.kind.eq_ignore_ascii_case(kind))
            .map(|r| r.gvr.clone())
            .ok_or(ClusterError::NotFound)
    }

    fn list_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>) -> Result<ObjectList, ClusterError> {
        ctx.check()?;
        if self.inner.lock().unwrap().transport_errors.contains(gvr) {
            return Err(ClusterError::Transport("connection refused".into()));
        }
        Ok(ObjectList { items: self.filtered(gvr, ns) })
    }

    fn get_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<KubeObject, ClusterError> {
        ctx.check()?;
        self.filtered(gvr, ns)
            .into_iter()
            .find(|o| o.name() == Some(name))
            .ok_or(ClusterError::NotFound)
    }

    fn list_table(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>) -> Result<TableList, ClusterError> {
        ctx.check()?;
        if self.inner.lock().unwrap().transport_errors.contains(gvr) {
            return Err(ClusterError::Transport("connection refused".into()));
        }
        let items = self.filtered(gvr, ns);
        let inner = self.inner.lock().unwrap();
        match inner.tables.get(gvr) {
            Some(spec) => {
                let rows = items.iter().map(|o| TableRow { cells: (spec.cells)(o) }).collect();
                Ok(TableList { headers: spec.headers.clone(), rows, items })
            }
            None => Err(ClusterError::Unsupported),
        }
    }

    fn resource_infos(&self, ctx: &FolderCtx) -> Result<Vec<ResourceInfo>, ClusterError> {
        ctx.check()?;
        Ok(self.inner.lock().unwrap().resource_infos.clone())
    }

    fn delete(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<(), ClusterError> {
        ctx.check()?;
        let mut inner = self.inner.lock().unwrap();
        let items = inner.objects.get_mut(gvr).ok_or(ClusterError::NotFound)?;
        let before = items.len();
        items.retain(|o| !(o.name() == Some(name) && (ns.is_none() || o.namespace() == ns)));
        if items.len() == before {
            return Err(ClusterError::NotFound);
        }
        Ok(())
    }

    fn create(&self, ctx: &FolderCtx, object: KubeObject) -> Result<(), ClusterError> {
        ctx.check()?;
        // A namespace-creation caller has no GVR on hand; infer it from the
        // object's `kind` against the registered resource infos, falling back
        // to a bare `namespaces` GVR for the common case exercised by tests.
        let kind = object.value.pointer("/kind").and_then(serde_json::Value::as_str).unwrap_or("");
        let mut inner = self.inner.lock().unwrap();
        let gvr = inner
            .resource_infos
            .iter()
            .find(|r| r.gvk.kind.eq_ignore_ascii_case(kind))
            .map(|r| r.gvr.clone())
            .unwrap_or_else(|| Gvr::new("", "v1", "namespaces"));
        let name = object.name().map(str::to_string);
        let items = inner.objects.entry(gvr).or_default();
        if let Some(name) = &name {
            if items.iter().any(|o| o.name() == Some(name.as_str())) {
                return Err(ClusterError::Conflict);
            }
        }
        items.push(object);
        Ok(())
    }
}
