//! The real `ClusterClient`, backed by the `kube` crate's dynamic-object
//! API. Grounded on the `from_kubeconfig`/discovery pattern used by other
//! Kubernetes TUIs in this space: build a `kube::Client` from a named
//! context, then resolve GVRs via `kube::discovery::Discovery` instead of
//! hand-rolling a REST mapper.
//!
//! The main loop is single-threaded and cooperative (§5); this client owns
//! a dedicated multi-thread Tokio runtime so its async calls can be driven
//! synchronously from a command's background thread without requiring an
//! async executor on the main loop.

use std::sync::Arc;

use kube::api::{Api, DynamicObject, ObjectMeta};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::discovery::{verbs, Discovery};
use kube::{Client, Config};

use super::{ClusterClient, KubeObject, ObjectList, ResourceInfo, TableList};
use crate::app::types::{Gvk, Gvr};
use crate::ctx::FolderCtx;
use crate::errors::ClusterError;

/// A `ClusterClient` talking to a real API server for one (kubeconfig,
/// context) pair.
pub struct KubeClusterClient {
    client: Client,
    rt: Arc<tokio::runtime::Runtime>,
}

impl KubeClusterClient {
    /// Build a client from a kubeconfig path and context name, resolving
    /// discovery eagerly so `gvk_to_gvr` never needs a network round trip
    /// on the caller's first use.
    pub fn from_kubeconfig(path: Option<&str>, context: Option<&str>) -> Result<Self, ClusterError> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| ClusterError::Transport(e.to_string()))?;

        let client = rt.block_on(async {
            let kubeconfig = match path {
                Some(p) => Kubeconfig::read_from(p).map_err(|e| ClusterError::Transport(e.to_string()))?,
                None => Kubeconfig::read().map_err(|e| ClusterError::Transport(e.to_string()))?,
            };
            let options = KubeConfigOptions {
                context: context.map(str::to_string),
                ..Default::default()
            };
            let config = Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| ClusterError::Transport(e.to_string()))?;
            Client::try_from(config).map_err(|e| ClusterError::Transport(e.to_string()))
        })?;

        Ok(KubeClusterClient { client, rt: Arc::new(rt) })
    }

    async fn discover(&self) -> Result<Discovery, ClusterError> {
        Discovery::new(self.client.clone())
            .run()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))
    }

    async fn resolve_gvr(&self, kind: &str) -> Result<Gvr, ClusterError> {
        let discovery = self.discover().await?;
        for group in discovery.groups() {
            for (ar, caps) in group.recommended_resources() {
                if ar.kind.eq_ignore_ascii_case(kind) && caps.supports_operation(verbs::LIST) {
                    return Ok(Gvr::new(ar.group, ar.version, ar.plural));
                }
            }
        }
        Err(ClusterError::NotFound)
    }

    fn api_for(&self, gvr: &Gvr, ns: Option<&str>) -> Api<DynamicObject> {
        let ar = kube::discovery::ApiResource {
            group: gvr.group.clone(),
            version: gvr.version.clone(),
            api_version: if gvr.group.is_empty() {
                gvr.version.clone()
            } else {
                format!("{}/{}", gvr.group, gvr.version)
            },
            kind: gvr.resource.clone(),
            plural: gvr.resource.clone(),
        };
        match ns {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        }
    }
}

fn map_kube_error(err: kube::Error) -> ClusterError {
    match &err {
        kube::Error::Api(resp) if resp.code == 404 => ClusterError::NotFound,
        kube::Error::Api(resp) if resp.code == 403 => ClusterError::Forbidden,
        kube::Error::Api(resp) if resp.code == 409 => ClusterError::Conflict,
        _ => ClusterError::Transport(err.to_string()),
    }
}

fn to_kube_object(obj: DynamicObject) -> KubeObject {
    let value = serde_json::to_value(obj).unwrap_or(serde_json::Value::Null);
    KubeObject::new(value)
}

impl ClusterClient for KubeClusterClient {
    fn gvk_to_gvr(&self, ctx: &FolderCtx, kind: &str) -> Result<Gvr, ClusterError> {
        ctx.check()?;
        self.rt.block_on(self.resolve_gvr(kind))
    }

    fn list_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>) -> Result<ObjectList, ClusterError> {
        ctx.check()?;
        let api = self.api_for(gvr, ns);
        let list = self.rt.block_on(api.list(&Default::default())).map_err(map_kube_error)?;
        Ok(ObjectList { items: list.items.into_iter().map(to_kube_object).collect() })
    }

    fn get_by_gvr(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<KubeObject, ClusterError> {
        ctx.check()?;
        let api = self.api_for(gvr, ns);
        let obj = self.rt.block_on(api.get(name)).map_err(map_kube_error)?;
        Ok(to_kube_object(obj))
    }

    fn list_table(&self, _ctx: &FolderCtx, _gvr: &Gvr, _ns: Option<&str>) -> Result<TableList, ClusterError> {
        // Server-side Table content negotiation is out of scope (§1
        // Non-goals: transport/wire format); folders fall back to a
        // {Name} column, which is exercised against `FakeClusterClient`.
        Err(ClusterError::Unsupported)
    }

    fn resource_infos(&self, ctx: &FolderCtx) -> Result<Vec<ResourceInfo>, ClusterError> {
        ctx.check()?;
        let discovery = self.rt.block_on(self.discover())?;
        let mut out = Vec::new();
        for group in discovery.groups() {
            for (ar, caps) in group.recommended_resources() {
                out.push(ResourceInfo {
                    gvr: Gvr::new(ar.group.clone(), ar.version.clone(), ar.plural.clone()),
                    gvk: Gvk { group: ar.group, version: ar.version, kind: ar.kind },
                    namespaced: caps.scope == kube::discovery::Scope::Namespaced,
                    verbs: caps.operations.iter().map(|v| v.to_string()).collect(),
                });
            }
        }
        Ok(out)
    }

    fn delete(&self, ctx: &FolderCtx, gvr: &Gvr, ns: Option<&str>, name: &str) -> Result<(), ClusterError> {
        ctx.check()?;
        let api = self.api_for(gvr, ns);
        self.rt
            .block_on(api.delete(name, &Default::default()))
            .map(|_| ())
            .map_err(map_kube_error)
    }

    fn create(&self, ctx: &FolderCtx, object: KubeObject) -> Result<(), ClusterError> {
        ctx.check()?;
        let dyn_obj: DynamicObject =
            serde_json::from_value(object.value).map_err(|e| ClusterError::Transport(e.to_string()))?;
        let api_version = dyn_obj.types.as_ref().map(|t| t.api_version.clone()).unwrap_or_default();
        let kind = dyn_obj.types.as_ref().map(|t| t.kind.clone()).unwrap_or_default();
        let (group, version) = match api_version.split_once('/') {
            Some((g, v)) => (g.to_string(), v.to_string()),
            None => (String::new(), api_version.clone()),
        };
        let ar = kube::discovery::ApiResource {
            group,
            version,
            api_version,
            kind: kind.clone(),
            plural: format!("{}s", kind.to_lowercase()),
        };
        let ns = dyn_obj.metadata.namespace.clone();
        let api: Api<DynamicObject> = match &ns {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        };
        self.rt
            .block_on(api.create(&Default::default(), &dyn_obj))
            .map(|_| ())
            .map_err(map_kube_error)
    }
}

/// Build a bare `Namespace` object suitable for `ClusterClient::create`.
pub fn namespace_object(name: &str) -> KubeObject {
    let obj = DynamicObject {
        types: Some(kube::api::TypeMeta { api_version: "v1".into(), kind: "Namespace".into() }),
        metadata: ObjectMeta { name: Some(name.to_string()), ..Default::default() },
        data: serde_json::Value::Object(Default::default()),
    };
    KubeObject::new(serde_json::to_value(obj).unwrap_or(serde_json::Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_object_has_expected_name() {
        let obj = namespace_object("demo");
        assert_eq!(obj.name(), Some("demo"));
    }
}
