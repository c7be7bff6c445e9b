//! Resource-group ordering policy, shared by every folder that lists
//! resource *kinds* rather than objects (§6 "Ordering policies").

use crate::app::types::ResourceOrder;
use crate::cluster::ResourceInfo;

use super::ViewOptions;

/// Filter `infos` down to the requested scope and sort per `opts.resource_order`.
pub fn order_resource_infos(infos: &[ResourceInfo], opts: &ViewOptions, namespaced: bool) -> Vec<ResourceInfo> {
    let mut out: Vec<ResourceInfo> = infos.iter().filter(|i| i.namespaced == namespaced).cloned().collect();
    match opts.resource_order {
        ResourceOrder::Alpha => out.sort_by(|a, b| a.gvr.resource.cmp(&b.gvr.resource)),
        ResourceOrder::Group => {
            out.sort_by(|a, b| (&a.gvk.group, &a.gvk.version, &a.gvr.resource).cmp(&(&b.gvk.group, &b.gvk.version, &b.gvr.resource)))
        }
        ResourceOrder::Favorites => {
            let rank = |resource: &str| -> usize {
                opts.favorites.iter().position(|f| f == resource).unwrap_or(usize::MAX)
            };
            out.sort_by(|a, b| {
                rank(&a.gvr.resource)
                    .cmp(&rank(&b.gvr.resource))
                    .then_with(|| a.gvr.resource.cmp(&b.gvr.resource))
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::Gvk;
    use crate::app::types::Gvr;

    fn info(group: &str, resource: &str, namespaced: bool) -> ResourceInfo {
        ResourceInfo {
            gvr: Gvr::new(group, "v1", resource),
            gvk: Gvk { group: group.into(), version: "v1".into(), kind: resource.into() },
            namespaced,
            verbs: vec![],
        }
    }

    #[test]
    fn alpha_sorts_by_resource_name() {
        let infos = vec![info("", "secrets", true), info("", "configmaps", true)];
        let opts = ViewOptions { resource_order: ResourceOrder::Alpha, ..Default::default() };
        let ordered = order_resource_infos(&infos, &opts, true);
        assert_eq!(ordered[0].gvr.resource, "configmaps");
    }

    #[test]
    fn favorites_rank_before_alphabetical_remainder() {
        let infos = vec![info("", "secrets", true), info("", "pods", true), info("", "configmaps", true)];
        let opts = ViewOptions {
            resource_order: ResourceOrder::Favorites,
            favorites: vec!["pods".into()],
            ..Default::default()
        };
        let ordered = order_resource_infos(&infos, &opts, true);
        assert_eq!(ordered[0].gvr.resource, "pods");
        assert_eq!(ordered[1].gvr.resource, "configmaps");
        assert_eq!(ordered[2].gvr.resource, "secrets");
    }

    #[test]
    fn scope_filter_excludes_other_scope() {
        let infos = vec![info("", "nodes", false), info("", "pods", true)];
        let opts = ViewOptions::default();
        let ordered = order_resource_infos(&infos, &opts, false);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].gvr.resource, "nodes");
    }
}
