//! The application struct: the single owner of UI state the event loop
//! mutates, per §5 ("The event loop is the sole owner of UI state").

pub mod settings;
pub mod types;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::app::settings::Settings;
use crate::cluster::{ClusterClient, ClusterPool, FakeClusterClient, KubeClusterClient};
use crate::ctx::{CancelToken, FolderCtx};
use crate::folder::root::RootFolder;
use crate::folder::{Deps, ViewOptions};
use crate::kubeconfig::KubeconfigManager;
use crate::modal::{EscSequencer, ModalStack};
use crate::panel::Panel;
use crate::shell::{ProcessShellAdapter, ShellAdapter, ShellPresentation};
use crate::viewer::{PlainHighlighter, Viewer};
use crate::app::types::{EditRequest, Path, Side, StartOptions};

const TOAST_SUPPRESS_SAME: Duration = Duration::from_secs(30);
const TOAST_THROTTLE_DISTINCT: Duration = Duration::from_secs(2);

/// Monotonically increasing token identifying one in-flight busy command,
/// so a stale `BusyDone` from a superseded request is ignored (§5
/// "Cancellation").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusyToken(pub u64);

#[derive(Default)]
struct BusyState {
    next_token: u64,
    active: Option<BusyToken>,
    visible: bool,
    frame: u8,
}

impl BusyState {
    fn start(&mut self) -> BusyToken {
        self.next_token += 1;
        let token = BusyToken(self.next_token);
        self.active = Some(token);
        self.visible = false;
        token
    }

    fn show(&mut self, token: BusyToken) {
        if self.active == Some(token) {
            self.visible = true;
        }
    }

    fn finish(&mut self, token: BusyToken) -> bool {
        if self.active == Some(token) {
            self.active = None;
            self.visible = false;
            true
        } else {
            false
        }
    }
}

struct ToastState {
    text: Option<String>,
    shown_at: Option<Instant>,
    last_text: Option<String>,
    last_text_at: Option<Instant>,
}

impl Default for ToastState {
    fn default() -> Self {
        ToastState { text: None, shown_at: None, last_text: None, last_text_at: None }
    }
}

impl ToastState {
    /// Apply the rate limits from §4.4: the same text within 30s is
    /// suppressed entirely; distinct texts within 2s of each other are
    /// throttled (dropped, not queued).
    fn post(&mut self, text: String, now: Instant) {
        if self.last_text.as_deref() == Some(text.as_str()) {
            if let Some(at) = self.last_text_at {
                if now.duration_since(at) < TOAST_SUPPRESS_SAME {
                    return;
                }
            }
        } else if let Some(at) = self.last_text_at {
            if now.duration_since(at) < TOAST_THROTTLE_DISTINCT {
                return;
            }
        }
        self.last_text = Some(text.clone());
        self.last_text_at = Some(now);
        self.text = Some(text);
        self.shown_at = Some(now);
    }

    fn current(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// A destructive or multi-step action awaiting user confirmation, set when
/// a confirm/create-namespace dialog opens and consumed once it closes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    DeleteObject { side: Side, path: Path, id: String },
    CreateNamespace { side: Side },
}

/// Owns everything the event loop reads or mutates across a frame:
/// panels, shared cluster access, the modal stack, and the embedded shell.
pub struct App {
    pub settings: Settings,
    pub panels: [Panel; 2],
    pub active: Side,
    pub pool: Arc<ClusterPool>,
    pub kubeconfig: KubeconfigManager,
    pub modals: ModalStack,
    /// Esc-sequence state for when no modal is open, mapping a lone Esc
    /// then a digit straight to a function key (§4.4 "Esc sequence").
    pub router_esc: EscSequencer,
    pub shell: Box<dyn ShellAdapter>,
    pub shell_presentation: ShellPresentation,
    pub cancel_root: CancelToken,
    pub pending_action: Option<PendingAction>,
    pub pending_edit: Option<EditRequest>,
    pub viewer: Option<Viewer>,
    /// Shared with an open theme-selector dialog so its live preview can
    /// write a candidate theme name without holding a reference into `App`.
    pub theme_cell: Arc<Mutex<String>>,
    busy: BusyState,
    toast: ToastState,
}

impl App {
    /// Build the app for a starting context, wiring a fresh `ClusterClient`
    /// for each panel's `RootFolder` (panels never share mutable config,
    /// only the read-safe client, per §5 "Shared resources").
    pub fn new(start: StartOptions, settings: Settings) -> Self {
        let kubeconfig = KubeconfigManager::discover();
        let pool = Arc::new(ClusterPool::new());
        let kubeconfig_path = start.kubeconfig.clone();
        let context = start
            .context
            .clone()
            .or_else(|| kubeconfig.current_context())
            .unwrap_or_else(|| "default".to_string());
        let default_namespace = kubeconfig.default_namespace(&context).unwrap_or_else(|| "default".to_string());

        let client = build_client(&pool, kubeconfig_path.as_deref(), &context);
        let contexts = kubeconfig.contexts();

        // A per-request context to drive the startup auto-navigation below
        // (§8 scenario 1); the app's own root isn't built yet, so this is
        // derived straight from a fresh `CancelToken` rather than `self`.
        let cancel_root = CancelToken::new();
        let startup_ctx = FolderCtx::derive(&cancel_root);

        let panels = [
            Self::build_panel(client.clone(), &contexts, &context, &settings, pool.clone(), kubeconfig_path.clone(), &default_namespace, &startup_ctx),
            Self::build_panel(client, &contexts, &context, &settings, pool.clone(), kubeconfig_path, &default_namespace, &startup_ctx),
        ];

        let theme_cell = Arc::new(Mutex::new(settings.viewer.theme.clone()));

        App {
            settings,
            panels,
            active: Side::Left,
            pool,
            kubeconfig,
            modals: ModalStack::new(),
            router_esc: EscSequencer::new(),
            shell: Box::new(ProcessShellAdapter::default()),
            shell_presentation: ShellPresentation::Compact,
            cancel_root,
            pending_action: None,
            pending_edit: None,
            viewer: None,
            theme_cell,
            busy: BusyState::default(),
            toast: ToastState::default(),
        }
    }

    /// Open the viewer over `row`'s content from the active panel's current
    /// folder, applying the configured theme with no highlighting beyond
    /// plain line splitting (§4.6 "TextViewer").
    pub fn open_viewer(&mut self, content: crate::folder::ViewContent) {
        let theme = self.settings.viewer.theme.clone();
        self.viewer = Some(Viewer::new(content, &PlainHighlighter, theme));
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    fn build_panel(
        client: Arc<dyn ClusterClient>,
        contexts: &[String],
        current_context: &str,
        settings: &Settings,
        pool: Arc<ClusterPool>,
        kubeconfig_path: Option<String>,
        default_namespace: &str,
        ctx: &FolderCtx,
    ) -> Panel {
        let view = ViewOptions {
            resource_order: settings.resources.order,
            favorites: settings.resources.favorites.clone(),
            show_non_empty_only: settings.resources.show_non_empty_only,
        };
        let contexts = contexts.to_vec();
        let current_context_owned = current_context.to_string();
        let switch_context: Arc<dyn Fn(&str) -> Arc<dyn ClusterClient> + Send + Sync> =
            Arc::new(move |ctx_name: &str| build_client(&pool, kubeconfig_path.as_deref(), ctx_name));
        let deps = Deps {
            client,
            view,
            contexts,
            current_context: current_context_owned,
            switch_context,
        };
        let root = RootFolder::new(deps, Path::root());
        let mut panel = Panel::new(Box::new(root));
        panel.set_double_click_timeout(Duration::from_millis(settings.input.mouse_double_click_timeout_ms));
        navigate_to_default_namespace(&mut panel, ctx, default_namespace);
        panel
    }

    pub fn active_panel(&self) -> &Panel {
        match self.active {
            Side::Left => &self.panels[0],
            Side::Right => &self.panels[1],
        }
    }

    pub fn active_panel_mut(&mut self) -> &mut Panel {
        match self.active {
            Side::Left => &mut self.panels[0],
            Side::Right => &mut self.panels[1],
        }
    }

    pub fn panel(&self, side: Side) -> &Panel {
        match side {
            Side::Left => &self.panels[0],
            Side::Right => &self.panels[1],
        }
    }

    pub fn panel_mut(&mut self, side: Side) -> &mut Panel {
        match side {
            Side::Left => &mut self.panels[0],
            Side::Right => &mut self.panels[1],
        }
    }

    pub fn toggle_active_panel(&mut self) {
        self.active = self.active.other();
    }

    pub fn folder_ctx(&self) -> FolderCtx {
        FolderCtx::derive(&self.cancel_root)
    }

    pub fn shut_down(&self) {
        self.cancel_root.cancel();
    }

    /// Start a busy command; the caller schedules a `BusyShow(token)`
    /// after the router's configured delay.
    pub fn start_busy(&mut self) -> BusyToken {
        self.busy.start()
    }

    pub fn show_busy(&mut self, token: BusyToken) {
        self.busy.show(token);
    }

    /// Finish a busy command. Returns `true` if `token` was the active one
    /// (a stale token from a superseded request is ignored).
    pub fn finish_busy(&mut self, token: BusyToken) -> bool {
        self.busy.finish(token)
    }

    pub fn is_busy_visible(&self) -> bool {
        self.busy.visible
    }

    /// Advance the spinner's four-frame 2x2 pattern; called at 10 Hz while
    /// a busy indicator is visible.
    pub fn tick_busy_frame(&mut self) {
        self.busy.frame = (self.busy.frame + 1) % 4;
    }

    pub fn busy_frame(&self) -> u8 {
        self.busy.frame
    }

    pub fn post_toast(&mut self, text: impl Into<String>, now: Instant) {
        self.toast.post(text.into(), now);
    }

    pub fn current_toast(&self) -> Option<&str> {
        self.toast.current()
    }
}

/// Startup auto-navigation (§8 scenario 1): descend `namespaces` then the
/// context's default namespace, stopping silently the moment either row
/// isn't there — a missing `default` namespace leaves the panel sitting
/// inside `/namespaces` rather than erroring.
fn navigate_to_default_namespace(panel: &mut Panel, ctx: &FolderCtx, namespace: &str) {
    if enter_child_by_id(panel, ctx, "namespaces") {
        enter_child_by_id(panel, ctx, namespace);
    }
}

fn enter_child_by_id(panel: &mut Panel, ctx: &FolderCtx, id: &str) -> bool {
    if panel.select_by_row_id(ctx, id).is_err() {
        return false;
    }
    match panel.current_row(ctx) {
        Ok(Some(row)) if row.id == id => matches!(panel.enter_selected(ctx), Ok(true)),
        _ => false,
    }
}

fn build_client(pool: &ClusterPool, kubeconfig_path: Option<&str>, context: &str) -> Arc<dyn ClusterClient> {
    if cfg!(test) {
        return Arc::new(FakeClusterClient::new());
    }
    let key = crate::cluster::pool::PoolKey {
        kubeconfig_path: kubeconfig_path.unwrap_or_default().to_string(),
        context: context.to_string(),
    };
    let path = kubeconfig_path.map(str::to_string);
    let context = context.to_string();
    pool.get(&key, move || match KubeClusterClient::from_kubeconfig(path.as_deref(), Some(&context)) {
        Ok(client) => Arc::new(client) as Arc<dyn ClusterClient>,
        Err(e) => {
            tracing::error!(error = %e, "failed to build cluster client, falling back to an empty client");
            Arc::new(FakeClusterClient::new()) as Arc<dyn ClusterClient>
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_with_two_independent_panels_on_the_left() {
        // The fake client backing `App::new` in test builds never has a
        // "default" namespace registered, so startup navigation descends
        // one level into `/namespaces` and stops there.
        let app = App::new(StartOptions::default(), Settings::default());
        assert_eq!(app.active, Side::Left);
        assert_eq!(app.panels[0].navigator().depth(), 2);
        assert_eq!(app.panels[1].navigator().depth(), 2);
        assert_eq!(app.panels[0].navigator().path().to_string(), "/namespaces");
    }

    #[test]
    fn startup_navigation_descends_into_a_registered_default_namespace() {
        use crate::cluster::KubeObject;

        let namespaces_gvr = crate::app::types::Gvr::new("", "v1", "namespaces");
        let client: Arc<dyn ClusterClient> =
            Arc::new(FakeClusterClient::new().with_object(namespaces_gvr, KubeObject::new(serde_json::json!({
                "apiVersion": "v1",
                "kind": "Namespace",
                "metadata": { "name": "default" },
            }))));
        let switch_context: Arc<dyn Fn(&str) -> Arc<dyn ClusterClient> + Send + Sync> = {
            let client = client.clone();
            Arc::new(move |_: &str| client.clone())
        };
        let deps = Deps {
            client,
            view: ViewOptions::default(),
            contexts: vec!["dev".to_string()],
            current_context: "dev".to_string(),
            switch_context,
        };
        let root = RootFolder::new(deps, Path::root());
        let mut panel = Panel::new(Box::new(root));
        let ctx = FolderCtx::derive(&CancelToken::new());

        navigate_to_default_namespace(&mut panel, &ctx, "default");

        assert_eq!(panel.navigator().depth(), 3);
        assert_eq!(panel.navigator().path().to_string(), "/namespaces/default");
        // entering pushes a `WithBack` wrapper, so the listing starts on
        // the synthetic ".." row rather than the namespace's first kind.
        let row = panel.current_row(&ctx).unwrap().unwrap();
        assert!(row.back);
    }

    #[test]
    fn toggle_active_panel_flips_side() {
        let mut app = App::new(StartOptions::default(), Settings::default());
        app.toggle_active_panel();
        assert_eq!(app.active, Side::Right);
        app.toggle_active_panel();
        assert_eq!(app.active, Side::Left);
    }

    #[test]
    fn finish_busy_ignores_stale_token() {
        let mut app = App::new(StartOptions::default(), Settings::default());
        let first = app.start_busy();
        let second = app.start_busy();
        assert!(!app.finish_busy(first));
        assert!(app.finish_busy(second));
    }

    #[test]
    fn toast_suppresses_identical_text_within_window() {
        let mut app = App::new(StartOptions::default(), Settings::default());
        let now = Instant::now();
        app.post_toast("deleted pod foo", now);
        app.post_toast("deleted pod foo", now + Duration::from_secs(1));
        assert_eq!(app.current_toast(), Some("deleted pod foo"));
    }

    #[test]
    fn toast_throttles_distinct_text_within_two_seconds() {
        let mut app = App::new(StartOptions::default(), Settings::default());
        let now = Instant::now();
        app.post_toast("first", now);
        app.post_toast("second", now + Duration::from_millis(500));
        assert_eq!(app.current_toast(), Some("first"));
        app.post_toast("second", now + Duration::from_secs(3));
        assert_eq!(app.current_toast(), Some("second"));
    }
}
