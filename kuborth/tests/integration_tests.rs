use kuborth::app::settings::Settings;
use kuborth::app::types::StartOptions;
use kuborth::app::App;
use kuborth::{Path, Side};

/// End-to-end smoke test: an `App` built the same way `main` builds one
/// starts with two independent left/right panels, each auto-navigated into
/// `/namespaces` (the test fixture's context has no default namespace to
/// descend further into), with no viewer or modal open, and toggling the
/// active side doesn't disturb either panel's own navigation state.
#[test]
fn app_boots_with_two_independent_root_panels() {
    let mut app = App::new(StartOptions::default(), Settings::default());
    let namespaces = Path::root().push("namespaces");

    assert_eq!(app.active, Side::Left);
    assert!(app.viewer.is_none());
    assert!(app.modals.is_empty());
    assert_eq!(app.panel(Side::Left).navigator().path(), namespaces);
    assert_eq!(app.panel(Side::Right).navigator().path(), namespaces);

    app.toggle_active_panel();
    assert_eq!(app.active, Side::Right);
    assert_eq!(app.panel(Side::Left).navigator().path(), namespaces);
}
