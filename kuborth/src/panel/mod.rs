//! The Panel runtime: binds a [`Navigator`] to selection/scroll/paging
//! state, computes column layout, and reports per-selection capabilities
//! (§4.3).

pub mod layout;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::app::types::PanelMode;
use crate::ctx::FolderCtx;
use crate::errors::FolderError;
use crate::folder::{Folder, Row};
use crate::navigator::Navigator;

/// Per-selection action permissions, recomputed on every render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_help: bool,
    pub has_options: bool,
    pub has_context_menu: bool,
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_create_ns: bool,
    pub supports_describe: bool,
}

/// Default double-click window (§4.3 "Double-click").
pub const DEFAULT_DOUBLE_CLICK: Duration = Duration::from_millis(300);

struct LastClick {
    at: Instant,
    row_id: String,
}

pub struct Panel {
    nav: Navigator,
    pub focused: bool,
    selected: usize,
    scroll_top: usize,
    mode: PanelMode,
    columns: Vec<String>,
    col_widths: Vec<usize>,
    double_click_timeout: Duration,
    last_click: Option<LastClick>,
    marked: HashSet<String>,
}

impl Panel {
    pub fn new(root: Box<dyn Folder>) -> Self {
        let columns = root.columns();
        Panel {
            nav: Navigator::new(root),
            focused: false,
            selected: 0,
            scroll_top: 0,
            mode: PanelMode::List,
            columns,
            col_widths: Vec::new(),
            double_click_timeout: DEFAULT_DOUBLE_CLICK,
            last_click: None,
            marked: HashSet::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PanelMode) {
        self.mode = mode;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn set_double_click_timeout(&mut self, timeout: Duration) {
        self.double_click_timeout = timeout;
    }

    fn rows_window(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        self.nav.current().lines(ctx, top, count)
    }

    /// Rows currently scrolled into view, for the renderer: up to `height`
    /// rows starting at `scroll_top`.
    pub fn visible_rows(&self, ctx: &FolderCtx, height: usize) -> Result<Vec<Row>, FolderError> {
        self.rows_window(ctx, self.scroll_top, height)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn current_row(&self, ctx: &FolderCtx) -> Result<Option<Row>, FolderError> {
        let len = self.nav.current().len(ctx)?;
        if self.selected >= len {
            return Ok(None);
        }
        Ok(self.rows_window(ctx, self.selected, 1)?.into_iter().next())
    }

    /// Select the row with the given id, falling back to top if absent
    /// (§4.3 "selectByRowID").
    pub fn select_by_row_id(&mut self, ctx: &FolderCtx, id: &str) -> Result<(), FolderError> {
        let (idx, row) = self.nav.current().find(ctx, id)?;
        self.selected = if row.is_some() { idx } else { 0 };
        self.clamp_scroll(ctx)?;
        Ok(())
    }

    /// Select the back row if present, else the first row.
    pub fn reset_selection_top(&mut self) {
        self.selected = 0;
        self.scroll_top = 0;
    }

    /// Select the row at absolute index `idx` (e.g. from a mouse click),
    /// clamping to the current length.
    pub fn select_at(&mut self, ctx: &FolderCtx, idx: usize) -> Result<(), FolderError> {
        self.selected = idx;
        self.clamp_scroll(ctx)
    }

    fn clamp_scroll(&mut self, ctx: &FolderCtx) -> Result<(), FolderError> {
        let len = self.nav.current().len(ctx)?;
        if len == 0 {
            self.selected = 0;
            self.scroll_top = 0;
            return Ok(());
        }
        self.selected = self.selected.min(len - 1);
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        }
        Ok(())
    }

    pub fn move_up(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        self.selected = self.selected.saturating_sub(1);
        self.reflow_scroll(ctx, height)
    }

    pub fn move_down(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        let len = self.nav.current().len(ctx)?;
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
        self.reflow_scroll(ctx, height)
    }

    pub fn page_up(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        let step = height.saturating_sub(3).max(1);
        self.selected = self.selected.saturating_sub(step);
        self.reflow_scroll(ctx, height)
    }

    pub fn page_down(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        let step = height.saturating_sub(3).max(1);
        let len = self.nav.current().len(ctx)?;
        if len > 0 {
            self.selected = (self.selected + step).min(len - 1);
        }
        self.reflow_scroll(ctx, height)
    }

    pub fn home(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        self.selected = 0;
        self.reflow_scroll(ctx, height)
    }

    pub fn end(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        let len = self.nav.current().len(ctx)?;
        self.selected = len.saturating_sub(1);
        self.reflow_scroll(ctx, height)
    }

    fn reflow_scroll(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        let _ = ctx;
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if height > 0 && self.selected >= self.scroll_top + height {
            self.scroll_top = self.selected + 1 - height;
        }
        Ok(())
    }

    /// Enter the currently selected row: back navigates up, an enterable
    /// row descends, recording the pre-push selection for later `back`.
    pub fn enter_selected(&mut self, ctx: &FolderCtx) -> Result<bool, FolderError> {
        let Some(row) = self.current_row(ctx)? else { return Ok(false) };
        if row.back {
            return self.go_back(ctx);
        }
        if !row.enterable {
            return Ok(false);
        }
        let child = self.nav.current().enter(ctx, &row)?;
        self.nav.set_selection_id(Some(row.id));
        self.columns = child.columns();
        self.nav.push(child);
        self.reset_selection_top();
        self.marked.clear();
        Ok(true)
    }

    /// Step back to the parent, restoring its remembered selection
    /// (§4.3 "Position memory").
    pub fn go_back(&mut self, ctx: &FolderCtx) -> Result<bool, FolderError> {
        let Some(restore_id) = self.nav.back() else { return Ok(false) };
        self.columns = self.nav.current().columns();
        self.select_by_row_id(ctx, &restore_id)?;
        self.marked.clear();
        Ok(true)
    }

    pub fn is_marked(&self, id: &str) -> bool {
        self.marked.contains(id)
    }

    /// Flip the mark on the selected row and advance by one (§4.3
    /// "toggleSelection").
    pub fn toggle_selection(&mut self, ctx: &FolderCtx, height: usize) -> Result<(), FolderError> {
        if let Some(row) = self.current_row(ctx)? {
            if !row.back && !self.marked.remove(&row.id) {
                self.marked.insert(row.id);
            }
        }
        self.move_down(ctx, height)
    }

    /// Mark every row in the current listing (§4.3 "selectAll").
    pub fn select_all(&mut self, ctx: &FolderCtx) -> Result<(), FolderError> {
        let len = self.nav.current().len(ctx)?;
        for row in self.rows_window(ctx, 0, len)? {
            if !row.back {
                self.marked.insert(row.id);
            }
        }
        Ok(())
    }

    /// Flip the mark on every row in the current listing (§4.3
    /// "invertSelection").
    pub fn invert_selection(&mut self, ctx: &FolderCtx) -> Result<(), FolderError> {
        let len = self.nav.current().len(ctx)?;
        for row in self.rows_window(ctx, 0, len)? {
            if row.back {
                continue;
            }
            if !self.marked.remove(&row.id) {
                self.marked.insert(row.id);
            }
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.marked.clear();
    }

    pub fn refresh_folder(&mut self, ctx: &FolderCtx) -> Result<(), FolderError> {
        self.nav.current_mut().refresh();
        let new_columns = self.nav.current().columns();
        if new_columns != self.columns {
            self.columns = new_columns;
            self.col_widths.clear();
        }
        self.clamp_scroll(ctx)
    }

    pub fn is_dirty(&self) -> bool {
        self.nav.current().is_dirty()
    }

    /// Recompute column widths for `budget` interior columns, reusing the
    /// cached widths when the schema is unchanged (§8 "Column-schema
    /// stability").
    pub fn column_widths(&mut self, ctx: &FolderCtx, budget: usize) -> Result<&[usize], FolderError> {
        let len = self.nav.current().len(ctx)?;
        let rows = self.rows_window(ctx, 0, len)?;
        let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells.clone()).collect();
        self.col_widths = layout::column_widths(&self.columns, &cells, budget);
        Ok(&self.col_widths)
    }

    pub fn capabilities(&self, ctx: &FolderCtx, edits_permitted: bool, deletes_permitted: bool, ns_create_permitted: bool) -> Capabilities {
        let row = self.current_row(ctx).ok().flatten();
        let can_view = row.as_ref().map(|r| r.viewable && !r.back).unwrap_or(false);
        let is_object = row.as_ref().map(|r| r.object.is_some()).unwrap_or(false);
        let at_namespaces_root = self.nav.path().to_string() == "/namespaces";
        Capabilities {
            has_help: true,
            has_options: true,
            has_context_menu: true,
            can_view,
            can_edit: is_object && edits_permitted,
            can_delete: is_object && deletes_permitted,
            can_create_ns: ns_create_permitted && at_namespaces_root,
            supports_describe: is_object && edits_permitted,
        }
    }

    /// Two left clicks within the configured timeout on the same row id
    /// promote to Enter (§4.3 "Double-click").
    pub fn register_click(&mut self, row_id: &str, now: Instant) -> bool {
        let is_double = self
            .last_click
            .as_ref()
            .map(|c| c.row_id == row_id && now.duration_since(c.at) <= self.double_click_timeout)
            .unwrap_or(false);
        self.last_click = if is_double { None } else { Some(LastClick { at: now, row_id: row_id.to_string() }) };
        is_double
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::Path;
    use crate::ctx::CancelToken;
    use crate::errors::FolderError;
    use crate::folder::ViewContent;

    struct TwoLevel;
    impl Folder for TwoLevel {
        fn key(&self) -> &str {
            "two-level"
        }
        fn path(&self) -> Path {
            Path::root()
        }
        fn columns(&self) -> Vec<String> {
            vec!["Name".into()]
        }
        fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
            Ok(1)
        }
        fn lines(&self, _ctx: &FolderCtx, _top: usize, _count: usize) -> Result<Vec<Row>, FolderError> {
            Ok(vec![Row::enterable("child", vec!["child".into()])])
        }
        fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
            Ok(Box::new(Leaf))
        }
        fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
            Err(FolderError::NoViewContent)
        }
    }

    struct Leaf;
    impl Folder for Leaf {
        fn key(&self) -> &str {
            "leaf"
        }
        fn path(&self) -> Path {
            Path::root().push("child")
        }
        fn columns(&self) -> Vec<String> {
            vec!["Name".into()]
        }
        fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
            Ok(0)
        }
        fn lines(&self, _ctx: &FolderCtx, _top: usize, _count: usize) -> Result<Vec<Row>, FolderError> {
            Ok(vec![])
        }
        fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
            Err(FolderError::EnterFailed("leaf".into()))
        }
        fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
            Err(FolderError::NoViewContent)
        }
    }

    fn ctx() -> FolderCtx {
        FolderCtx::derive(&CancelToken::new())
    }

    #[test]
    fn enter_then_back_restores_selection() {
        let mut panel = Panel::new(Box::new(TwoLevel));
        let c = ctx();
        assert!(panel.enter_selected(&c).unwrap());
        assert!(panel.navigator().has_back());
        assert!(panel.go_back(&c).unwrap());
        assert!(!panel.navigator().has_back());
        assert_eq!(panel.selected_index(), 0);
    }

    #[test]
    fn double_click_detected_on_same_row_within_timeout() {
        let mut panel = Panel::new(Box::new(TwoLevel));
        panel.set_double_click_timeout(Duration::from_millis(300));
        let t0 = Instant::now();
        assert!(!panel.register_click("child", t0));
        assert!(panel.register_click("child", t0 + Duration::from_millis(50)));
    }

    #[test]
    fn click_on_different_row_resets_state() {
        let mut panel = Panel::new(Box::new(TwoLevel));
        let t0 = Instant::now();
        assert!(!panel.register_click("a", t0));
        assert!(!panel.register_click("b", t0 + Duration::from_millis(50)));
    }

    #[test]
    fn capabilities_reflect_selected_row() {
        let panel = Panel::new(Box::new(TwoLevel));
        let c = ctx();
        let caps = panel.capabilities(&c, true, true, true);
        assert!(!caps.can_view);
        assert!(!caps.can_edit);
    }

    struct ThreeRows;
    impl Folder for ThreeRows {
        fn key(&self) -> &str {
            "three-rows"
        }
        fn path(&self) -> Path {
            Path::root()
        }
        fn columns(&self) -> Vec<String> {
            vec!["Name".into()]
        }
        fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
            Ok(3)
        }
        fn lines(&self, _ctx: &FolderCtx, _top: usize, _count: usize) -> Result<Vec<Row>, FolderError> {
            Ok(vec![
                Row::simple("a", vec!["a".into()]),
                Row::simple("b", vec!["b".into()]),
                Row::simple("c", vec!["c".into()]),
            ])
        }
        fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
            Err(FolderError::EnterFailed("leaf".into()))
        }
        fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
            Err(FolderError::NoViewContent)
        }
    }

    #[test]
    fn toggle_selection_marks_and_advances() {
        let mut panel = Panel::new(Box::new(ThreeRows));
        let c = ctx();
        panel.toggle_selection(&c, 10).unwrap();
        assert!(panel.is_marked("a"));
        assert_eq!(panel.selected_index(), 1);
        panel.toggle_selection(&c, 10).unwrap();
        assert!(panel.is_marked("b"));
        assert_eq!(panel.selected_index(), 2);
    }

    #[test]
    fn select_all_marks_every_row() {
        let mut panel = Panel::new(Box::new(ThreeRows));
        let c = ctx();
        panel.select_all(&c).unwrap();
        assert!(panel.is_marked("a"));
        assert!(panel.is_marked("b"));
        assert!(panel.is_marked("c"));
    }

    #[test]
    fn invert_selection_flips_every_row() {
        let mut panel = Panel::new(Box::new(ThreeRows));
        let c = ctx();
        panel.toggle_selection(&c, 10).unwrap(); // marks "a"
        panel.invert_selection(&c).unwrap();
        assert!(!panel.is_marked("a"));
        assert!(panel.is_marked("b"));
        assert!(panel.is_marked("c"));
    }

    #[test]
    fn entering_a_child_clears_marks_from_the_parent_listing() {
        let mut panel = Panel::new(Box::new(TwoLevel));
        let c = ctx();
        panel.toggle_selection(&c, 10).unwrap();
        assert!(panel.is_marked("child"));
        assert!(panel.enter_selected(&c).unwrap());
        assert!(!panel.is_marked("child"));
        assert!(panel.go_back(&c).unwrap());
        assert!(!panel.is_marked("child"));
    }
}
