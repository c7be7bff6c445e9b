//! A per-panel navigation stack: the folder chain from root to the folder
//! currently shown, plus the row-id the user had selected at each level so
//! stepping back restores it rather than resetting to the top (§4.2).

use crate::folder::{Folder, WithBack};

pub struct Navigator {
    stack: Vec<Box<dyn Folder>>,
    selection_ids: Vec<Option<String>>,
}

impl Navigator {
    /// Build a navigator rooted at `root`. The root is never wrapped in
    /// `WithBack`: there is nothing above it to go back to.
    pub fn new(root: Box<dyn Folder>) -> Self {
        Navigator { stack: vec![root], selection_ids: vec![None] }
    }

    pub fn current(&self) -> &dyn Folder {
        self.stack.last().expect("navigator stack is never empty").as_ref()
    }

    pub fn current_mut(&mut self) -> &mut Box<dyn Folder> {
        self.stack.last_mut().expect("navigator stack is never empty")
    }

    pub fn has_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Record which row is selected at the current level, so a later `back`
    /// can restore it.
    pub fn set_selection_id(&mut self, id: Option<String>) {
        *self.selection_ids.last_mut().expect("navigator stack is never empty") = id;
    }

    pub fn current_selection_id(&self) -> Option<&str> {
        self.selection_ids.last().expect("navigator stack is never empty").as_deref()
    }

    /// Push a child folder onto the stack, wrapping it with a back row
    /// since it is never the bottom of the stack. The caller must have
    /// already recorded the parent's selection via `set_selection_id`
    /// before calling this, so the parent's position survives the push.
    pub fn push(&mut self, child: Box<dyn Folder>) {
        self.stack.push(Box::new(WithBack::new(child)));
        self.selection_ids.push(None);
    }

    /// Pop back to the parent, returning the selection id it had recorded
    /// when this level was pushed. Returns `None` (no-op) at the root.
    pub fn back(&mut self) -> Option<String> {
        if !self.has_back() {
            return None;
        }
        self.stack.pop();
        self.selection_ids.pop();
        self.selection_ids.last().and_then(|s| s.clone())
    }

    pub fn path(&self) -> crate::app::types::Path {
        self.current().path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::types::Path;
    use crate::ctx::{CancelToken, FolderCtx};
    use crate::errors::FolderError;
    use crate::folder::{Row, ViewContent};

    struct Leaf(&'static str, Vec<Row>);
    impl Folder for Leaf {
        fn key(&self) -> &str {
            self.0
        }
        fn path(&self) -> Path {
            Path::root().push(self.0)
        }
        fn columns(&self) -> Vec<String> {
            vec!["Name".into()]
        }
        fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
            Ok(self.1.len())
        }
        fn lines(&self, _ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
            Ok(self.1[top..(top + count).min(self.1.len())].to_vec())
        }
        fn enter(&self, _ctx: &FolderCtx, _row: &Row) -> Result<Box<dyn Folder>, FolderError> {
            Ok(Box::new(Leaf("child", vec![])))
        }
        fn view_content(&self, _ctx: &FolderCtx, _row: &Row) -> Result<ViewContent, FolderError> {
            Err(FolderError::NoViewContent)
        }
    }

    #[test]
    fn root_has_no_back() {
        let nav = Navigator::new(Box::new(Leaf("root", vec![])));
        assert!(!nav.has_back());
    }

    #[test]
    fn pushing_adds_back_capability_and_wraps_child() {
        let mut nav = Navigator::new(Box::new(Leaf("root", vec![Row::simple("a", vec!["a".into()])])));
        let ctx = FolderCtx::derive(&CancelToken::new());
        nav.set_selection_id(Some("a".into()));
        let row = Row::simple("a", vec!["a".into()]);
        let child = nav.current().enter(&ctx, &row).unwrap();
        nav.push(child);
        assert!(nav.has_back());
        // the pushed child is wrapped, so it reports one extra (back) row.
        assert_eq!(nav.current().len(&ctx).unwrap(), 1);
    }

    #[test]
    fn back_restores_parent_selection() {
        let mut nav = Navigator::new(Box::new(Leaf("root", vec![Row::simple("a", vec!["a".into()])])));
        let ctx = FolderCtx::derive(&CancelToken::new());
        nav.set_selection_id(Some("a".into()));
        let row = Row::simple("a", vec!["a".into()]);
        let child = nav.current().enter(&ctx, &row).unwrap();
        nav.push(child);
        nav.set_selection_id(Some("b".into()));
        let restored = nav.back();
        assert_eq!(restored.as_deref(), Some("a"));
        assert!(!nav.has_back());
    }

    #[test]
    fn back_at_root_is_noop() {
        let mut nav = Navigator::new(Box::new(Leaf("root", vec![])));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.depth(), 1);
    }
}
