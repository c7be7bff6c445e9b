//! `WithBack` prepends a synthetic `..` row to any folder, used by the
//! navigator for every folder except the one at the bottom of the stack
//! (§4.2 "hasBack").

use super::{Folder, Row, ViewContent};
use crate::app::types::{Gvr, Path};
use crate::ctx::FolderCtx;
use crate::errors::FolderError;

pub struct WithBack {
    inner: Box<dyn Folder>,
}

impl WithBack {
    pub fn new(inner: Box<dyn Folder>) -> Self {
        WithBack { inner }
    }
}

impl Folder for WithBack {
    fn key(&self) -> &str {
        self.inner.key()
    }

    fn path(&self) -> Path {
        self.inner.path()
    }

    fn columns(&self) -> Vec<String> {
        self.inner.columns()
    }

    fn len(&self, ctx: &FolderCtx) -> Result<usize, FolderError> {
        Ok(self.inner.len(ctx)? + 1)
    }

    fn lines(&self, ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
        if top == 0 {
            let mut rows = vec![Row::back_row()];
            if count > 1 {
                rows.extend(self.inner.lines(ctx, 0, count - 1)?);
            }
            Ok(rows)
        } else {
            self.inner.lines(ctx, top - 1, count)
        }
    }

    fn find(&self, ctx: &FolderCtx, id: &str) -> Result<(usize, Option<Row>), FolderError> {
        if id == "__back__" {
            return Ok((0, Some(Row::back_row())));
        }
        let (idx, row) = self.inner.find(ctx, id)?;
        Ok((idx + 1, row))
    }

    fn enter(&self, ctx: &FolderCtx, row: &Row) -> Result<Box<dyn Folder>, FolderError> {
        self.inner.enter(ctx, row)
    }

    fn view_content(&self, ctx: &FolderCtx, row: &Row) -> Result<ViewContent, FolderError> {
        self.inner.view_content(ctx, row)
    }

    fn refresh(&mut self) {
        self.inner.refresh()
    }

    fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    fn object_list_meta(&self) -> Option<(Gvr, Option<String>)> {
        self.inner.object_list_meta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::CancelToken;

    struct Stub(Vec<Row>);
    impl Folder for Stub {
        fn key(&self) -> &str {
            "stub"
        }
        fn path(&self) -> Path {
            Path::root()
        }
        fn columns(&self) -> Vec<String> {
            vec!["Name".into()]
        }
        fn len(&self, _ctx: &FolderCtx) -> Result<usize, FolderError> {
            Ok(self.0.len())
        }
        fn lines(&self, _ctx: &FolderCtx, top: usize, count: usize) -> Result<Vec<Row>, FolderError> {
            Ok(self.0[top..(top + count).min(self.0.len())].to_vec())
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
    fn prepends_back_row() {
        let inner = Stub(vec![Row::simple("a", vec!["a".into()])]);
        let wrapped = WithBack::new(Box::new(inner));
        let c = ctx();
        assert_eq!(wrapped.len(&c).unwrap(), 2);
        let rows = wrapped.lines(&c, 0, 2).unwrap();
        assert!(rows[0].back);
        assert_eq!(rows[1].id, "a");
    }

    #[test]
    fn find_shifts_inner_index_by_one() {
        let inner = Stub(vec![Row::simple("a", vec!["a".into()]), Row::simple("b", vec!["b".into()])]);
        let wrapped = WithBack::new(Box::new(inner));
        let c = ctx();
        let (idx, row) = wrapped.find(&c, "b").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(row.unwrap().id, "b");
    }
}
