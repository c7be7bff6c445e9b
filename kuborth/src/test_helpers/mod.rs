// Test helpers for unit/integration tests.
// This module is compiled only for tests or when the `test-helpers` feature
// is explicitly enabled.

#[cfg(any(test, feature = "test-helpers"))]
pub use _test_only::{fake_deps, set_up_temp_home, set_up_temp_xdg_config};

#[cfg(any(test, feature = "test-helpers"))]
mod _test_only {
	use std::sync::Arc;
	use tempfile::TempDir;

	use crate::cluster::{ClusterClient, FakeClusterClient};
	use crate::folder::{Deps, ViewOptions};

	/// Create a temporary directory and set common environment variables so
	/// tests do not touch the real user environment.
	///
	/// Returns the `TempDir` which the caller should keep alive for the
	/// duration of the test.
	pub fn set_up_temp_home() -> TempDir {
		let td = tempfile::tempdir().expect("failed to create tempdir");
		std::env::set_var("HOME", td.path());
		std::env::set_var("XDG_CONFIG_HOME", td.path());
		std::env::set_var("XDG_DATA_HOME", td.path());
		td
	}

	/// Convenience helper that sets only XDG config to a new tempdir and
	/// returns it.
	pub fn set_up_temp_xdg_config() -> TempDir {
		let td = tempfile::tempdir().expect("failed to create tempdir");
		std::env::set_var("XDG_CONFIG_HOME", td.path());
		td
	}

	/// A `Deps` wired to a fresh `FakeClusterClient`, for tests that need a
	/// folder dependency bundle without repeating the boilerplate.
	pub fn fake_deps() -> Deps {
		Deps {
			client: Arc::new(FakeClusterClient::new()) as Arc<dyn ClusterClient>,
			view: ViewOptions::default(),
			contexts: vec!["test-context".to_string()],
			current_context: "test-context".to_string(),
			switch_context: Arc::new(|_| Arc::new(FakeClusterClient::new()) as Arc<dyn ClusterClient>),
		}
	}
}
