use std::cell::RefCell;

use super::{ProfileRow, ProfileStore, StoreError};

/// Rows held in memory, for tests and offline demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
	rows: RefCell<Vec<Vec<String>>>,
	failing: bool,
}

impl MemoryStore {
	/// A store pre-filled with raw rows.
	pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
		Self {
			rows: RefCell::new(rows),
			failing: false,
		}
	}

	/// A store whose every call fails, as an unreachable sheet would.
	pub fn failing() -> Self {
		Self {
			rows: RefCell::default(),
			failing: true,
		}
	}

	/// Snapshot of the stored rows.
	pub fn rows(&self) -> Vec<Vec<String>> {
		self.rows.borrow().clone()
	}

	fn check(&self) -> Result<(), StoreError> {
		if self.failing {
			return Err(StoreError::Status {
				status: 503,
				body: "unavailable".into(),
			});
		}
		Ok(())
	}
}

impl ProfileStore for MemoryStore {
	async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
		self.check()?;
		Ok(self.rows())
	}

	async fn append_row(&self, row: &ProfileRow) -> Result<(), StoreError> {
		self.check()?;
		self.rows.borrow_mut().push(row.to_cells());
		Ok(())
	}
}
