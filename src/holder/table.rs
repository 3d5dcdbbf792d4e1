/* src/holder/table.rs */

//!
//! Id-keyed tables of rows, a common shape for scope contents.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{HoldError, Hub};
use crate::format::{AnyFormat, Format};

/// A table row identified by a string id.
pub trait Row {
	fn id(&self) -> &str;
}

/// Rows kept sorted by id.
///
/// A table parses from a document holding a list of rows. Ids must be
/// unique; a document with duplicated ids is rejected as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
	rows: Vec<R>,
	format: AnyFormat,
}

impl<R> Default for Table<R> {
	fn default() -> Self {
		Self {
			rows: Vec::new(),
			format: AnyFormat::Json,
		}
	}
}

impl<R: Row> Table<R> {
	/// Builds a table from rows, rejecting duplicated ids.
	pub fn from_rows(mut rows: Vec<R>) -> Result<Self, HoldError> {
		rows.sort_by(|a, b| a.id().cmp(b.id()));
		if let Some(pair) = rows.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
			return Err(HoldError::DuplicatedKey {
				key: pair[0].id().to_string(),
			});
		}
		Ok(Self {
			rows,
			format: AnyFormat::Json,
		})
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// The format row contents are decoded with in `insert`/`update`.
	pub fn format(&self) -> AnyFormat {
		self.format
	}

	fn position(&self, id: &str) -> Result<usize, usize> {
		self.rows.binary_search_by(|row| row.id().cmp(id))
	}

	/// Looks up the row with the given id.
	pub fn lookup(&self, id: &str) -> Result<&R, HoldError> {
		self.position(id)
			.map(|i| &self.rows[i])
			.map_err(|_| HoldError::NotFound { key: id.to_string() })
	}

	/// Returns up to `limit` rows starting at `offset`, plus the total count.
	///
	/// With `desc` the rows are walked from the highest id down.
	pub fn scan(&self, offset: usize, limit: usize, desc: bool) -> (Vec<&R>, usize) {
		let total = self.rows.len();
		let rows = if desc {
			self.rows.iter().rev().skip(offset).take(limit).collect()
		} else {
			self.rows.iter().skip(offset).take(limit).collect()
		};
		(rows, total)
	}

	/// Deletes the row with the given id, reporting whether it existed.
	pub fn delete(&mut self, id: &str) -> bool {
		match self.position(id) {
			Ok(i) => {
				self.rows.remove(i);
				true
			}
			Err(_) => false,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &R> {
		self.rows.iter()
	}
}

impl<R: Row + DeserializeOwned> Table<R> {
	/// Decodes a row and inserts it.
	pub fn insert(&mut self, content: &str) -> Result<&R, HoldError> {
		let row: R = self.format.decode(content.as_bytes())?;
		match self.position(row.id()) {
			Ok(_) => Err(HoldError::DuplicatedKey {
				key: row.id().to_string(),
			}),
			Err(i) => {
				self.rows.insert(i, row);
				Ok(&self.rows[i])
			}
		}
	}

	/// Replaces the row with the given id by the decoded `content`.
	///
	/// The decoded row must keep the same id.
	pub fn update(&mut self, id: &str, content: &str) -> Result<(), HoldError> {
		let i = self
			.position(id)
			.map_err(|_| HoldError::NotFound { key: id.to_string() })?;
		let row: R = self.format.decode(content.as_bytes())?;
		if row.id() != id {
			return Err(HoldError::OperationNotAllowed(format!(
				"row id cannot change from {id:?} to {:?}",
				row.id()
			)));
		}
		self.rows[i] = row;
		Ok(())
	}
}

impl<R: Row + Serialize> Table<R> {
	/// Encodes all rows in id order.
	pub fn encode(&self) -> Result<Vec<u8>, HoldError> {
		Ok(self.format.encode(&self.rows)?)
	}
}

impl<R> Hub for Table<R>
where
	R: Row + DeserializeOwned + Send + Sync + 'static,
{
	fn parse(&mut self, data: &[u8], format: AnyFormat) -> Result<(), HoldError> {
		let rows: Vec<R> = format.decode(data)?;
		let mut table = Self::from_rows(rows)?;
		table.format = format;
		*self = table;
		Ok(())
	}
}
