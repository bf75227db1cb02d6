//! The eleven-column row layout shared by the writer and the reader.
//!
//! Column order is part of the stored data; changing it needs a migration of
//! the existing sheet.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::profile::{Approval, Profile};

/// Number of columns, `A` through `K`.
pub const COLUMN_COUNT: usize = 11;

const NAME: usize = 0;
const MAJOR: usize = 1;
const GRAD_YEAR: usize = 2;
const WEBSITE: usize = 3;
const BUILDING: usize = 4;
const PHOTO_URL: usize = 5;
const LINKEDIN: usize = 6;
const GITHUB: usize = 7;
const TWITTER: usize = 8;
const APPROVED: usize = 9;
const CREATED_AT: usize = 10;

/// One stored profile with its moderation flag and creation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRow {
	/// The profile fields.
	pub profile: Profile,
	/// Column J.
	pub approval: Approval,
	/// Column K, ISO-8601 as written; kept verbatim when read.
	pub created_at: String,
}

impl ProfileRow {
	/// A freshly submitted row. Submissions are approved on arrival.
	pub fn new_submission(profile: Profile, now: DateTime<Utc>) -> Self {
		Self {
			profile,
			approval: Approval::Approved,
			created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
		}
	}

	/// Cells in column order.
	pub fn to_cells(&self) -> Vec<String> {
		let p = &self.profile;
		let mut cells = vec![String::new(); COLUMN_COUNT];
		cells[NAME] = p.name.clone();
		cells[MAJOR] = p.major.clone();
		cells[GRAD_YEAR] = p.grad_year.clone();
		cells[WEBSITE] = p.website.clone();
		cells[BUILDING] = p.building.clone();
		cells[PHOTO_URL] = p.photo_url.clone();
		cells[LINKEDIN] = p.linkedin.clone();
		cells[GITHUB] = p.github.clone();
		cells[TWITTER] = p.twitter.clone();
		cells[APPROVED] = self.approval.as_cell().to_string();
		cells[CREATED_AT] = self.created_at.clone();
		cells
	}

	/// Reads a row. The sheet omits trailing blank cells, so missing
	/// columns read as empty.
	pub fn from_cells(cells: &[String]) -> Self {
		let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
		Self {
			profile: Profile {
				name: cell(NAME),
				major: cell(MAJOR),
				grad_year: cell(GRAD_YEAR),
				website: cell(WEBSITE),
				building: cell(BUILDING),
				photo_url: cell(PHOTO_URL),
				linkedin: cell(LINKEDIN),
				github: cell(GITHUB),
				twitter: cell(TWITTER),
			},
			approval: Approval::from_cell(&cell(APPROVED)),
			created_at: cell(CREATED_AT),
		}
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	fn profile() -> Profile {
		Profile {
			name: "Jane Smith".into(),
			major: "CS".into(),
			grad_year: "2027".into(),
			building: "a compiler".into(),
			website: "https://jane.dev".into(),
			github: "jsmith".into(),
			..Default::default()
		}
	}

	#[test]
	fn submission_row_layout() {
		let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 5).unwrap();
		let cells = ProfileRow::new_submission(profile(), now).to_cells();
		assert_eq!(
			cells,
			vec![
				"Jane Smith",
				"CS",
				"2027",
				"https://jane.dev",
				"a compiler",
				"",
				"",
				"jsmith",
				"",
				"TRUE",
				"2026-03-01T12:30:05.000Z",
			]
		);
	}

	#[test]
	fn short_rows_read_as_pending() {
		let cells: Vec<String> = ["Jane", "CS", "2027", "", "stuff"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		let row = ProfileRow::from_cells(&cells);
		assert_eq!(row.profile.building, "stuff");
		assert_eq!(row.profile.twitter, "");
		assert_eq!(row.approval, Approval::Pending);
		assert_eq!(row.created_at, "");
	}

	#[test]
	fn reads_back_what_it_writes() {
		let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
		let row = ProfileRow::new_submission(profile(), now);
		assert_eq!(ProfileRow::from_cells(&row.to_cells()), row);
	}
}
