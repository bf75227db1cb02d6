//! Directory entrants and the submission record that creates them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One directory entrant.
///
/// Optional fields hold an empty string when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Full name.
	pub name: String,
	/// Major or program.
	pub major: String,
	/// Class year, free text ("2027", "ph.d. candidate").
	pub grad_year: String,
	/// What they are building.
	pub building: String,
	/// Personal website.
	pub website: String,
	/// Avatar URL, either remote or a camera-captured `data:` URL.
	pub photo_url: String,
	/// LinkedIn handle or URL.
	pub linkedin: String,
	/// GitHub username.
	pub github: String,
	/// Twitter / X handle.
	pub twitter: String,
}

impl Profile {
	/// Up to two upper-case initials taken from the first words of the name.
	pub fn initials(&self) -> String {
		self.name
			.split_whitespace()
			.filter_map(|word| word.chars().next())
			.take(2)
			.flat_map(char::to_uppercase)
			.collect()
	}

	/// Whether the avatar was captured in the browser rather than linked.
	pub fn has_data_photo(&self) -> bool {
		self.photo_url.starts_with("data:")
	}

	/// GitHub profile link.
	pub fn github_url(&self) -> Option<String> {
		non_empty(&self.github)
			.map(|user| format!("https://github.com/{}", user.trim_start_matches('@')))
	}

	/// LinkedIn link; absolute URLs are kept, handles are expanded.
	pub fn linkedin_url(&self) -> Option<String> {
		let handle = non_empty(&self.linkedin)?;
		if handle.starts_with("http") {
			return Some(handle.to_string());
		}
		let handle = handle.strip_prefix("in/").unwrap_or(handle);
		Some(format!("https://linkedin.com/in/{handle}"))
	}

	/// Twitter / X link.
	pub fn twitter_url(&self) -> Option<String> {
		non_empty(&self.twitter)
			.map(|handle| format!("https://twitter.com/{}", handle.trim_start_matches('@')))
	}

	/// Website with the scheme and a trailing slash removed, for display.
	pub fn website_label(&self) -> Option<String> {
		let site = non_empty(&self.website)?;
		let site = site
			.strip_prefix("https://")
			.or_else(|| site.strip_prefix("http://"))
			.unwrap_or(site);
		Some(site.strip_suffix('/').unwrap_or(site).to_string())
	}
}

fn non_empty(value: &str) -> Option<&str> {
	let value = value.trim();
	(!value.is_empty()).then_some(value)
}

/// Moderation state of a stored row.
///
/// Submissions are approved on arrival today; the other states exist so a
/// moderation path can be added without changing the column encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Approval {
	/// Not yet reviewed, or an unrecognised column value.
	#[default]
	Pending,
	/// Visible in the public directory.
	Approved,
	/// Hidden.
	Rejected,
}

impl Approval {
	/// Decodes the approval column. Only the exact literal `TRUE` approves.
	pub fn from_cell(cell: &str) -> Self {
		match cell {
			"TRUE" => Approval::Approved,
			"FALSE" => Approval::Rejected,
			_ => Approval::Pending,
		}
	}

	/// Encodes the approval column.
	pub fn as_cell(self) -> &'static str {
		match self {
			Approval::Approved => "TRUE",
			Approval::Rejected => "FALSE",
			Approval::Pending => "",
		}
	}
}

/// A required submission field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredField {
	/// Full name.
	Name,
	/// Major or program.
	Major,
	/// Class year.
	GradYear,
	/// Building description.
	Building,
}

impl fmt::Display for RequiredField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RequiredField::Name => "name",
			RequiredField::Major => "major",
			RequiredField::GradYear => "class year",
			RequiredField::Building => "building description",
		})
	}
}

/// A submission is missing one or more required fields.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{} required.", join_fields(.missing))]
pub struct ValidationError {
	/// Every blank required field, in form order.
	pub missing: Vec<RequiredField>,
}

fn join_fields(fields: &[RequiredField]) -> String {
	let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
	match names.as_slice() {
		[] => String::new(),
		[one] => format!("{one} is"),
		[rest @ .., last] => format!("{} and {last} are", rest.join(", ")),
	}
}

/// Raw form input for a new profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSubmission {
	/// Full name.
	pub name: String,
	/// Major or program.
	pub major: String,
	/// Class year.
	pub grad_year: String,
	/// Building description.
	pub building: String,
	/// Personal website.
	pub website: String,
	/// Avatar URL.
	pub photo_url: String,
	/// LinkedIn handle or URL.
	pub linkedin: String,
	/// GitHub username.
	pub github: String,
	/// Twitter / X handle.
	pub twitter: String,
}

impl ProfileSubmission {
	/// Trims every field and checks that the required ones are present.
	pub fn validate(&self) -> Result<Profile, ValidationError> {
		let required = [
			(RequiredField::Name, &self.name),
			(RequiredField::Major, &self.major),
			(RequiredField::GradYear, &self.grad_year),
			(RequiredField::Building, &self.building),
		];
		let missing: Vec<RequiredField> = required
			.into_iter()
			.filter(|(_, value)| value.trim().is_empty())
			.map(|(field, _)| field)
			.collect();
		if !missing.is_empty() {
			return Err(ValidationError { missing });
		}

		Ok(Profile {
			name: self.name.trim().to_string(),
			major: self.major.trim().to_string(),
			grad_year: self.grad_year.trim().to_string(),
			building: self.building.trim().to_string(),
			website: self.website.trim().to_string(),
			photo_url: self.photo_url.trim().to_string(),
			linkedin: self.linkedin.trim().to_string(),
			github: self.github.trim().to_string(),
			twitter: self.twitter.trim().to_string(),
		})
	}
}
