//! Search and quick filters over the in-memory profile list.
//!
//! Everything here is a pure function of its inputs and is recomputed whenever
//! the list or a filter changes.

use std::collections::{BTreeSet, HashMap};

use crate::profile::Profile;

/// Three independent predicates, combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
	/// Free text, matched case-insensitively against name, major, class year
	/// and building. Blank matches everything.
	pub query: String,
	/// Exact class year, `None` when not filtering.
	pub year: Option<String>,
	/// Exact major, `None` when not filtering.
	pub major: Option<String>,
}

impl DirectoryFilter {
	/// Whether any predicate is narrowing the list.
	pub fn is_active(&self) -> bool {
		!self.query.trim().is_empty() || self.year.is_some() || self.major.is_some()
	}

	/// Whether `profile` passes every active predicate.
	pub fn matches(&self, profile: &Profile) -> bool {
		self.matches_query(profile)
			&& exact(self.year.as_deref(), &profile.grad_year)
			&& exact(self.major.as_deref(), &profile.major)
	}

	fn matches_query(&self, profile: &Profile) -> bool {
		let q = self.query.trim().to_lowercase();
		if q.is_empty() {
			return true;
		}
		[
			&profile.name,
			&profile.major,
			&profile.grad_year,
			&profile.building,
		]
		.iter()
		.any(|field| field.to_lowercase().contains(&q))
	}

	/// The matching profiles, in input order.
	pub fn apply(&self, profiles: &[Profile]) -> Vec<Profile> {
		profiles.iter().filter(|p| self.matches(p)).cloned().collect()
	}
}

fn exact(selected: Option<&str>, value: &str) -> bool {
	selected.is_none_or(|s| s.trim() == value.trim())
}

/// Count line shown above the results.
pub fn summary_label(count: usize) -> String {
	if count == 1 {
		"1 builder".to_string()
	} else {
		format!("{count} builders")
	}
}

/// Distinct non-blank class years, sorted.
pub fn year_options(profiles: &[Profile]) -> Vec<String> {
	profiles
		.iter()
		.map(|p| p.grad_year.trim())
		.filter(|y| !y.is_empty())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_string)
		.collect()
}

/// Distinct non-blank majors, most common first. Ties keep first-seen order.
pub fn major_options(profiles: &[Profile]) -> Vec<String> {
	let mut counts: HashMap<&str, usize> = HashMap::new();
	let mut order: Vec<&str> = Vec::new();
	for major in profiles.iter().map(|p| p.major.trim()) {
		if major.is_empty() {
			continue;
		}
		let count = counts.entry(major).or_insert(0);
		if *count == 0 {
			order.push(major);
		}
		*count += 1;
	}
	// stable sort keeps first-seen order among equal counts
	order.sort_by(|a, b| counts[b].cmp(&counts[a]));
	order.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile(name: &str, major: &str, year: &str, building: &str) -> Profile {
		Profile {
			name: name.into(),
			major: major.into(),
			grad_year: year.into(),
			building: building.into(),
			..Default::default()
		}
	}

	fn sample() -> Vec<Profile> {
		vec![
			profile("Ada Lovelace", "Mathematics", "2026", "an analytical engine"),
			profile("Grace Hopper", "Computer Science", "2027", "a compiler"),
			profile("Alan Turing", "Computer Science", "2026", "a decision procedure"),
			profile("Linus", "cs", " 2028 ", "a kernel in Rust"),
		]
	}

	fn names(profiles: &[Profile]) -> Vec<&str> {
		profiles.iter().map(|p| p.name.as_str()).collect()
	}

	#[test]
	fn empty_filter_matches_everything() {
		let all = sample();
		let filter = DirectoryFilter::default();
		assert!(!filter.is_active());
		assert_eq!(filter.apply(&all), all);
	}

	#[test]
	fn query_is_trimmed_and_case_insensitive() {
		let filter = DirectoryFilter {
			query: "  RUST ".into(),
			..Default::default()
		};
		assert_eq!(names(&filter.apply(&sample())), vec!["Linus"]);

		let filter = DirectoryFilter {
			query: "2026".into(),
			..Default::default()
		};
		assert_eq!(
			names(&filter.apply(&sample())),
			vec!["Ada Lovelace", "Alan Turing"]
		);
	}

	#[test]
	fn year_and_major_compare_trimmed_values() {
		let filter = DirectoryFilter {
			year: Some("2028".into()),
			..Default::default()
		};
		assert_eq!(names(&filter.apply(&sample())), vec!["Linus"]);

		let filter = DirectoryFilter {
			major: Some("computer science".into()),
			..Default::default()
		};
		assert!(filter.apply(&sample()).is_empty());
	}

	#[test]
	fn predicates_compose_as_conjunction() {
		let all = sample();
		let combined = DirectoryFilter {
			query: "a".into(),
			year: Some("2026".into()),
			major: Some("Computer Science".into()),
		};
		assert_eq!(names(&combined.apply(&all)), vec!["Alan Turing"]);

		let by_query = DirectoryFilter {
			query: "a".into(),
			..Default::default()
		};
		let by_year = DirectoryFilter {
			year: Some("2026".into()),
			..Default::default()
		};
		let by_major = DirectoryFilter {
			major: Some("Computer Science".into()),
			..Default::default()
		};

		let forward = by_major.apply(&by_year.apply(&by_query.apply(&all)));
		let backward = by_query.apply(&by_year.apply(&by_major.apply(&all)));
		assert_eq!(forward, combined.apply(&all));
		assert_eq!(backward, combined.apply(&all));
	}

	#[test]
	fn year_options_skip_blanks_and_duplicates() {
		let mut all = sample();
		all.push(profile("Blank", "Art", "   ", "x"));
		all.push(profile("Empty", "", "", "x"));
		assert_eq!(year_options(&all), vec!["2026", "2027", "2028"]);
	}

	#[test]
	fn majors_are_ordered_by_frequency() {
		let all = vec![
			profile("a", "cs", "", ""),
			profile("b", "cs", "", ""),
			profile("c", "math", "", ""),
		];
		assert_eq!(major_options(&all), vec!["cs", "math"]);
	}

	#[test]
	fn major_ties_keep_first_seen_order() {
		let all = vec![
			profile("a", "physics", "", ""),
			profile("b", "art", "", ""),
			profile("c", " ", "", ""),
			profile("d", "art", "", ""),
			profile("e", "physics", "", ""),
			profile("f", "history", "", ""),
		];
		assert_eq!(major_options(&all), vec!["physics", "art", "history"]);
	}

	#[test]
	fn summary_label_pluralises() {
		assert_eq!(summary_label(0), "0 builders");
		assert_eq!(summary_label(1), "1 builder");
		assert_eq!(summary_label(12), "12 builders");
	}
}
