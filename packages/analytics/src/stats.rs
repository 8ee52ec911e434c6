//! Running tallies that build the global [`Stats`].

use std::collections::BTreeMap;

use arrest_map_arrest_models::{AVG_AGE_UNAVAILABLE, Gender, GenderCounts, NameCount, Stats};

/// Number of countries kept in [`Stats::top_countries`].
pub const TOP_COUNTRIES: usize = 20;

/// Number of gangs kept in [`Stats::top_gangs`].
pub const TOP_GANGS: usize = 15;

/// Occurrence counter that remembers first-seen order, so equal counts
/// keep that order after the stable descending sort.
#[derive(Debug, Default)]
pub struct Tally {
    index: BTreeMap<String, usize>,
    counts: Vec<NameCount>,
}

impl Tally {
    /// Counts one occurrence of `name`.
    pub fn add(&mut self, name: &str) {
        if let Some(&i) = self.index.get(name) {
            self.counts[i].count += 1;
        } else {
            self.index.insert(name.to_owned(), self.counts.len());
            self.counts.push(NameCount {
                name: name.to_owned(),
                count: 1,
            });
        }
    }

    /// Counts `name` unless it is blank.
    pub fn add_non_blank(&mut self, name: &str) {
        if !name.trim().is_empty() {
            self.add(name);
        }
    }

    /// Returns every entry sorted by count descending, ties in first-seen
    /// order.
    #[must_use]
    pub fn sorted(self) -> Vec<NameCount> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Returns every distinct name in lexicographic order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    /// Returns the `n` most frequent entries.
    #[must_use]
    pub fn top(self, n: usize) -> Vec<NameCount> {
        let mut counts = self.sorted();
        counts.truncate(n);
        counts
    }
}

/// Accumulates statistics one record at a time.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    total: u64,
    genders: GenderCounts,
    age_sum: f64,
    age_count: u64,
    countries: Tally,
    gangs: Tally,
    races: Tally,
    categories: Tally,
}

/// The per-record fields that feed [`StatsAccumulator`].
#[derive(Debug, Clone, Copy)]
pub struct StatsInput<'a> {
    /// Gender label; only exact recognized labels are counted.
    pub gender: &'a str,
    /// Parsed age, if any.
    pub age: Option<f64>,
    /// Country of citizenship.
    pub country: &'a str,
    /// Gang affiliation; blank values are not counted.
    pub gang: &'a str,
    /// Race label; blank values are not counted.
    pub race: &'a str,
    /// Parsed categories.
    pub categories: &'a [String],
}

impl StatsAccumulator {
    /// Folds one record into the running totals.
    pub fn record(&mut self, input: &StatsInput<'_>) {
        self.total += 1;

        if let Ok(gender) = input.gender.parse::<Gender>() {
            self.genders.record(gender);
        }

        if let Some(age) = input.age.filter(|a| a.is_finite()) {
            self.age_sum += age;
            self.age_count += 1;
        }

        self.countries.add(input.country);
        self.gangs.add_non_blank(input.gang);
        self.races.add_non_blank(input.race);

        for category in input.categories {
            self.categories.add(category);
        }
    }

    /// Produces the final statistics and the lexicographically sorted list
    /// of distinct categories.
    #[must_use]
    pub fn finish(self) -> (Stats, Vec<String>) {
        #[allow(clippy::cast_precision_loss)]
        let avg_age = if self.age_count == 0 {
            AVG_AGE_UNAVAILABLE.to_owned()
        } else {
            format!("{:.1}", self.age_sum / self.age_count as f64)
        };

        let distinct_categories = self.categories.names();

        let stats = Stats {
            total: self.total,
            genders: self.genders,
            avg_age,
            top_countries: self.countries.top(TOP_COUNTRIES),
            top_gangs: self.gangs.top(TOP_GANGS),
            category_counts: self.categories.sorted(),
            race_distribution: self.races.sorted(),
        };

        (stats, distinct_categories)
    }
}
