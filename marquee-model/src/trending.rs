use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{MovieId, TrendingEntryId};
use crate::movie::MovieSummary;
use crate::term::SearchTerm;

/// Persisted counter record keyed by normalized search term.
///
/// The representative movie is captured at the first hit and never
/// overwritten by later hits whose top result differs; the entry identity
/// is bound to the term, not the movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: TrendingEntryId,
    pub term: SearchTerm,
    /// Monotonically increasing hit count.
    pub count: u64,
    pub movie_id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrendingEntry {
    /// Creates the entry for a term's first recorded hit.
    pub fn first_hit(term: SearchTerm, representative: &MovieSummary) -> Result<Self> {
        if term.is_empty() {
            return Err(ModelError::EmptyTerm);
        }
        let now = Utc::now();
        Ok(TrendingEntry {
            id: TrendingEntryId::new(),
            term,
            count: 1,
            movie_id: representative.id,
            title: representative.title.clone(),
            poster_path: representative.poster_path.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies one repeat hit: bumps the count and freshens `updated_at`.
    pub fn record_repeat(&mut self) {
        self.count += 1;
        self.updated_at = Utc::now();
    }

    /// Trending list order: hit count descending, ties broken by the most
    /// recently updated entry first.
    pub fn rank_order(a: &TrendingEntry, b: &TrendingEntry) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    }
}

/// Latest view of the trending list, independent of the search slice.
///
/// `Ready` may carry an empty list, which is not a failure; `Unavailable`
/// means the counter store could not be reached or returned garbage.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendingState {
    Loading,
    Ready(Vec<TrendingEntry>),
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id: MovieId(id),
            title: title.to_string(),
            poster_path: Some(format!("/{title}.jpg")),
            popularity: 10.0,
            release_date: None,
            vote_average: None,
        }
    }

    fn entry(term: &str, count: u64, updated_offset_secs: i64) -> TrendingEntry {
        let mut entry =
            TrendingEntry::first_hit(SearchTerm::normalize(term), &movie(1, term)).unwrap();
        entry.count = count;
        entry.updated_at += TimeDelta::seconds(updated_offset_secs);
        entry
    }

    #[test]
    fn first_hit_rejects_empty_terms() {
        assert!(TrendingEntry::first_hit(SearchTerm::normalize("  "), &movie(1, "x")).is_err());
    }

    #[test]
    fn first_hit_starts_at_one_with_representative() {
        let entry =
            TrendingEntry::first_hit(SearchTerm::normalize("Batman"), &movie(268, "Batman"))
                .unwrap();
        assert_eq!(entry.count, 1);
        assert_eq!(entry.movie_id, MovieId(268));
        assert_eq!(entry.term.as_str(), "batman");
    }

    #[test]
    fn repeat_hits_bump_count_and_updated_at() {
        let mut entry =
            TrendingEntry::first_hit(SearchTerm::normalize("dune"), &movie(438631, "Dune"))
                .unwrap();
        let before = entry.updated_at;
        entry.record_repeat();
        entry.record_repeat();
        assert_eq!(entry.count, 3);
        assert!(entry.updated_at >= before);
    }

    #[test]
    fn rank_order_sorts_by_count_then_recency() {
        let mut entries = vec![
            entry("c", 3, 0),
            entry("a", 10, 0),
            entry("b-old", 7, 10),
            entry("b-new", 7, 20),
        ];
        entries.sort_by(TrendingEntry::rank_order);

        let terms: Vec<&str> = entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["a", "b-new", "b-old", "c"]);
        let counts: Vec<u64> = entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![10, 7, 7, 3]);
    }
}
