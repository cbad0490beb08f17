use std::collections::BTreeMap;

use crate::matcher::record::{PlayerRecord, SeasonLine, Seasons};

/// Test utilities for building player records concisely
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: PlayerRecord,
    seasons: Option<BTreeMap<String, SeasonLine>>,
}

impl RecordBuilder {
    /// Starts a record with the given names and nothing else
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            record: PlayerRecord::new(first_name, last_name),
            seasons: None,
        }
    }

    pub fn birth_year(mut self, year: i32) -> Self {
        self.record.birth_year = Some(year);
        self
    }

    /// Sets both ends of the career span, e.g. `career("1979-80", "1991-92")`
    pub fn career(mut self, first_season: &str, last_season: &str) -> Self {
        self.record.first_season = Some(first_season.to_string());
        self.record.last_season = Some(last_season.to_string());
        self
    }

    pub fn source(mut self, source: &str, source_id: &str) -> Self {
        self.record.source = Some(source.to_string());
        self.record.source_id = Some(source_id.to_string());
        self
    }

    /// Adds a season with a points-per-game value
    pub fn season_ppg(mut self, season: &str, ppg: f64) -> Self {
        self.seasons
            .get_or_insert_with(BTreeMap::new)
            .insert(season.to_string(), SeasonLine::with_ppg(ppg));
        self
    }

    /// Adds a season that carries no points-per-game value
    pub fn season_without_ppg(mut self, season: &str) -> Self {
        self.seasons
            .get_or_insert_with(BTreeMap::new)
            .insert(season.to_string(), SeasonLine::default());
        self
    }

    /// Fills one season per year of the span with the same scoring average
    pub fn steady_scorer(mut self, first_year: i32, last_year: i32, ppg: f64) -> Self {
        for year in first_year..=last_year {
            self = self.season_ppg(&season_key(year), ppg);
        }
        self
    }

    pub fn build(self) -> PlayerRecord {
        let mut record = self.record;
        if let Some(seasons) = self.seasons {
            record.seasons = Some(Seasons::from(seasons));
        }
        record
    }
}

/// Season key in `"YYYY-YY"` form for the season starting in `year`
///
/// # Example
/// ```
/// use player_dedup::testing_utils::season_key;
///
/// assert_eq!(season_key(1999), "1999-00");
/// assert_eq!(season_key(1985), "1985-86");
/// ```
pub fn season_key(year: i32) -> String {
    format!("{year}-{:02}", (year + 1).rem_euclid(100))
}
