//! League table maintenance for the nominated team.
//!
//! The baseline table is authored by hand. Only the nominated team's row is derived from match results;
//! every other row passes through unchanged. Everything here is a pure function over the inputs.

use crate::prelude::*;

/// Number of rows shown in the compact standings view.
pub(crate) const WINDOW_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StandingRow {
    pub(crate) rank: u32,
    pub(crate) team: Team,
    pub(crate) played: u32,
    pub(crate) points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub(crate) fn points(&self) -> u32 {
        match self {
            Self::Win => 3,
            Self::Draw => 1,
            Self::Loss => 0,
        }
    }
}

/// How the nominated team's row is derived from the list of results.
///
/// The two policies must not be mixed on the same baseline: replaying the results under
/// `Incremental` counts every flagged match again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum RecomputePolicy {
    /// Count every result involving the team, starting from zero. Idempotent.
    #[default]
    Full,
    /// Add only results flagged as `counted` on top of the baseline row.
    Incremental,
}

/// Rewrites the nominated team's `played` and `points` from `results`.
///
/// Returns a copy of `table` in which only the first row matching `nominated` has changed.
/// Ranks are left alone, see [`rank`].
pub(crate) fn recompute(table: &[StandingRow], results: &[MatchResult], nominated: &NominatedTeam, policy: RecomputePolicy) -> Vec<StandingRow> {
    let mut table = table.to_vec();
    let Some(row) = table.iter_mut().find(|row| nominated.is_team(&row.team)) else {
        log::debug!("{} not in standings, leaving table as is", nominated.display_name());
        return table
    };
    let (mut played, mut points) = match policy {
        RecomputePolicy::Full => (0, 0),
        RecomputePolicy::Incremental => (row.played, row.points),
    };
    for result in results {
        if let RecomputePolicy::Incremental = policy {
            if !result.counted { continue }
        }
        let Some(outcome) = result.outcome_for(nominated) else { continue };
        played += 1;
        points += outcome.points();
    }
    log::debug!("recomputed {}: played {} → {played}, points {} → {points}", row.team, row.played, row.points);
    row.played = played;
    row.points = points;
    table
}

/// Sorts by points descending, then games played ascending, then name ascending (ignoring case),
/// and renumbers ranks from 1.
pub(crate) fn rank(table: &[StandingRow]) -> Vec<StandingRow> {
    table.iter()
        .sorted_by(|row1, row2| {
            row2.points.cmp(&row1.points)
                .then_with(|| row1.played.cmp(&row2.played))
                .then_with(|| row1.team.name.to_lowercase().cmp(&row2.team.name.to_lowercase()))
        })
        .cloned()
        .zip(1..)
        .map(|(row, rank)| StandingRow { rank, ..row })
        .collect()
}

/// Selects up to [`WINDOW_SIZE`] consecutive rows centered on the nominated team.
///
/// Near either end of the table the window is shifted inwards rather than shrunk. If the team isn't in the
/// table, the top of the table is returned instead. Rows are copied as is, including their ranks.
pub(crate) fn window(table: &[StandingRow], nominated: &NominatedTeam) -> Vec<StandingRow> {
    let len = WINDOW_SIZE.min(table.len());
    let start = match table.iter().position(|row| nominated.is_team(&row.team)) {
        Some(idx) => idx.saturating_sub(WINDOW_SIZE / 2).min(table.len() - len),
        None => 0,
    };
    table[start..start + len].to_vec()
}

/// The full table for a season after recomputing and ranking.
pub(crate) fn compute(season: &Season, nominated: &NominatedTeam, policy: RecomputePolicy) -> Vec<StandingRow> {
    rank(&recompute(&season.standings, &season.results, nominated, policy))
}
