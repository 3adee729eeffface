//! Season data: the manually authored standings baseline plus the fixtures and results entered over the season.

use crate::prelude::*;

static BUILTIN: &str = include_str!("../assets/season.json");

#[derive(Debug, thiserror::Error)]
pub(crate) enum SeasonError {
    #[error(transparent)] Io(#[from] std::io::Error),
    #[error(transparent)] Json(#[from] serde_json::Error),
    #[error("fixture ID {0:?} is used more than once")]
    DuplicateFixtureId(String),
    #[error("result ID {0:?} is used more than once")]
    DuplicateResultId(String),
    #[error("{id}: {team} is listed as both home and away team")]
    SelfMatch {
        id: String,
        team: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Score {
    pub(crate) home: u16,
    pub(crate) away: u16,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// A scheduled match which has not been played yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Fixture {
    pub(crate) id: String,
    pub(crate) kickoff: DateTime<FixedOffset>,
    pub(crate) home_team: Team,
    pub(crate) away_team: Team,
}

impl Fixture {
    /// The same fixture with its kickoff expressed in the local time of `tz`.
    pub(crate) fn in_timezone(self, tz: Tz) -> Self {
        Self {
            kickoff: self.kickoff.with_timezone(&tz).fixed_offset(),
            ..self
        }
    }
}

/// A completed match with its final score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchResult {
    pub(crate) id: String,
    pub(crate) date: NaiveDate,
    pub(crate) home_team: Team,
    pub(crate) away_team: Team,
    pub(crate) score: Score,
    /// Only consulted by [`RecomputePolicy::Incremental`].
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) counted: bool,
}

impl MatchResult {
    /// The outcome from the nominated team's point of view, or `None` if it didn't play in this match.
    ///
    /// If both sides match the nominated team the home side wins out.
    pub(crate) fn outcome_for(&self, nominated: &NominatedTeam) -> Option<Outcome> {
        let (my_goals, opp_goals) = if nominated.is_team(&self.home_team) {
            (self.score.home, self.score.away)
        } else if nominated.is_team(&self.away_team) {
            (self.score.away, self.score.home)
        } else {
            return None
        };
        Some(match my_goals.cmp(&opp_goals) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::Loss,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Season {
    /// Display label of the league, e.g. "5e klasse - 1".
    pub(crate) competition: String,
    #[serde(default)]
    pub(crate) footnote: Option<String>,
    #[serde(default)]
    pub(crate) fixtures: Vec<Fixture>,
    #[serde(default)]
    pub(crate) results: Vec<MatchResult>,
    #[serde(default)]
    pub(crate) standings: Vec<StandingRow>,
}

impl Season {
    pub(crate) fn from_json(json: &str) -> Result<Self, SeasonError> {
        let season = serde_json::from_str::<Self>(json)?;
        season.validate()?;
        Ok(season)
    }

    pub(crate) async fn load(path: impl AsRef<Path>) -> Result<Self, SeasonError> {
        let path = path.as_ref();
        log::info!("loading season data from {}", path.display());
        Self::from_json(&tokio::fs::read_to_string(path).await?)
    }

    /// The season shipped with the binary.
    pub(crate) fn builtin() -> Result<Self, SeasonError> {
        Self::from_json(BUILTIN)
    }

    /// Checks the invariants the standings logic relies on but the JSON format can't express.
    pub(crate) fn validate(&self) -> Result<(), SeasonError> {
        if let Some(id) = self.fixtures.iter().map(|fixture| &fixture.id).duplicates().next() {
            return Err(SeasonError::DuplicateFixtureId(id.clone()))
        }
        if let Some(id) = self.results.iter().map(|result| &result.id).duplicates().next() {
            return Err(SeasonError::DuplicateResultId(id.clone()))
        }
        let pairings = self.fixtures.iter().map(|fixture| (&fixture.id, &fixture.home_team, &fixture.away_team))
            .chain(self.results.iter().map(|result| (&result.id, &result.home_team, &result.away_team)));
        for (id, home, away) in pairings {
            if normalize(&home.name) == normalize(&away.name) {
                return Err(SeasonError::SelfMatch { id: id.clone(), team: home.name.clone() })
            }
        }
        Ok(())
    }

    pub(crate) fn all_fixtures_sorted(&self) -> Vec<Fixture> {
        self.fixtures.iter()
            .sorted_by_key(|fixture| fixture.kickoff)
            .cloned()
            .collect()
    }

    /// Fixtures kicking off after `now`, earliest first.
    pub(crate) fn upcoming_fixtures(&self, now: DateTime<Utc>) -> Vec<Fixture> {
        self.fixtures.iter()
            .filter(|fixture| fixture.kickoff > now)
            .sorted_by_key(|fixture| fixture.kickoff)
            .cloned()
            .collect()
    }

    pub(crate) fn next_fixture(&self, now: DateTime<Utc>) -> Option<&Fixture> {
        self.fixtures.iter()
            .filter(|fixture| fixture.kickoff > now)
            .min_by_key(|fixture| fixture.kickoff)
    }

    pub(crate) fn results_newest_first(&self) -> Vec<MatchResult> {
        self.results.iter()
            .sorted_by(|result1, result2| result2.date.cmp(&result1.date).then_with(|| result1.id.cmp(&result2.id)))
            .cloned()
            .collect()
    }

    pub(crate) fn last_result(&self) -> Option<&MatchResult> {
        self.results.iter().max_by(|result1, result2| result1.date.cmp(&result2.date).then_with(|| result2.id.cmp(&result1.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, date: &str, home: &str, away: &str, score: (u16, u16)) -> MatchResult {
        MatchResult {
            id: id.to_owned(),
            date: date.parse().expect("test date"),
            home_team: Team::new(home, "/static/home-logo.svg"),
            away_team: Team::new(away, "/static/away-logo.svg"),
            score: Score { home: score.0, away: score.1 },
            counted: false,
        }
    }

    fn fixture(id: &str, kickoff: &str, home: &str, away: &str) -> Fixture {
        Fixture {
            id: id.to_owned(),
            kickoff: DateTime::parse_from_rfc3339(kickoff).expect("test kickoff"),
            home_team: Team::new(home, "/static/home-logo.svg"),
            away_team: Team::new(away, "/static/away-logo.svg"),
        }
    }

    fn season() -> Season {
        Season {
            competition: format!("5e klasse - 1"),
            footnote: None,
            fixtures: vec![
                fixture("w2", "2026-01-25T13:00:00+01:00", "ST UOW'02 VR2", "Daalhof VR1"),
                fixture("w1", "2026-01-18T10:00:00+01:00", "Daalhof VR1", "Groene Ster VR1"),
                fixture("w3", "2026-02-01T10:00:00+01:00", "Daalhof VR1", "BSV Limburgia/Kamerland VR1"),
            ],
            results: vec![
                result("r1", "2025-09-28", "Daalhof VR1", "RKHSV", (1, 1)),
                result("r3", "2025-10-12", "Daalhof VR1", "RKHSB", (2, 0)),
                result("r2", "2025-10-05", "GSV'28", "Daalhof VR1", (2, 0)),
            ],
            standings: Vec::default(),
        }
    }

    #[test]
    fn builtin_season_is_valid() {
        let season = Season::builtin().expect("embedded season should parse and validate");
        assert!(!season.standings.is_empty());
        assert!(!season.results.is_empty());
        assert!(!season.fixtures.is_empty());
    }

    #[test]
    fn kickoff_in_local_time() {
        let winter = fixture("w1", "2026-01-18T09:00:00Z", "Daalhof VR1", "Groene Ster VR1");
        let local = winter.clone().in_timezone(chrono_tz::Europe::Amsterdam);
        assert_eq!(local.kickoff, winter.kickoff);
        assert_eq!(local.kickoff.offset().local_minus_utc(), 3600);
        assert_eq!(local.kickoff.to_rfc3339(), "2026-01-18T10:00:00+01:00");
        let summer = fixture("w9", "2026-04-12T08:30:00Z", "Daalhof VR1", "RKHSV VR1");
        assert_eq!(summer.in_timezone(chrono_tz::Europe::Amsterdam).kickoff.to_rfc3339(), "2026-04-12T10:30:00+02:00");
    }

    #[test]
    fn outcome_from_either_side() {
        let club = NominatedTeam::default();
        assert_eq!(result("a", "2025-09-28", "Daalhof VR1", "RKHSV", (1, 1)).outcome_for(&club), Some(Outcome::Draw));
        assert_eq!(result("b", "2025-12-14", "VV Iets", "Daalhof VR1", (3, 4)).outcome_for(&club), Some(Outcome::Win));
        assert_eq!(result("c", "2025-12-21", "Daalhof VR1", "Leonidas - W", (0, 1)).outcome_for(&club), Some(Outcome::Loss));
        assert_eq!(result("d", "2025-12-21", "RKVV", "Schimmert", (5, 0)).outcome_for(&club), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut season = season();
        season.fixtures.push(fixture("w1", "2026-04-06T13:00:00+01:00", "Daalhof VR1", "Weltania VR1"));
        assert!(matches!(season.validate(), Err(SeasonError::DuplicateFixtureId(id)) if id == "w1"));
        let mut season = self::season();
        season.results.push(result("r2", "2025-12-07", "RKVV", "Daalhof VR1", (2, 0)));
        assert!(matches!(season.validate(), Err(SeasonError::DuplicateResultId(id)) if id == "r2"));
    }

    #[test]
    fn fixture_and_result_ids_live_in_separate_namespaces() {
        let mut season = season();
        season.results.push(result("w1", "2025-12-07", "RKVV", "Daalhof VR1", (2, 0)));
        assert!(season.validate().is_ok());
    }

    #[test]
    fn self_matches_are_rejected() {
        let mut season = season();
        season.results.push(result("r9", "2025-12-07", "Daalhof VR1", "Daalhof VR 1", (2, 0)));
        assert!(matches!(season.validate(), Err(SeasonError::SelfMatch { id, .. }) if id == "r9"));
    }

    #[test]
    fn negative_scores_fail_to_parse() {
        let json = r#"{
            "competition": "test",
            "results": [{
                "id": "r1",
                "date": "2025-09-28",
                "homeTeam": { "name": "Daalhof VR1", "logo": "/home-logo.png" },
                "awayTeam": { "name": "RKHSV", "logo": "/away-logo.png" },
                "score": { "home": -1, "away": 1 }
            }]
        }"#;
        assert!(matches!(Season::from_json(json), Err(SeasonError::Json(_))));
    }

    #[test]
    fn upcoming_fixtures_are_sorted_and_filtered() {
        let season = season();
        let now = Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).single().expect("valid date");
        let ids = season.upcoming_fixtures(now).into_iter().map(|fixture| fixture.id).collect_vec();
        assert_eq!(ids, ["w2", "w3"]);
        assert_eq!(season.next_fixture(now).map(|fixture| &*fixture.id), Some("w2"));
        let ids = season.all_fixtures_sorted().into_iter().map(|fixture| fixture.id).collect_vec();
        assert_eq!(ids, ["w1", "w2", "w3"]);
        let later = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).single().expect("valid date");
        assert!(season.upcoming_fixtures(later).is_empty());
        assert!(season.next_fixture(later).is_none());
    }

    #[test]
    fn kickoff_exactly_now_is_not_upcoming() {
        let season = season();
        let now = DateTime::parse_from_rfc3339("2026-01-18T10:00:00+01:00").expect("valid date").with_timezone(&Utc);
        assert_eq!(season.next_fixture(now).map(|fixture| &*fixture.id), Some("w2"));
    }

    #[test]
    fn results_newest_first() {
        let season = season();
        let ids = season.results_newest_first().into_iter().map(|result| result.id).collect_vec();
        assert_eq!(ids, ["r3", "r2", "r1"]);
        assert_eq!(season.last_result().map(|result| &*result.id), Some("r3"));
        assert!(Season { results: Vec::default(), ..season }.last_result().is_none());
    }
}
