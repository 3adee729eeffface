use crate::prelude::*;

/// Time left until kickoff, in whole minutes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Countdown {
    pub(crate) days: i64,
    pub(crate) hours: i64,
    pub(crate) minutes: i64,
    pub(crate) is_expired: bool,
}

impl Countdown {
    pub(crate) fn until(target: DateTime<impl TimeZone>, now: DateTime<Utc>) -> Self {
        let remaining = target.with_timezone(&Utc) - now;
        if remaining <= TimeDelta::zero() {
            return Self { is_expired: true, ..Self::default() }
        }
        let total_minutes = remaining.num_minutes();
        Self {
            days: total_minutes / (60 * 24),
            hours: total_minutes % (60 * 24) / 60,
            minutes: total_minutes % 60,
            is_expired: false,
        }
    }
}

/// The next fixture together with the time left until it kicks off.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NextMatch {
    pub(crate) fixture: Fixture,
    pub(crate) countdown: Countdown,
}

impl NextMatch {
    pub(crate) fn for_season(season: &Season, now: DateTime<Utc>) -> Option<Self> {
        season.next_fixture(now).map(|fixture| Self {
            countdown: Countdown::until(fixture.kickoff, now),
            fixture: fixture.clone(),
        })
    }
}
