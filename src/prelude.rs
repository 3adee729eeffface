pub(crate) use {
    std::{
        cmp::Ordering,
        fmt,
        path::{
            Path,
            PathBuf,
        },
    },
    chrono::{
        TimeDelta,
        prelude::*,
    },
    chrono_tz::Tz,
    itertools::Itertools as _,
    rocket::{
        Request,
        State,
        http::Status,
        serde::json::Json,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    crate::{
        Environment,
        config::Config,
        countdown::NextMatch,
        season::{
            Fixture,
            MatchResult,
            Season,
            SeasonError,
        },
        standings::{
            Outcome,
            RecomputePolicy,
            StandingRow,
        },
        team::{
            NominatedTeam,
            Team,
            normalize,
        },
    },
};
