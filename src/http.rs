use {
    rocket::{
        Build,
        Rocket,
        fs::{
            FileServer,
            Options,
        },
        response::content::RawText,
    },
    crate::prelude::*,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error(transparent)] Config(#[from] crate::config::Error),
    #[error(transparent)] Season(#[from] SeasonError),
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = Status::InternalServerError;
        log::error!("responded with {status} to request to {}", request.uri());
        log::error!("display: {self}");
        log::error!("debug: {self:?}");
        Err(status)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// Everything the front page and its subpages show, in one response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Home {
    competition: String,
    footnote: Option<String>,
    fixtures: Vec<Fixture>,
    last_result: Option<MatchResult>,
    next_match: Option<NextMatch>,
    results: Vec<MatchResult>,
    standings: Vec<StandingRow>,
}

impl Home {
    /// Kickoff times are given in the local time of `tz`.
    pub(crate) fn new(season: Season, config: &Config, tz: Tz, now: DateTime<Utc>) -> Self {
        Self {
            fixtures: season.upcoming_fixtures(now).into_iter().map(|fixture| fixture.in_timezone(tz)).collect(),
            last_result: season.last_result().cloned(),
            next_match: NextMatch::for_season(&season, now).map(|NextMatch { fixture, countdown }| NextMatch {
                fixture: fixture.in_timezone(tz),
                countdown,
            }),
            results: season.results_newest_first(),
            standings: crate::standings::compute(&season, &config.club, config.recompute),
            competition: season.competition,
            footnote: season.footnote,
        }
    }
}

// The season is reloaded on every request so results entered into the season file show up without a restart.

#[rocket::get("/api/home")]
async fn home(config: &State<Config>) -> Result<Json<Home>, ApiError> {
    let tz = config.tz()?;
    let season = config.season().await?;
    Ok(Json(Home::new(season, config, tz, Utc::now())))
}

#[rocket::get("/api/standings?<window>")]
async fn standings(config: &State<Config>, window: Option<bool>) -> Result<Json<Vec<StandingRow>>, ApiError> {
    let season = config.season().await?;
    let table = crate::standings::compute(&season, &config.club, config.recompute);
    Ok(Json(if window.unwrap_or_default() {
        crate::standings::window(&table, &config.club)
    } else {
        table
    }))
}

#[rocket::get("/api/fixtures?<all>")]
async fn fixtures(config: &State<Config>, all: Option<bool>) -> Result<Json<Vec<Fixture>>, ApiError> {
    let tz = config.tz()?;
    let season = config.season().await?;
    let fixtures = if all.unwrap_or_default() {
        season.all_fixtures_sorted()
    } else {
        season.upcoming_fixtures(Utc::now())
    };
    Ok(Json(fixtures.into_iter().map(|fixture| fixture.in_timezone(tz)).collect()))
}

#[rocket::get("/api/results")]
async fn results(config: &State<Config>) -> Result<Json<Vec<MatchResult>>, ApiError> {
    let season = config.season().await?;
    Ok(Json(season.results_newest_first()))
}

#[rocket::get("/robots.txt")]
async fn robots_txt() -> RawText<&'static str> {
    RawText("User-agent: *\nDisallow: /api/\nDisallow: /static/\n")
}

#[rocket::catch(404)]
async fn not_found() -> Json<ErrorBody> {
    Json(ErrorBody { error: format!("not found") })
}

#[rocket::catch(default)]
async fn fallback_catcher(status: Status, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    log::warn!("responding with HTTP status code {} {} to request {request:?}", status.code, status.reason_lossy());
    (status, Json(ErrorBody { error: status.reason_lossy().to_lowercase() }))
}

pub(crate) fn rocket(config: Config, port: u16) -> Rocket<Build> {
    rocket::custom(rocket::Config::figment().merge(rocket::Config {
        log_level: rocket::config::LogLevel::Critical,
        ..rocket::Config::default()
    }).merge(("port", port)))
    .mount("/", rocket::routes![
        home,
        standings,
        fixtures,
        results,
        robots_txt,
    ])
    .mount("/static", FileServer::new("assets/static", Options::Missing))
    .register("/", rocket::catchers![
        not_found,
        fallback_catcher,
    ])
    .manage(config)
}
