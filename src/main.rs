use {
    rocket::Rocket,
    crate::prelude::*,
};

mod config;
mod countdown;
mod http;
mod prelude;
mod season;
mod standings;
mod team;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

#[allow(unused)] // variants only constructed under conditional compilation
#[derive(Default, Clone, Copy)]
enum Environment {
    #[cfg_attr(any(feature = "production", not(any(feature = "dev", debug_assertions))), default)]
    Production,
    #[cfg_attr(all(any(feature = "dev", debug_assertions), not(feature = "production")), default)]
    Dev,
}

impl Environment {
    fn is_dev(&self) -> bool {
        match self {
            Self::Production => false,
            Self::Dev => true,
        }
    }

    fn default_port(&self) -> u16 {
        if self.is_dev() { 24816 } else { 24815 }
    }
}

fn parse_port(arg: &str) -> Result<u16, std::num::ParseIntError> {
    match arg {
        "production" => Ok(Environment::Production.default_port()),
        "dev" => Ok(Environment::Dev.default_port()),
        _ => arg.parse(),
    }
}

#[derive(clap::Subcommand)]
enum Subcommand {
    /// Validate a season file and print the resulting standings
    Check {
        /// Defaults to the season from the config file, or the embedded season
        season: Option<PathBuf>,
    },
}

#[derive(clap::Parser)]
#[clap(version = CLAP_VERSION)]
struct Args {
    #[clap(long, value_parser = parse_port)]
    port: Option<u16>,
    #[clap(subcommand)]
    subcommand: Option<Subcommand>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)] Config(#[from] config::Error),
    #[error(transparent)] Rocket(#[from] rocket::Error),
    #[error(transparent)] Season(#[from] SeasonError),
}

fn print_table(heading: &str, rows: &[StandingRow], club: &NominatedTeam) {
    println!("{heading}");
    for row in rows {
        let marker = if club.is_team(&row.team) { '*' } else { ' ' };
        println!("{marker}{:>3}  {:<28}{:>3}{:>4}", row.rank, row.team.name, row.played, row.points);
    }
}

fn check(season: &Season, config: &Config) -> Result<(), Error> {
    let tz = config.tz()?;
    let table = standings::compute(season, &config.club, config.recompute);
    println!("{}: {} fixtures, {} results, {} teams", season.competition, season.fixtures.len(), season.results.len(), season.standings.len());
    if !table.iter().any(|row| config.club.is_team(&row.team)) {
        log::warn!("{} does not appear in the standings", config.club.display_name());
    }
    print_table("Stand", &table, &config.club);
    print_table("Window", &standings::window(&table, &config.club), &config.club);
    if let Some(footnote) = &season.footnote {
        println!("{footnote}");
    }
    let now = Utc::now();
    if let Some(NextMatch { fixture, countdown }) = NextMatch::for_season(season, now) {
        println!(
            "next match: {} – {}, {} ({}d {}h {}m)",
            fixture.home_team, fixture.away_team,
            fixture.kickoff.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            countdown.days, countdown.hours, countdown.minutes,
        );
    } else {
        println!("no upcoming fixtures");
    }
    if let Some(result) = season.last_result() {
        println!("last result: {} {} {} ({})", result.home_team, result.score, result.away_team, result.date);
    }
    Ok(())
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let Args { port, subcommand } = clap::Parser::parse();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let mut config = Config::load().await?;
    match subcommand {
        Some(Subcommand::Check { season }) => {
            if season.is_some() {
                config.season = season;
            }
            let season = config.season().await?;
            check(&season, &config)?;
        }
        None => {
            let default_panic_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                log::error!("Thread panic: {:?}", info);
                default_panic_hook(info)
            }));
            // fail early on a broken season file; it's reloaded on every request after this
            let season = config.season().await?;
            log::info!(
                "{}: {} fixtures, {} results, {} teams, recomputing {} ({:?})",
                season.competition, season.fixtures.len(), season.results.len(), season.standings.len(),
                config.club.display_name(), config.recompute,
            );
            let port = port.unwrap_or_else(|| Environment::default().default_port());
            let Rocket { .. } = http::rocket(config, port).launch().await?;
        }
    }
    Ok(())
}
