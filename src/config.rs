use crate::prelude::*;
#[cfg(unix)] use xdg::BaseDirectories;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)] Io(#[from] std::io::Error),
    #[error(transparent)] Json(#[from] serde_json::Error),
    #[error("unknown timezone {0:?}")]
    Timezone(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) club: NominatedTeam,
    #[serde(default)]
    pub(crate) recompute: RecomputePolicy,
    /// Season data file. The season embedded in the binary is used if this is absent.
    #[serde(default)]
    pub(crate) season: Option<PathBuf>,
    #[serde(default = "default_timezone")]
    pub(crate) timezone: String,
}

fn default_timezone() -> String {
    format!("Europe/Amsterdam")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            club: NominatedTeam::default(),
            recompute: RecomputePolicy::default(),
            season: None,
            timezone: default_timezone(),
        }
    }
}

impl Config {
    fn file_name() -> &'static str {
        if Environment::default().is_dev() { "clubhouse-dev.json" } else { "clubhouse.json" }
    }

    fn path() -> Option<PathBuf> {
        #[cfg(unix)] {
            BaseDirectories::new().find_config_file(Self::file_name())
        }
        #[cfg(windows)] {
            let path = Path::new("cfg").join(Self::file_name());
            path.exists().then_some(path)
        }
    }

    /// Reads the config file, or falls back to the defaults if there is none.
    pub(crate) async fn load() -> Result<Self, Error> {
        if let Some(path) = Self::path() {
            log::info!("loading config from {}", path.display());
            Self::from_json(&tokio::fs::read_to_string(path).await?)
        } else {
            log::info!("no {} found, using default config", Self::file_name());
            Ok(Self::default())
        }
    }

    pub(crate) fn from_json(json: &str) -> Result<Self, Error> {
        let config = serde_json::from_str::<Self>(json)?;
        config.tz()?;
        Ok(config)
    }

    pub(crate) fn tz(&self) -> Result<Tz, Error> {
        self.timezone.parse().map_err(|_| Error::Timezone(self.timezone.clone()))
    }

    pub(crate) async fn season(&self) -> Result<Season, SeasonError> {
        if let Some(ref path) = self.season {
            Season::load(path).await
        } else {
            Season::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::team::MatchPolicy,
        super::*,
    };

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_json("{}").expect("valid config");
        assert_eq!(config.club, NominatedTeam::default());
        assert_eq!(config.recompute, RecomputePolicy::Full);
        assert!(config.season.is_none());
        assert_eq!(config.tz().expect("valid timezone"), chrono_tz::Europe::Amsterdam);
    }

    #[test]
    fn full_config() {
        let config = Config::from_json(r#"{
            "club": {
                "fragment": "Daalhof VR1",
                "displayName": "Daalhof VR1",
                "matchPolicy": "exact"
            },
            "recompute": "incremental",
            "season": "/srv/clubhouse/season.json",
            "timezone": "Europe/Brussels"
        }"#).expect("valid config");
        assert_eq!(config.club.match_policy, MatchPolicy::Exact);
        assert_eq!(config.club.display_name(), "Daalhof VR1");
        assert_eq!(config.recompute, RecomputePolicy::Incremental);
        assert_eq!(config.season.as_deref(), Some(Path::new("/srv/clubhouse/season.json")));
    }

    #[test]
    fn bad_timezone_is_rejected() {
        assert!(matches!(Config::from_json(r#"{ "timezone": "Mars/Olympus_Mons" }"#), Err(Error::Timezone(_))));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(matches!(Config::from_json(r#"{ "recompute": "sometimes" }"#), Err(Error::Json(_))));
    }
}
