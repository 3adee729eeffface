use crate::prelude::*;

/// Canonical fragment of the club's own name, as it appears in every variant ("Daalhof VR1", "Daalhof VR 1", "Daalhof").
pub(crate) const DEFAULT_FRAGMENT: &str = "daalhof";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Team {
    pub(crate) name: String,
    /// Opaque reference to an image resource, usually a path under `/static`.
    pub(crate) logo: String,
}

impl Team {
    #[cfg(test)]
    pub(crate) fn new(name: impl Into<String>, logo: impl Into<String>) -> Self {
        Self { name: name.into(), logo: logo.into() }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Folds a team name into a comparison key.
///
/// Lowercases, maps the typographic apostrophe (U+2019) to `'`, then keeps only ASCII letters and digits.
/// Whitespace and punctuation disappear along the way, so `"GSV’28"` and `"GSV'28"` both become `"gsv28"`.
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace('\u{2019}', "'")
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Shorthand for the default fuzzy check against [`DEFAULT_FRAGMENT`].
#[cfg(test)]
pub(crate) fn is_nominated_team(name: &str) -> bool {
    NominatedTeam::default().matches(name)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum MatchPolicy {
    /// The normalized name contains the normalized fragment.
    #[default]
    Fuzzy,
    /// Trimmed, case-insensitive equality with the fragment.
    Exact,
}

/// The club whose standings row is derived from match results.
///
/// The same matcher is used to find the row to recompute and the row to center the standings window on,
/// so both operations always agree about which row is "ours".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NominatedTeam {
    pub(crate) fragment: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    #[serde(default)]
    pub(crate) match_policy: MatchPolicy,
}

impl Default for NominatedTeam {
    fn default() -> Self {
        Self {
            fragment: DEFAULT_FRAGMENT.to_owned(),
            display_name: None,
            match_policy: MatchPolicy::default(),
        }
    }
}

impl NominatedTeam {
    #[cfg(test)]
    pub(crate) fn new(fragment: impl Into<String>, match_policy: MatchPolicy) -> Self {
        Self {
            fragment: fragment.into(),
            display_name: None,
            match_policy,
        }
    }

    pub(crate) fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.fragment)
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        match self.match_policy {
            MatchPolicy::Fuzzy => {
                let fragment = normalize(&self.fragment);
                let name = normalize(name);
                // an empty key would be a substring of everything
                !fragment.is_empty() && !name.is_empty() && name.contains(&fragment)
            }
            MatchPolicy::Exact => {
                let name = name.trim();
                !name.is_empty() && name.to_lowercase() == self.fragment.trim().to_lowercase()
            }
        }
    }

    pub(crate) fn is_team(&self, team: &Team) -> bool {
        self.matches(&team.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_everything_but_ascii_alphanumerics() {
        assert_eq!(normalize("Daalhof VR 1"), "daalhofvr1");
        assert_eq!(normalize("ST UOW\u{2019}02"), "stuow02");
        assert_eq!(normalize("BSV Limburgia/Kamerland"), "bsvlimburgiakamerland");
        assert_eq!(normalize("Leonidas - W"), "leonidasw");
    }

    #[test]
    fn normalize_degenerate_names() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \t "), "");
        assert_eq!(normalize("'’-/."), "");
    }

    #[test]
    fn name_variants_are_recognized() {
        assert!(is_nominated_team("Daalhof VR 1"));
        assert!(is_nominated_team("daalhof vr1"));
        assert!(is_nominated_team("DAALHOF"));
        assert!(is_nominated_team("Daalhof"));
        assert!(!is_nominated_team("Daalbos"));
        assert!(!is_nominated_team("Groene Ster VR1"));
    }

    #[test]
    fn empty_names_never_match() {
        assert!(!is_nominated_team(""));
        assert!(!is_nominated_team("---"));
        let blank = NominatedTeam::new("  ", MatchPolicy::Fuzzy);
        assert!(!blank.matches("anything"));
        assert!(!blank.matches(""));
        let blank = NominatedTeam::new("", MatchPolicy::Exact);
        assert!(!blank.matches(""));
    }

    #[test]
    fn exact_policy_only_ignores_case_and_padding() {
        let club = NominatedTeam::new("Daalhof", MatchPolicy::Exact);
        assert!(club.matches("  daalhof "));
        assert!(club.matches("DAALHOF"));
        assert!(!club.matches("Daalhof VR1"));
        assert!(!club.matches("Daal hof"));
    }

    #[test]
    fn display_name_falls_back_to_fragment() {
        let mut club = NominatedTeam::default();
        assert_eq!(club.display_name(), "daalhof");
        club.display_name = Some(format!("Daalhof VR1"));
        assert_eq!(club.display_name(), "Daalhof VR1");
    }
}
