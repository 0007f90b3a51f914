use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target of a super tiebreak played in place of the deciding set.
pub const SUPER_TIEBREAK_POINTS: u32 = 10;

/// Rule set of a match. Fixed once the match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSettings {
    /// Sets needed to take the match (2 = best of three).
    pub sets_to_win: u32,
    pub games_per_set: u32,
    pub tiebreak_points: u32,
    /// Next point at 40-40 decides the game.
    pub golden_point: bool,
    /// Deciding set is replaced by a single tiebreak to 10.
    pub super_tiebreak: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            sets_to_win: 2,
            games_per_set: 6,
            tiebreak_points: 7,
            golden_point: false,
            super_tiebreak: false,
        }
    }
}

impl MatchSettings {
    pub fn with_overrides(overrides: &SettingsOverrides) -> Self {
        let mut settings = Self::default();
        settings.apply(overrides);
        settings
    }

    pub fn apply(&mut self, overrides: &SettingsOverrides) {
        if let Some(sets_to_win) = overrides.sets_to_win {
            self.sets_to_win = sets_to_win;
        }
        if let Some(games_per_set) = overrides.games_per_set {
            self.games_per_set = games_per_set;
        }
        if let Some(tiebreak_points) = overrides.tiebreak_points {
            self.tiebreak_points = tiebreak_points;
        }
        if let Some(golden_point) = overrides.golden_point {
            self.golden_point = golden_point;
        }
        if let Some(super_tiebreak) = overrides.super_tiebreak {
            self.super_tiebreak = super_tiebreak;
        }
    }

    /// Sanity check used at the API boundary. The engine never calls this.
    pub fn validate(&self) -> Result<(), String> {
        if self.sets_to_win == 0 {
            return Err("sets_to_win must be at least 1".to_string());
        }
        if self.games_per_set == 0 {
            return Err("games_per_set must be at least 1".to_string());
        }
        if self.tiebreak_points == 0 {
            return Err("tiebreak_points must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Partial settings supplied at match creation; unset fields keep defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct SettingsOverrides {
    pub sets_to_win: Option<u32>,
    pub games_per_set: Option<u32>,
    pub tiebreak_points: Option<u32>,
    pub golden_point: Option<bool>,
    pub super_tiebreak: Option<bool>,
}

impl SettingsOverrides {
    /// Fields set in `other` win over fields set in `self`.
    pub fn merged(self, other: &SettingsOverrides) -> Self {
        Self {
            sets_to_win: other.sets_to_win.or(self.sets_to_win),
            games_per_set: other.games_per_set.or(self.games_per_set),
            tiebreak_points: other.tiebreak_points.or(self.tiebreak_points),
            golden_point: other.golden_point.or(self.golden_point),
            super_tiebreak: other.super_tiebreak.or(self.super_tiebreak),
        }
    }
}

/// Match formats offered when setting up a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatPreset {
    #[default]
    Standard,
    GoldenPoint,
    ShortSets,
    SingleSet,
}

impl FormatPreset {
    pub const ALL: [FormatPreset; 4] = [
        FormatPreset::Standard,
        FormatPreset::GoldenPoint,
        FormatPreset::ShortSets,
        FormatPreset::SingleSet,
    ];

    pub fn overrides(self) -> SettingsOverrides {
        match self {
            FormatPreset::Standard => SettingsOverrides::default(),
            FormatPreset::GoldenPoint => {
                SettingsOverrides { golden_point: Some(true), ..Default::default() }
            }
            FormatPreset::ShortSets => {
                SettingsOverrides { games_per_set: Some(4), ..Default::default() }
            }
            FormatPreset::SingleSet => {
                SettingsOverrides { sets_to_win: Some(1), ..Default::default() }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatPreset::Standard => "standard",
            FormatPreset::GoldenPoint => "golden_point",
            FormatPreset::ShortSets => "short_sets",
            FormatPreset::SingleSet => "single_set",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FormatPreset::Standard => "Best of 3 sets, 6 games, deuce/advantage",
            FormatPreset::GoldenPoint => "Best of 3 sets, sudden death at 40-40",
            FormatPreset::ShortSets => "Best of 3 sets, first to 4 games",
            FormatPreset::SingleSet => "One set decides the match",
        }
    }
}

impl fmt::Display for FormatPreset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormatPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatPreset::ALL
            .into_iter()
            .find(|preset| preset.label() == s.trim())
            .ok_or_else(|| format!("unknown format preset '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = MatchSettings::default();
        assert_eq!(settings.sets_to_win, 2);
        assert_eq!(settings.games_per_set, 6);
        assert_eq!(settings.tiebreak_points, 7);
        assert!(!settings.golden_point);
        assert!(!settings.super_tiebreak);
    }

    #[test]
    fn test_overrides_only_touch_set_fields() {
        let overrides = SettingsOverrides { games_per_set: Some(4), super_tiebreak: Some(true), ..Default::default() };
        let settings = MatchSettings::with_overrides(&overrides);
        assert_eq!(settings.games_per_set, 4);
        assert!(settings.super_tiebreak);
        assert_eq!(settings.sets_to_win, 2);
        assert_eq!(settings.tiebreak_points, 7);
    }

    #[test]
    fn test_overrides_parse_from_partial_json() {
        let overrides: SettingsOverrides = serde_json::from_str(r#"{"golden_point": true}"#).unwrap();
        assert_eq!(overrides.golden_point, Some(true));
        assert_eq!(overrides.sets_to_win, None);
    }

    #[test]
    fn test_presets() {
        assert_eq!(MatchSettings::with_overrides(&FormatPreset::Standard.overrides()), MatchSettings::default());
        assert!(MatchSettings::with_overrides(&FormatPreset::GoldenPoint.overrides()).golden_point);
        assert_eq!(MatchSettings::with_overrides(&FormatPreset::ShortSets.overrides()).games_per_set, 4);
        assert_eq!(MatchSettings::with_overrides(&FormatPreset::SingleSet.overrides()).sets_to_win, 1);
        assert_eq!("short_sets".parse::<FormatPreset>(), Ok(FormatPreset::ShortSets));
        assert!("tournament".parse::<FormatPreset>().is_err());
    }

    #[test]
    fn test_merge_prefers_explicit_fields() {
        let preset = FormatPreset::GoldenPoint.overrides();
        let explicit = SettingsOverrides { golden_point: Some(false), sets_to_win: Some(3), ..Default::default() };
        let merged = preset.merged(&explicit);
        assert_eq!(merged.golden_point, Some(false));
        assert_eq!(merged.sets_to_win, Some(3));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(MatchSettings::default().validate().is_ok());
        let bad = MatchSettings { games_per_set: 0, ..MatchSettings::default() };
        assert!(bad.validate().unwrap_err().contains("games_per_set"));
    }
}
