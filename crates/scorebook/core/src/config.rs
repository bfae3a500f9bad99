//! Match format configuration.
//!
//! A [`FormatConfig`] is an immutable value threaded through every engine and
//! session call. There is no process-wide format state.

use crate::error::{ErrorSeverity, ScoringError};

/// Named over-range segment used for breakdown statistics.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Powerplay,
    Middle,
    Final,
}

/// Over boundaries of the powerplay and final phases.
///
/// Overs `[0, powerplay_overs)` are the powerplay, the last `final_overs`
/// overs are the final phase, everything in between is the middle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseBoundaries {
    pub powerplay_overs: u32,
    pub final_overs: u32,
}

/// Overs limits, bowler cap and phase boundaries for one match format.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatConfig {
    /// Display name of the format (e.g. "T20", "One Day").
    pub name: String,

    /// Overs per innings. `None` means unlimited.
    pub max_overs: Option<u32>,

    /// Overs a single bowler may bowl. `None` means unlimited.
    pub max_bowler_overs: Option<u32>,

    /// Legal deliveries per over.
    #[cfg_attr(
        feature = "serde",
        serde(default = "FormatConfig::default_balls_per_over")
    )]
    pub balls_per_over: u32,

    /// Phase boundaries. `None` disables phase accrual.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phases: Option<PhaseBoundaries>,
}

impl FormatConfig {
    // ===== fixed rules =====
    pub const DEFAULT_BALLS_PER_OVER: u32 = 6;
    /// Wickets that end an innings.
    pub const MAX_WICKETS: u32 = 10;

    /// Twenty overs a side, four per bowler, 6/10/4 phase split.
    pub fn t20() -> Self {
        Self {
            name: "T20".to_string(),
            max_overs: Some(20),
            max_bowler_overs: Some(4),
            balls_per_over: Self::DEFAULT_BALLS_PER_OVER,
            phases: Some(PhaseBoundaries {
                powerplay_overs: 6,
                final_overs: 4,
            }),
        }
    }

    /// Fifty overs a side, ten per bowler, 10/30/10 phase split.
    pub fn one_day() -> Self {
        Self {
            name: "One Day".to_string(),
            max_overs: Some(50),
            max_bowler_overs: Some(10),
            balls_per_over: Self::DEFAULT_BALLS_PER_OVER,
            phases: Some(PhaseBoundaries {
                powerplay_overs: 10,
                final_overs: 10,
            }),
        }
    }

    /// Unlimited overs, no bowler cap, no phases.
    pub fn first_class() -> Self {
        Self {
            name: "First Class".to_string(),
            max_overs: None,
            max_bowler_overs: None,
            balls_per_over: Self::DEFAULT_BALLS_PER_OVER,
            phases: None,
        }
    }

    /// Builds a validated custom format without phase boundaries.
    pub fn custom(
        name: impl Into<String>,
        max_overs: Option<u32>,
        max_bowler_overs: Option<u32>,
    ) -> Result<Self, FormatError> {
        let config = Self {
            name: name.into(),
            max_overs,
            max_bowler_overs,
            balls_per_over: Self::DEFAULT_BALLS_PER_OVER,
            phases: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the given phase boundaries.
    #[must_use]
    pub fn with_phases(mut self, powerplay_overs: u32, final_overs: u32) -> Self {
        self.phases = Some(PhaseBoundaries {
            powerplay_overs,
            final_overs,
        });
        self
    }

    /// Returns a copy with a different over length.
    #[must_use]
    pub fn with_balls_per_over(mut self, balls_per_over: u32) -> Self {
        self.balls_per_over = balls_per_over;
        self
    }

    pub fn default_balls_per_over() -> u32 {
        Self::DEFAULT_BALLS_PER_OVER
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_overs.is_none()
    }

    /// Checks the format is internally consistent.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.balls_per_over == 0 {
            return Err(FormatError::ZeroBallsPerOver);
        }
        if self.max_overs == Some(0) {
            return Err(FormatError::ZeroOvers);
        }
        if self.max_bowler_overs == Some(0) {
            return Err(FormatError::ZeroBowlerOvers);
        }
        if let Some(phases) = self.phases {
            let max_overs = self.max_overs.ok_or(FormatError::PhasesWithoutOverLimit)?;
            let phase_overs = phases.powerplay_overs.checked_add(phases.final_overs);
            if phase_overs.is_none_or(|overs| overs > max_overs) {
                return Err(FormatError::PhasesExceedOvers {
                    powerplay_overs: phases.powerplay_overs,
                    final_overs: phases.final_overs,
                    max_overs,
                });
            }
        }
        Ok(())
    }

    /// Resolves the phase of a 0-indexed over.
    ///
    /// Unlimited formats and formats without boundaries have no phases.
    pub fn phase_for_over(&self, over: u32) -> Option<Phase> {
        let max_overs = self.max_overs?;
        let phases = self.phases?;

        if over < phases.powerplay_overs {
            Some(Phase::Powerplay)
        } else if over < max_overs.saturating_sub(phases.final_overs) {
            Some(Phase::Middle)
        } else {
            Some(Phase::Final)
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::t20()
    }
}

/// Errors raised while building or validating a [`FormatConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("balls per over must be positive")]
    ZeroBallsPerOver,

    #[error("overs per innings must be positive")]
    ZeroOvers,

    #[error("overs per bowler must be positive")]
    ZeroBowlerOvers,

    #[error("phase boundaries require a limited-overs format")]
    PhasesWithoutOverLimit,

    #[error(
        "powerplay ({powerplay_overs}) and final ({final_overs}) overs exceed the {max_overs}-over limit"
    )]
    PhasesExceedOvers {
        powerplay_overs: u32,
        final_overs: u32,
        max_overs: u32,
    },
}

impl ScoringError for FormatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use FormatError::*;
        match self {
            ZeroBallsPerOver => "FORMAT_ZERO_BALLS_PER_OVER",
            ZeroOvers => "FORMAT_ZERO_OVERS",
            ZeroBowlerOvers => "FORMAT_ZERO_BOWLER_OVERS",
            PhasesWithoutOverLimit => "FORMAT_PHASES_WITHOUT_OVER_LIMIT",
            PhasesExceedOvers { .. } => "FORMAT_PHASES_EXCEED_OVERS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t20_phases_follow_six_ten_four_split() {
        let format = FormatConfig::t20();
        assert_eq!(format.phase_for_over(0), Some(Phase::Powerplay));
        assert_eq!(format.phase_for_over(5), Some(Phase::Powerplay));
        assert_eq!(format.phase_for_over(6), Some(Phase::Middle));
        assert_eq!(format.phase_for_over(15), Some(Phase::Middle));
        assert_eq!(format.phase_for_over(16), Some(Phase::Final));
        assert_eq!(format.phase_for_over(19), Some(Phase::Final));
    }

    #[test]
    fn one_day_phases_follow_ten_thirty_ten_split() {
        let format = FormatConfig::one_day();
        assert_eq!(format.phase_for_over(9), Some(Phase::Powerplay));
        assert_eq!(format.phase_for_over(10), Some(Phase::Middle));
        assert_eq!(format.phase_for_over(39), Some(Phase::Middle));
        assert_eq!(format.phase_for_over(40), Some(Phase::Final));
    }

    #[test]
    fn unlimited_formats_have_no_phase() {
        let format = FormatConfig::first_class();
        assert!(format.is_unlimited());
        assert_eq!(format.phase_for_over(0), None);
        assert_eq!(format.phase_for_over(120), None);
    }

    #[test]
    fn custom_format_rejects_zero_limits() {
        assert_eq!(
            FormatConfig::custom("Club", Some(0), None),
            Err(FormatError::ZeroOvers)
        );
        assert_eq!(
            FormatConfig::custom("Club", Some(10), Some(0)),
            Err(FormatError::ZeroBowlerOvers)
        );
        let club = FormatConfig::custom("Club", Some(10), Some(2)).unwrap();
        assert_eq!(club.phase_for_over(0), None);
    }

    #[test]
    fn phases_must_fit_inside_the_over_limit() {
        let format = FormatConfig::custom("Short", Some(5), None)
            .unwrap()
            .with_phases(4, 2);
        assert_eq!(
            format.validate(),
            Err(FormatError::PhasesExceedOvers {
                powerplay_overs: 4,
                final_overs: 2,
                max_overs: 5,
            })
        );
    }

    #[test]
    fn oversized_phase_boundaries_are_rejected_without_overflow() {
        let format = FormatConfig::custom("Huge", Some(20), None)
            .unwrap()
            .with_phases(u32::MAX, 1);
        assert_eq!(
            format.validate(),
            Err(FormatError::PhasesExceedOvers {
                powerplay_overs: u32::MAX,
                final_overs: 1,
                max_overs: 20,
            })
        );
    }

    #[test]
    fn phase_names_parse_case_insensitively() {
        assert_eq!("Powerplay".parse::<Phase>(), Ok(Phase::Powerplay));
        assert_eq!(Phase::Final.to_string(), "final");
    }
}
