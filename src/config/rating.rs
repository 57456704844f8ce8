//! Rating rule configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};

/// Constants driving the momentum rating pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingRules {
    /// Rate given to a player on first appearance
    pub initial_rate: i32,
    /// No rate ever drops below this value
    pub rate_floor: i32,
    /// Points per position gained or lost since the previous round
    pub momentum_multiplier: i32,
    /// Forced loss when the previous winner finishes last
    pub collapse_penalty: i32,
    /// Forced gain when the previous last place finishes first
    pub climb_reward: i32,
    /// Players at or above this rate have their point damped
    pub damping_threshold: i32,
    pub damping_factor: f64,
    /// Added when a player finishes above the leader's last rank
    pub usurpation_bonus: i32,
}

impl Default for RatingRules {
    fn default() -> Self {
        Self {
            initial_rate: 50,
            rate_floor: 30,
            momentum_multiplier: 2,
            collapse_penalty: 8,
            climb_reward: 8,
            damping_threshold: 80,
            damping_factor: 0.8,
            usurpation_bonus: 2,
        }
    }
}

impl RatingRules {
    /// Validate rule parameters
    pub fn validate(&self) -> Result<()> {
        if self.rate_floor > self.initial_rate {
            return Err(TournamentError::ConfigurationError {
                message: format!(
                    "Rate floor {} exceeds initial rate {}",
                    self.rate_floor, self.initial_rate
                ),
            }
            .into());
        }

        if self.damping_factor <= 0.0 || !self.damping_factor.is_finite() {
            return Err(TournamentError::ConfigurationError {
                message: "Damping factor must be positive".to_string(),
            }
            .into());
        }

        if self.momentum_multiplier < 0 || self.collapse_penalty < 0 || self.climb_reward < 0 {
            return Err(TournamentError::ConfigurationError {
                message: "Momentum multiplier and override magnitudes must be non-negative"
                    .to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = RatingRules::default();
        assert_eq!(rules.initial_rate, 50);
        assert_eq!(rules.rate_floor, 30);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_rules_validation() {
        let mut rules = RatingRules {
            rate_floor: 60,
            ..RatingRules::default()
        };
        assert!(rules.validate().is_err());

        rules = RatingRules::default();
        rules.damping_factor = 0.0;
        assert!(rules.validate().is_err());

        rules = RatingRules::default();
        rules.damping_factor = f64::NAN;
        assert!(rules.validate().is_err());

        rules = RatingRules::default();
        rules.collapse_penalty = -8;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let rules: RatingRules = toml::from_str("initial_rate = 60").unwrap();
        assert_eq!(rules.initial_rate, 60);
        assert_eq!(rules.rate_floor, 30);
        assert_eq!(rules.usurpation_bonus, 2);
    }
}
