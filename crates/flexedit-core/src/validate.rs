//! Pre-commit consistency checks for the scenario table.

use std::collections::HashSet;

use thiserror::Error;

use crate::table::ScenarioAlternatives;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScenarioValidationError {
    #[error("Alternatives missing for scenario '{scenario}'")]
    AlternativesMissing { scenario: String },
    #[error("Unknown alternative '{alternative}' in scenario '{scenario}'")]
    UnknownAlternative {
        alternative: String,
        scenario: String,
    },
    #[error("Duplicate alternative '{alternative}' in scenario '{scenario}'")]
    DuplicateAlternative {
        alternative: String,
        scenario: String,
    },
}

/// Checks every scenario row against the currently known alternative
/// names. The first problem found wins; there is no aggregation of
/// multiple errors. `Ok(())` means the table can be committed.
pub fn validate_scenario_alternatives(
    scenario_alternatives: &ScenarioAlternatives,
    known_alternatives: &HashSet<String>,
) -> Result<(), ScenarioValidationError> {
    for (scenario, alternatives) in scenario_alternatives {
        if alternatives.is_empty() {
            return Err(ScenarioValidationError::AlternativesMissing {
                scenario: scenario.clone(),
            });
        }
        let mut seen = HashSet::new();
        for alternative in alternatives {
            if !known_alternatives.contains(alternative) {
                return Err(ScenarioValidationError::UnknownAlternative {
                    alternative: alternative.clone(),
                    scenario: scenario.clone(),
                });
            }
            if !seen.insert(alternative.as_str()) {
                return Err(ScenarioValidationError::DuplicateAlternative {
                    alternative: alternative.clone(),
                    scenario: scenario.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_scenario_alternatives;

    fn known(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn empty_table_is_valid() {
        let parsed = ScenarioAlternatives::new();
        assert_eq!(
            validate_scenario_alternatives(&parsed, &known(&["Base"])),
            Ok(())
        );
    }

    #[test]
    fn valid_table_passes() {
        let parsed = parse_scenario_alternatives("S1 Base High\nS2 High").expect("must parse");
        assert_eq!(
            validate_scenario_alternatives(&parsed, &known(&["Base", "High"])),
            Ok(())
        );
    }

    #[test]
    fn scenario_without_alternatives_is_rejected() {
        let parsed = parse_scenario_alternatives("S1").expect("must parse");
        let error = validate_scenario_alternatives(&parsed, &known(&["Base"]))
            .expect_err("must be invalid");
        assert_eq!(
            error.to_string(),
            "Alternatives missing for scenario 'S1'"
        );
    }

    #[test]
    fn unknown_alternative_is_rejected() {
        let parsed = parse_scenario_alternatives("S1 Base Unknown").expect("must parse");
        let error = validate_scenario_alternatives(&parsed, &known(&["Base", "High"]))
            .expect_err("must be invalid");
        assert_eq!(
            error,
            ScenarioValidationError::UnknownAlternative {
                alternative: "Unknown".to_string(),
                scenario: "S1".to_string(),
            }
        );
        assert_eq!(
            error.to_string(),
            "Unknown alternative 'Unknown' in scenario 'S1'"
        );
    }

    #[test]
    fn duplicate_alternative_is_rejected() {
        let parsed =
            parse_scenario_alternatives("S1 Base High\nS2 Base Base").expect("must parse");
        let error = validate_scenario_alternatives(&parsed, &known(&["Base", "High"]))
            .expect_err("must be invalid");
        assert_eq!(
            error,
            ScenarioValidationError::DuplicateAlternative {
                alternative: "Base".to_string(),
                scenario: "S2".to_string(),
            }
        );
    }

    #[test]
    fn first_error_in_parse_order_wins() {
        let parsed =
            parse_scenario_alternatives("S1 Missing\nS2 Base Base").expect("must parse");
        let error = validate_scenario_alternatives(&parsed, &known(&["Base"]))
            .expect_err("must be invalid");
        assert_eq!(
            error,
            ScenarioValidationError::UnknownAlternative {
                alternative: "Missing".to_string(),
                scenario: "S1".to_string(),
            }
        );
    }
}
