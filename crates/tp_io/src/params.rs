//! Plan parameter files: JSON → schema check → typed `PlanParams` → domain
//! check. Omitted fields keep their defaults.

use std::path::Path;

use serde_json::Value;
use tp_core::variables::PlanParams;

use crate::{read_json_value, IoError, IoResult};

/// Embedded schema for parameter files.
pub const PLAN_PARAMS_SCHEMA: &str = include_str!("../schemas/plan_params.schema.json");

pub fn load_params(path: &Path) -> IoResult<PlanParams> {
    let v = read_json_value(path)?;
    let params = params_from_value(v)?;
    tracing::debug!(path = %path.display(), strategy = %params.strategy, "params loaded");
    Ok(params)
}

/// Validate and convert an already-parsed parameter document.
pub fn params_from_value(v: Value) -> IoResult<PlanParams> {
    validate_schema(&v)?;
    let mut params: PlanParams = serde_json::from_value(v)?;
    params
        .validate_domains()
        .map_err(|e| IoError::Invalid(e.to_string()))?;
    params.normalize_columns();
    Ok(params)
}

#[cfg(feature = "schemaval")]
fn validate_schema(v: &Value) -> IoResult<()> {
    let schema: Value = serde_json::from_str(PLAN_PARAMS_SCHEMA)?;
    let compiled = jsonschema::JSONSchema::compile(&schema)
        .map_err(|e| IoError::Schema(format!("plan_params schema: {e}")))?;
    if let Err(errors) = compiled.validate(v) {
        let msgs: Vec<String> = errors
            .map(|e| {
                let at = e.instance_path.to_string();
                let at = if at.is_empty() { "/".to_string() } else { at };
                format!("{at}: {e}")
            })
            .collect();
        return Err(IoError::Schema(msgs.join("; ")));
    }
    Ok(())
}

#[cfg(not(feature = "schemaval"))]
fn validate_schema(_v: &Value) -> IoResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;
    use serde_json::json;
    use std::io::Write;
    use tp_core::variables::AllocationStrategy;

    #[test]
    fn empty_document_yields_defaults() {
        let p = params_from_value(json!({})).unwrap();
        assert_eq!(p, PlanParams::default());
    }

    #[test]
    fn overrides_are_applied_and_aliases_normalized() {
        let p = params_from_value(json!({
            "periods_per_day": 6,
            "strategy": "minimum_required",
            "weekly_frequency": { "Sanskrit": 3 },
            "columns": {
                "grade": ["Std", "class"],
                "subject": ["Subject"],
                "chapter": ["Unit"],
                "learning_outcome": ["Outcome"]
            }
        }))
        .unwrap();
        assert_eq!(p.periods_per_day, 6);
        assert_eq!(p.strategy, AllocationStrategy::MinimumRequired);
        assert_eq!(p.weekly_frequency_for("Sanskrit"), 3);
        assert_eq!(p.columns.grade, vec!["std".to_string(), "class".to_string()]);
    }

    #[cfg(feature = "schemaval")]
    #[test]
    fn schema_rejects_unknown_and_out_of_range() {
        assert!(matches!(
            params_from_value(json!({ "periods": 8 })),
            Err(IoError::Schema(_))
        ));
        assert!(matches!(
            params_from_value(json!({ "weekly_frequency": { "Science": 0 } })),
            Err(IoError::Schema(_))
        ));
        assert!(matches!(
            params_from_value(json!({ "strategy": "greedy" })),
            Err(IoError::Schema(_))
        ));
    }

    #[test]
    fn ratios_must_sum_to_one_hundred() {
        let err = params_from_value(json!({
            "block_ratios": { "teaching": 70, "revision": 10, "assessment": 10, "exams": 10, "buffer": 5 }
        }))
        .unwrap_err();
        assert!(matches!(err, IoError::Invalid(ref m) if m.contains("100")), "{err}");
    }

    #[test]
    fn defaults_survive_a_write_and_reload() {
        let v = serde_json::to_value(PlanParams::default()).unwrap();
        assert_json_include!(
            actual: v.clone(),
            expected: json!({
                "periods_per_day": 8,
                "integration_units": 3,
                "weight_bounds": { "min": 1, "max": 5 },
                "default_weekly_frequency": 4,
                "default_band": "primary",
                "strategy": "proportional",
                "block_ratios": { "teaching": 65, "buffer": 5 }
            })
        );
        assert_eq!(params_from_value(v).unwrap(), PlanParams::default());
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"integration_units": 2}}"#).unwrap();
        let p = load_params(f.path()).unwrap();
        assert_eq!(p.integration_units, 2);
        assert_eq!(p.periods_per_day, 8);
    }
}
