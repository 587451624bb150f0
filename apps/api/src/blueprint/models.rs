//! The Blueprint record and its shape validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A generated job blueprint. Serialized with the same camelCase keys the
/// model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub job_title: String,
    pub responsibilities: Vec<String>,
    pub required_skills: Vec<String>,
    pub qualifications: Vec<String>,
}

/// The three item groups of a blueprint, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Responsibilities,
    RequiredSkills,
    Qualifications,
}

/// The parsed JSON does not match the blueprint shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SchemaError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}' (expected responsibilities, requiredSkills or qualifications)")]
pub struct UnknownSection(pub String);

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Responsibilities,
        Section::RequiredSkills,
        Section::Qualifications,
    ];

    /// Wire key, identical to the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            Section::Responsibilities => "responsibilities",
            Section::RequiredSkills => "requiredSkills",
            Section::Qualifications => "qualifications",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Responsibilities => "Responsibilities",
            Section::RequiredSkills => "Required Skills",
            Section::Qualifications => "Qualifications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

impl Blueprint {
    pub fn items(&self, section: Section) -> &[String] {
        match section {
            Section::Responsibilities => &self.responsibilities,
            Section::RequiredSkills => &self.required_skills,
            Section::Qualifications => &self.qualifications,
        }
    }

    pub fn item(&self, section: Section, index: usize) -> Option<&str> {
        self.items(section).get(index).map(String::as_str)
    }

    /// Validates a parsed JSON value against the blueprint shape.
    ///
    /// `jobTitle` must be a non-empty string and every section must be present
    /// as an array of strings (possibly empty). Nothing is coerced; extra keys
    /// are ignored.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError("expected a JSON object".to_string()))?;

        let job_title = match obj.get("jobTitle") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) => return Err(SchemaError("`jobTitle` is empty".to_string())),
            Some(_) => return Err(SchemaError("`jobTitle` must be a string".to_string())),
            None => return Err(SchemaError("missing field `jobTitle`".to_string())),
        };

        Ok(Blueprint {
            job_title,
            responsibilities: string_list(obj, Section::Responsibilities)?,
            required_skills: string_list(obj, Section::RequiredSkills)?,
            qualifications: string_list(obj, Section::Qualifications)?,
        })
    }
}

fn string_list(obj: &Map<String, Value>, section: Section) -> Result<Vec<String>, SchemaError> {
    let key = section.key();
    let items = match obj.get(key) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SchemaError(format!("`{key}` must be an array"))),
        None => return Err(SchemaError(format!("missing field `{key}`"))),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError(format!("`{key}[{i}]` must be a string")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data_analyst_json() -> Value {
        json!({
            "jobTitle": "Data Analyst",
            "responsibilities": ["Analyze data"],
            "requiredSkills": ["SQL"],
            "qualifications": ["BSc"]
        })
    }

    #[test]
    fn test_from_value_accepts_valid_shape() {
        let blueprint = Blueprint::from_value(&data_analyst_json()).unwrap();
        assert_eq!(blueprint.job_title, "Data Analyst");
        assert_eq!(blueprint.responsibilities, vec!["Analyze data"]);
        assert_eq!(blueprint.required_skills, vec!["SQL"]);
        assert_eq!(blueprint.qualifications, vec!["BSc"]);
    }

    #[test]
    fn test_from_value_accepts_empty_sections_and_extra_keys() {
        let value = json!({
            "jobTitle": "Intern",
            "responsibilities": [],
            "requiredSkills": [],
            "qualifications": [],
            "salary": "unpaid"
        });
        let blueprint = Blueprint::from_value(&value).unwrap();
        assert!(blueprint.responsibilities.is_empty());
    }

    #[test]
    fn test_missing_qualifications_is_schema_error() {
        let mut value = data_analyst_json();
        value.as_object_mut().unwrap().remove("qualifications");
        let err = Blueprint::from_value(&value).unwrap_err();
        assert_eq!(err.0, "missing field `qualifications`");
    }

    #[test]
    fn test_non_array_section_is_schema_error() {
        let mut value = data_analyst_json();
        value["requiredSkills"] = json!("SQL, Excel");
        let err = Blueprint::from_value(&value).unwrap_err();
        assert_eq!(err.0, "`requiredSkills` must be an array");
    }

    #[test]
    fn test_non_string_item_is_schema_error() {
        let mut value = data_analyst_json();
        value["responsibilities"] = json!(["Analyze data", 42]);
        let err = Blueprint::from_value(&value).unwrap_err();
        assert_eq!(err.0, "`responsibilities[1]` must be a string");
    }

    #[test]
    fn test_empty_or_missing_title_is_schema_error() {
        let mut value = data_analyst_json();
        value["jobTitle"] = json!("  ");
        assert!(Blueprint::from_value(&value).is_err());

        value.as_object_mut().unwrap().remove("jobTitle");
        let err = Blueprint::from_value(&value).unwrap_err();
        assert_eq!(err.0, "missing field `jobTitle`");
    }

    #[test]
    fn test_non_object_is_schema_error() {
        assert!(Blueprint::from_value(&json!(["a"])).is_err());
    }

    #[test]
    fn test_section_keys_round_trip_through_from_str() {
        for section in Section::ALL {
            assert_eq!(section.key().parse::<Section>().unwrap(), section);
        }
        assert!("skills".parse::<Section>().is_err());
    }

    #[test]
    fn test_section_serde_uses_wire_keys() {
        let json = serde_json::to_string(&Section::RequiredSkills).unwrap();
        assert_eq!(json, r#""requiredSkills""#);
    }

    #[test]
    fn test_item_lookup() {
        let blueprint = Blueprint::from_value(&data_analyst_json()).unwrap();
        assert_eq!(blueprint.item(Section::RequiredSkills, 0), Some("SQL"));
        assert_eq!(blueprint.item(Section::RequiredSkills, 1), None);
    }

    #[test]
    fn test_blueprint_serializes_camel_case() {
        let blueprint = Blueprint::from_value(&data_analyst_json()).unwrap();
        let value = serde_json::to_value(&blueprint).unwrap();
        assert_eq!(value, data_analyst_json());
    }
}
