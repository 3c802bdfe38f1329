use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::domain::form::{EntityForm, FieldDescriptor, FieldValues, FormSchema};
use crate::entities::Resource;

static SKILL_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    FormSchema::new(
        Skill::NAME,
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::percentage("proficiency", "Proficiency")
                .required()
                .with_placeholder("80%"),
            FieldDescriptor::url("logo", "Logo (URL)")
                .required()
                .with_placeholder("https://"),
        ],
    )
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percentage string such as `"80%"`.
    pub proficiency: String,
    pub logo: String,
}

impl Resource for Skill {
    const PATH: &'static str = "/resume/skill";
    const NAME: &'static str = "skill";
    const PLURAL: &'static str = "skills";
}

impl EntityForm for Skill {
    fn schema() -> &'static FormSchema {
        &SKILL_SCHEMA
    }

    fn build(values: &FieldValues) -> Result<Self, ValidationErrors> {
        Ok(Skill {
            name: values.text("name"),
            proficiency: values.text("proficiency"),
            logo: values.text("logo"),
        })
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::new()
            .with("name", self.name.as_str())
            .with("proficiency", self.proficiency.as_str())
            .with("logo", self.logo.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_skill_builds_trimmed_record() {
        let values = FieldValues::new()
            .with("name", " Go ")
            .with("proficiency", "80%")
            .with("logo", "https://x.test/g.png");

        let skill = Skill::from_values(&values).unwrap();
        assert_eq!(skill.name, "Go");
        assert_eq!(skill.to_values().get("proficiency"), "80%");
    }

    #[test]
    fn proficiency_without_percent_sign_is_rejected() {
        let values = FieldValues::new()
            .with("name", "Go")
            .with("proficiency", "55")
            .with("logo", "https://x.test/g.png");

        let errors = Skill::from_values(&values).unwrap_err();
        assert!(errors.field_errors().contains_key("proficiency"));
    }
}
