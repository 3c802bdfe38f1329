use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::domain::form::{single_error, EntityForm, FieldDescriptor, FieldValues, FormSchema};
use crate::entities::dates::{parse_input_date, EndDate, MonthYear, PRESENT};
use crate::entities::{EditMethod, Resource};

/// Checkbox that marks the end date as ongoing.
pub const END_DATE_PRESENT: &str = "end_date_present";

static EDUCATION_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    FormSchema::new(
        Education::NAME,
        vec![
            FieldDescriptor::text("course", "Course").required(),
            FieldDescriptor::text("school", "School").required(),
            FieldDescriptor::date("start_date", "Start date").required(),
            FieldDescriptor::end_date("end_date", "End date").required(),
            FieldDescriptor::percentage("grade", "Grade")
                .required()
                .with_placeholder("85%"),
            FieldDescriptor::url("logo", "Logo (URL)")
                .required()
                .with_placeholder("https://"),
        ],
    )
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub course: String,
    pub school: String,
    pub start_date: MonthYear,
    pub end_date: EndDate,
    pub grade: String,
    pub logo: String,
}

impl Resource for Education {
    const PATH: &'static str = "/resume/education";
    const NAME: &'static str = "education";
    const PLURAL: &'static str = "educations";
    const EDIT_METHOD: EditMethod = EditMethod::Post;
}

impl EntityForm for Education {
    fn schema() -> &'static FormSchema {
        &EDUCATION_SCHEMA
    }

    fn build(values: &FieldValues) -> Result<Self, ValidationErrors> {
        let start_date = parse_input_date(values.get("start_date"))
            .ok_or_else(|| single_error("start_date", "date", "Pick a valid date"))?;

        let raw_end = values.get("end_date").trim();
        let end_date = if raw_end == PRESENT {
            EndDate::Ongoing
        } else {
            parse_input_date(raw_end)
                .map(EndDate::from)
                .ok_or_else(|| single_error("end_date", "date", "Pick a valid date"))?
        };

        Ok(Education {
            course: values.text("course"),
            school: values.text("school"),
            start_date: MonthYear(start_date),
            end_date,
            grade: values.text("grade"),
            logo: values.text("logo"),
        })
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::new()
            .with("course", self.course.as_str())
            .with("school", self.school.as_str())
            .with("start_date", self.start_date.to_input_value())
            .with("end_date", self.end_date.to_input_value())
            .with("grade", self.grade.as_str())
            .with("logo", self.logo.as_str())
    }

    /// A ticked "Present" box wins over whatever date was picked.
    fn normalise(values: &mut FieldValues) {
        if values.remove(END_DATE_PRESENT).is_some() {
            values.set("end_date", PRESENT);
        }
    }
}
