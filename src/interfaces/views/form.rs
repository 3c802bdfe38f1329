use std::fmt::Write;

use crate::{
    domain::form::{EntityForm, FieldDescriptor, FieldKind},
    entities::{dates::PRESENT, Resource},
    use_cases::form_controller::{FormController, FormMode, Notification},
    utils::html::escape_html,
    views::layout::{capitalise, layout},
};

/// Disables the button as soon as the browser posts the form.
const DISABLE_ON_SUBMIT: &str =
    "this.querySelector('button[type=submit]').disabled=true";

fn render_field(field: &FieldDescriptor, value: &str, error: Option<&str>) -> String {
    let key = field.key;
    let mut html = format!("<label for=\"{key}\">{}", escape_html(field.label));
    let required = if field.required { " required" } else { "" };
    let placeholder = field
        .placeholder
        .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
        .unwrap_or_default();

    match field.kind {
        FieldKind::Text | FieldKind::Url | FieldKind::Percentage => {
            let _ = write!(
                html,
                "<input type=\"text\" id=\"{key}\" name=\"{key}\" value=\"{}\"{placeholder}{required}>",
                escape_html(value)
            );
        }
        FieldKind::Date { allow_ongoing } => {
            let ongoing = allow_ongoing && value == PRESENT;
            let date = if ongoing { "" } else { value };
            let _ = write!(
                html,
                "<input type=\"date\" id=\"{key}\" name=\"{key}\" value=\"{}\">",
                escape_html(date)
            );
            if allow_ongoing {
                let checked = if ongoing { " checked" } else { "" };
                let flag = format!("{key}_present");
                let _ = write!(
                    html,
                    " <span><input type=\"checkbox\" id=\"{flag}\" name=\"{flag}\"{checked}> {PRESENT}</span>"
                );
            }
        }
    }

    if let Some(message) = error {
        let _ = write!(html, "<span class=\"field-error\">{}</span>", escape_html(message));
    }
    html.push_str("</label>\n");
    html
}

/// Renders a create or edit form from the entity schema and the controller state.
pub fn render_form<E>(form: &FormController<E>, notification: Option<&Notification>) -> String
where
    E: EntityForm + Resource,
{
    let (verb, action, button) = match form.mode() {
        FormMode::Create => ("Add", format!("/{}/create", E::NAME), "Create"),
        FormMode::Edit { id } => (
            "Edit",
            format!("/{}/edit/{}", E::NAME, urlencoding::encode(id)),
            "Save",
        ),
    };
    let title = format!("{verb} {}", capitalise(E::NAME));

    let mut body = format!(
        "<main>\n<form method=\"post\" action=\"{}\" onsubmit=\"{DISABLE_ON_SUBMIT}\">\n<h1>{title}</h1>\n",
        escape_html(&action)
    );
    for field in &E::schema().fields {
        body.push_str(&render_field(field, form.values().get(field.key), form.error(field.key)));
    }

    let disabled = if form.submit_disabled() { " disabled" } else { "" };
    let _ = write!(
        body,
        "<div>\n<a href=\"/\">Back</a>\n<button type=\"submit\"{disabled}>{button}</button>\n</div>\n</form>\n</main>"
    );

    layout(&title, notification, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FieldValues;
    use crate::entities::{education::Education, skill::Skill};

    #[test]
    fn create_form_posts_to_create_route() {
        let html = render_form(&FormController::<Skill>::create(), None);
        assert!(html.contains(&format!("action=\"{}\"", escape_html("/skill/create"))));
        assert!(html.contains("name=\"proficiency\""));
        assert!(html.contains("<h1>Add Skill</h1>"));
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn disabled_while_submitting() {
        let values = FieldValues::new()
            .with("name", "Go")
            .with("proficiency", "80%")
            .with("logo", "https://x.test/g.png");
        let mut form = FormController::<Skill>::with_values(FormMode::Create, values);
        form.begin_submit().unwrap();
        assert!(render_form(&form, None).contains("<button type=\"submit\" disabled>"));
    }

    #[test]
    fn ongoing_end_date_checks_present_box() {
        let values = FieldValues::new().with("end_date", PRESENT);
        let form = FormController::<Education>::with_values(FormMode::Edit { id: "9".into() }, values);
        let html = render_form(&form, None);
        assert!(html.contains("name=\"end_date_present\" checked"));
        assert!(html.contains("name=\"end_date\" value=\"\""));
        assert!(html.contains(&format!("action=\"{}\"", escape_html("/education/edit/9"))));
    }

    #[test]
    fn entered_values_and_errors_are_shown_escaped() {
        let mut form = FormController::<Skill>::create();
        form.set_value("name", "\"Go\"");
        form.set_value("logo", "nope");
        let html = render_form(&form, None);
        assert!(html.contains("value=\"&quot;Go&quot;\""));
        assert!(html.contains(&escape_html("Invalid URL")));
    }
}
