use std::fmt::Write;

use crate::{
    entities::{education::Education, experience::Experience, skill::Skill, Resource, Stored},
    use_cases::{form_controller::Notification, resume::{Landing, ListState}},
    utils::html::{escape_html, safe_link},
    views::layout::{capitalise, layout},
};

/// One line of a list section.
pub trait SummaryRow: Resource {
    fn summary(&self) -> String;

    fn logo(&self) -> &str;

    /// Edit page for a stored record, when the entity has one.
    fn edit_path(_id: &str) -> Option<String> {
        None
    }

    /// Create page, when the entity has one.
    fn create_path() -> Option<&'static str> {
        None
    }
}

impl SummaryRow for Education {
    fn summary(&self) -> String {
        format!(
            "{}, {} ({} - {}) {}",
            self.course, self.school, self.start_date, self.end_date, self.grade
        )
    }

    fn logo(&self) -> &str {
        &self.logo
    }

    fn edit_path(id: &str) -> Option<String> {
        Some(format!("/education/edit/{}", urlencoding::encode(id)))
    }

    fn create_path() -> Option<&'static str> {
        Some("/education/create")
    }
}

impl SummaryRow for Skill {
    fn summary(&self) -> String {
        format!("{} ({})", self.name, self.proficiency)
    }

    fn logo(&self) -> &str {
        &self.logo
    }

    fn edit_path(id: &str) -> Option<String> {
        Some(format!("/skill/edit/{}", urlencoding::encode(id)))
    }

    fn create_path() -> Option<&'static str> {
        Some("/skill/create")
    }
}

impl SummaryRow for Experience {
    fn summary(&self) -> String {
        format!(
            "{} at {} ({} - {})",
            self.title, self.company, self.start_date, self.end_date
        )
    }

    fn logo(&self) -> &str {
        &self.logo
    }
}

fn render_row<R: SummaryRow>(stored: &Stored<R>) -> String {
    let logo = safe_link(stored.record.logo());
    let image = if logo.is_empty() {
        String::new()
    } else {
        format!("<img class=\"logo\" src=\"{logo}\" alt=\"\">")
    };
    let summary = escape_html(&stored.record.summary());

    match R::edit_path(&stored.id) {
        Some(path) => format!("<li>{image}<a href=\"{}\">{summary}</a></li>\n", escape_html(&path)),
        None => format!("<li>{image}{summary}</li>\n"),
    }
}

/// Renders one section: heading, state-dependent content and the add link.
pub fn render_section<R: SummaryRow>(state: &ListState<R>) -> String {
    let heading = capitalise(R::PLURAL);
    let mut html = format!("<section id=\"{}\">\n<h2>{heading}</h2>\n", R::PLURAL);

    match state {
        ListState::Failed(message) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(message));
        }
        ListState::Empty => {
            let _ = writeln!(html, "<p class=\"placeholder\">No {} yet</p>", R::PLURAL);
        }
        ListState::Populated(records) => {
            html.push_str("<ul>\n");
            for stored in records {
                html.push_str(&render_row(stored));
            }
            html.push_str("</ul>\n");
        }
    }

    if let Some(path) = R::create_path() {
        let _ = writeln!(html, "<a class=\"btn\" href=\"{path}\">Add {}</a>", capitalise(R::NAME));
    }
    html.push_str("</section>\n");
    html
}

pub fn render_landing(landing: &Landing, notification: Option<&Notification>) -> String {
    let body = format!(
        "<main>\n<h1>Resume Builder</h1>\n{}{}{}</main>",
        render_section(&landing.experiences),
        render_section(&landing.educations),
        render_section(&landing.skills),
    );
    layout("Resume", notification, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, name: &str) -> Stored<Skill> {
        Stored {
            id: id.into(),
            record: Skill {
                name: name.into(),
                proficiency: "80%".into(),
                logo: "https://x.test/g.png".into(),
            },
        }
    }

    #[test]
    fn empty_section_shows_placeholder() {
        let html = render_section::<Skill>(&ListState::Empty);
        assert!(html.contains("No skills yet"));
        assert!(!html.contains("<ul>"));
        assert!(html.contains("href=\"/skill/create\""));
    }

    #[test]
    fn populated_section_links_each_row_to_edit() {
        let html = render_section(&ListState::Populated(vec![skill("1", "Go"), skill("2", "<Rust>")]));
        assert!(html.contains(&format!("href=\"{}\"", escape_html("/skill/edit/1"))));
        assert!(html.contains(&format!("href=\"{}\"", escape_html("/skill/edit/2"))));
        assert!(html.contains(&escape_html("<Rust> (80%)")));
        assert!(!html.contains("<Rust>"));
    }

    #[test]
    fn failed_section_shows_error() {
        let html = render_section::<Education>(&ListState::Failed("Failed to fetch educations".into()));
        assert!(html.contains(&escape_html("Failed to fetch educations")));
    }

    #[test]
    fn experience_section_has_no_add_link() {
        let html = render_section::<Experience>(&ListState::Empty);
        assert!(!html.contains("Add Experience"));
    }
}
