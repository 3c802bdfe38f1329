use crate::{
    use_cases::form_controller::{Notification, NotificationKind},
    utils::html::escape_html,
};

const STYLE: &str = "body{font-family:sans-serif;max-width:42rem;margin:2rem auto;padding:0 1rem}\
section{border:1px solid #ccc;border-radius:6px;padding:1rem;margin-bottom:1rem}\
.toast{padding:.75rem;border-radius:6px;margin-bottom:1rem}\
.toast.success{background:#e6f4ea}.toast.error{background:#fce8e6}\
.field-error{color:#b3261e;font-size:.9rem}label{display:block;margin-bottom:.75rem}\
img.logo{width:1.5rem;height:1.5rem;vertical-align:middle;margin-right:.5rem}";

/// Wraps page content in the shared document shell.
pub fn layout(title: &str, notification: Option<&Notification>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | Resume Builder</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         {toast}{body}\n</body>\n</html>\n",
        title = escape_html(title),
        toast = notification.map(render_notification).unwrap_or_default(),
    )
}

pub fn render_notification(notification: &Notification) -> String {
    let (class, role) = match notification.kind {
        NotificationKind::Success => ("success", "status"),
        NotificationKind::Error => ("error", "alert"),
    };
    format!(
        "<div class=\"toast {class}\" role=\"{role}\">{}</div>\n",
        escape_html(&notification.title)
    )
}

/// Inline message page used for read failures and unknown routes.
pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        None,
        &format!(
            "<main>\n<p class=\"error\">{}</p>\n<a href=\"/\">Back to resume</a>\n</main>",
            escape_html(message)
        ),
    )
}

/// `"education"` -> `"Education"`.
pub fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_escapes_message() {
        let page = error_page("<b>gone</b>");
        assert!(page.contains(&escape_html("<b>gone</b>")));
        assert!(!page.contains("<b>"));
        assert!(page.contains("href=\"/\""));
    }

    #[test]
    fn layout_renders_notification_once() {
        let page = layout("Home", Some(&Notification::error("Failed to add skill")), "<p>x</p>");
        assert_eq!(page.matches(&escape_html("Failed to add skill")).count(), 1);
        assert!(page.contains("toast error"));
    }

    #[test]
    fn capitalise_first_letter() {
        assert_eq!(capitalise("skill"), "Skill");
        assert_eq!(capitalise(""), "");
    }
}
