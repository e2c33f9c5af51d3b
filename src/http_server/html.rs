//! HTML rendering for portal pages.
//!
//! Page bodies are placeholders named after their view; the shell around
//! them is the part that carries role-dependent content.

use std::fmt::Write;

use crate::portal::shell::{ShellView, BRAND};
use crate::portal::View;

/// Escape text for HTML element and attribute content
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            c => output.push(c),
        }
    }
    output
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | {}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        BRAND,
        body
    )
}

fn view_body(view: View) -> String {
    format!(
        "<section class=\"view\" data-view=\"{}\">\n<h3>{}</h3>\n</section>\n",
        view.slug(),
        escape_html(view.title())
    )
}

/// Page outside the authenticated shell
pub fn render_public_page(view: View) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<header><h1>{}</h1></header>", BRAND);
    let _ = write!(body, "<main>\n{}</main>\n", view_body(view));
    document(view.title(), &body)
}

/// Page inside the authenticated shell
pub fn render_shell_page(shell: &ShellView<View>) -> String {
    let mut body = String::new();

    body.push_str("<aside class=\"sidebar\">\n");
    let _ = writeln!(body, "<h1>{}</h1>", shell.brand);
    let _ = writeln!(body, "<p class=\"portal\">{}</p>", escape_html(shell.portal_label));
    body.push_str("<nav>\n");
    for link in &shell.navigation {
        let entry = &link.entry;
        let (class, current) = if link.active {
            ("nav-link active", " aria-current=\"page\"")
        } else {
            ("nav-link", "")
        };
        let _ = write!(
            body,
            "<a class=\"{}\" href=\"{}\"{} data-icon=\"{}\"><span>{}</span>",
            class,
            escape_html(entry.path),
            current,
            entry.icon.as_str(),
            escape_html(entry.label)
        );
        if let Some(description) = entry.description {
            let _ = write!(body, "<small>{}</small>", escape_html(description));
        }
        body.push_str("</a>\n");
    }
    body.push_str("</nav>\n</aside>\n");

    body.push_str("<main>\n<header class=\"topbar\">\n");
    let _ = writeln!(body, "<h2>{}</h2>", escape_html(shell.header_title));
    if shell.show_create_webinar {
        body.push_str("<button type=\"button\" class=\"create-webinar\">Create Webinar</button>\n");
    }
    body.push_str(
        "<form method=\"post\" action=\"/logout\"><button type=\"submit\" class=\"logout\">Log out</button></form>\n",
    );
    body.push_str("</header>\n<div class=\"content\">\n");
    body.push_str(&view_body(shell.content));
    body.push_str("</div>\n</main>\n");

    document(shell.header_title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{render, Role};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape_html("+ Post/Edit mentor profile"), "+ Post/Edit mentor profile");
    }

    #[test]
    fn test_mentor_shell_page() {
        let shell = render(Role::Mentor, "/dashboard/mentors", View::Mentors);
        let html = render_shell_page(&shell);

        assert!(html.contains("Mentor Dashboard"));
        assert!(html.contains("Mentor Portal"));
        assert!(html.contains("Create Webinar"));
        assert!(html.contains("+ Post/Edit mentor profile"));
        assert!(html.contains(
            "<a class=\"nav-link active\" href=\"/dashboard/mentors\" aria-current=\"page\""
        ));
        assert!(html.contains("data-view=\"mentors\""));
    }

    #[test]
    fn test_student_shell_page() {
        let shell = render(Role::Student, "/dashboard", View::Dashboard);
        let html = render_shell_page(&shell);

        assert!(html.contains("Student Dashboard"));
        assert!(!html.contains("Create Webinar"));
        assert!(html.contains("View mentors"));
        assert_eq!(html.matches("aria-current=\"page\"").count(), 1);
        assert!(html.contains("action=\"/logout\""));
    }

    #[test]
    fn test_public_page_has_no_shell() {
        let html = render_public_page(View::Login);
        assert!(html.contains("Sign In"));
        assert!(!html.contains("sidebar"));
        assert!(!html.contains("/logout"));
    }
}
