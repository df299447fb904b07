//! HTML rendering. Plain `format!` pages; every dynamic value goes through [`escape`].

use crate::core::visitor::VisitorState;
use crate::ledger::LedgerTable;
use crate::settings::Settings;
use chrono::NaiveDate;

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn text<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

fn layout(settings: &Settings, body: &str) -> String {
    let title = escape(text(&settings.page_title, "Registro de asistencia"));
    let logo = match settings.logo_url.as_deref() {
        Some(url) if !url.is_empty() => {
            format!("<img class=\"logo\" src=\"{}\" alt=\"logo\">", escape(url))
        }
        _ => String::new(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{logo}\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

pub(crate) fn form(settings: &Settings) -> String {
    let subtitle = escape(text(&settings.subtitle, ""));
    if !settings.form_is_enabled() {
        return layout(
            settings,
            &format!("<p>{subtitle}</p>\n<p class=\"closed\">El formulario no está disponible.</p>"),
        );
    }

    let mut fields = format!(
        "<label>{}<input name=\"name\" required></label>\n\
         <label>Apellido<input name=\"lastname\" required></label>\n",
        escape(text(&settings.form_name_label, "Nombre"))
    );
    if settings.question_1_enabled() {
        fields.push_str(&format!(
            "<label>{}<input name=\"question1\"></label>\n",
            escape(settings.question_1_label())
        ));
    }
    if settings.question_2_enabled() {
        fields.push_str(&format!(
            "<label>{}<input name=\"question2\"></label>\n",
            escape(settings.question_2_label())
        ));
    }

    layout(
        settings,
        &format!(
            "<p>{subtitle}</p>\n<form method=\"post\" action=\"/submit\">\n{fields}<button type=\"submit\">{}</button>\n</form>",
            escape(text(&settings.submit_button_label, "Enviar"))
        ),
    )
}

pub(crate) fn success(settings: &Settings, visitor: Option<&VisitorState>) -> String {
    let who = match visitor {
        Some(v) if !v.full_name().trim().is_empty() => {
            format!("<p class=\"who\">{}</p>", escape(&v.full_name()))
        }
        _ => String::new(),
    };
    let answer = match visitor {
        Some(v) if !v.question_1.is_empty() => format!(
            "<p>{}: {}</p>",
            escape(settings.question_1_label()),
            escape(&v.question_1)
        ),
        _ => String::new(),
    };
    layout(
        settings,
        &format!("<h2>¡Asistencia registrada!</h2>\n{who}\n{answer}"),
    )
}

/// `Ya te has registrado hoy.` plus ` (<full name>)` when there is one.
pub(crate) fn duplicate_subtitle(visitor: &VisitorState) -> String {
    let full_name = visitor.full_name();
    let mut subtitle = "Ya te has registrado hoy.".to_string();
    if !full_name.trim().is_empty() {
        subtitle.push_str(&format!(" ({full_name})"));
    }
    subtitle
}

pub(crate) fn already_logged_in(settings: &Settings, subtitle: &str) -> String {
    layout(
        settings,
        &format!("<p class=\"subtitle\">{}</p>", escape(subtitle)),
    )
}

pub(crate) fn admin_settings(settings: &Settings) -> String {
    let input = |key: &str, value: &Option<String>| {
        format!(
            "<label>{key}<input name=\"{key}\" value=\"{}\"></label>\n",
            escape(value.as_deref().unwrap_or(""))
        )
    };
    let checkbox = |key: &str, on: bool| {
        format!(
            "<label><input type=\"checkbox\" name=\"{key}\"{}> {key}</label>\n",
            if on { " checked" } else { "" }
        )
    };

    let mut body = String::from("<h2>Configuración</h2>\n<form method=\"post\" action=\"/admin/settings\">\n");
    body.push_str(&input("page_title", &settings.page_title));
    body.push_str(&input("subtitle", &settings.subtitle));
    body.push_str(&input("logo_url", &settings.logo_url));
    body.push_str(&input("form_name_label", &settings.form_name_label));
    body.push_str(&checkbox("enable_question_1", settings.question_1_enabled()));
    body.push_str(&input("question_1_label", &settings.question_1_label));
    body.push_str(&checkbox("enable_question_2", settings.question_2_enabled()));
    body.push_str(&input("question_2_label", &settings.question_2_label));
    body.push_str(&input("submit_button_label", &settings.submit_button_label));
    body.push_str(&checkbox("form_enabled", settings.form_is_enabled()));
    body.push_str("<button type=\"submit\">Guardar</button>\n</form>\n");
    body.push_str("<p><a href=\"/admin/logs\">Registros</a></p>");

    layout(settings, &body)
}

pub(crate) fn admin_logs(settings: &Settings, date: NaiveDate, table: &LedgerTable) -> String {
    let mut body = format!("<h2>Registros {date}</h2>\n");

    if table.headers().is_empty() {
        body.push_str("<p>No hay registros para hoy.</p>\n");
    } else {
        body.push_str("<table>\n<tr>");
        for h in table.headers() {
            body.push_str(&format!("<th>{}</th>", escape(h)));
        }
        body.push_str("</tr>\n");
        for row in table.rows() {
            body.push_str("<tr>");
            for cell in table.aligned(row) {
                body.push_str(&format!("<td>{}</td>", escape(cell.as_deref().unwrap_or(""))));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</table>\n");
    }

    body.push_str(
        "<p><a href=\"/admin/download\">Descargar</a> | <a href=\"/admin/clear\">Borrar</a> | \
         <a href=\"/admin/settings\">Configuración</a></p>",
    );
    layout(settings, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"Ana\" & 'Lu'</b>"), "&lt;b&gt;&quot;Ana&quot; &amp; &#39;Lu&#39;&lt;/b&gt;");
    }

    #[test]
    fn duplicate_subtitle_names_the_visitor() {
        let v = VisitorState {
            duplicate_attempt: true,
            name: "Ana".into(),
            lastname: "Lopez".into(),
            question_1: String::new(),
        };
        assert_eq!(duplicate_subtitle(&v), "Ya te has registrado hoy. (Ana Lopez)");
        assert_eq!(
            duplicate_subtitle(&VisitorState::default()),
            "Ya te has registrado hoy."
        );
    }

    #[test]
    fn disabled_form_hides_inputs() {
        let mut s = Settings::minimal();
        s.form_enabled = Some(false);
        let html = form(&s);
        assert!(!html.contains("<form"));
        assert!(html.contains("no está disponible"));
    }

    #[test]
    fn form_lists_only_enabled_questions() {
        let mut s = Settings::minimal();
        s.question_1_label = Some("Teléfono".into());
        let html = form(&s);
        assert!(html.contains("name=\"question1\""));
        assert!(html.contains("Teléfono"));
        assert!(!html.contains("name=\"question2\""));
    }
}
