//! HTML for the single-page form.

use std::fmt::Write;

use crate::api::{ClassificationOutcome, ClassificationRequest};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The form, pre-filled with `request`, followed by notices and topic lines.
pub fn page(request: &ClassificationRequest, outcome: Option<&ClassificationOutcome>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Article topic</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n\
         <h1 style=\"text-align: center;\">Find out the topic of the article</h1>\n\
         <h2 style=\"text-align: center;\">Please enter title or summary</h2>\n",
    );

    // writing into a String cannot fail
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"title\">TITLE</label>\n\
         <input type=\"text\" id=\"title\" name=\"title\" value=\"{}\">\n\
         <label for=\"summary\">SUMMARY</label>\n\
         <textarea id=\"summary\" name=\"summary\">{}</textarea>\n\
         <button type=\"submit\">Submit</button>\n</form>\n",
        escape(&request.title),
        escape(&request.summary),
    );

    if let Some(outcome) = outcome {
        html.push_str("<section class=\"results\">\n");
        for notice in &outcome.notices {
            let _ = writeln!(html, "<p class=\"notice\"><strong>{}</strong></p>", escape(notice.message()));
        }
        for score in &outcome.topics {
            let _ = writeln!(
                html,
                "<p class=\"topic\">Topic: <strong class=\"label\">{}</strong>, \
                 probability: <strong class=\"probability\">{}%</strong></p>",
                escape(score.label),
                score.probability
            );
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
