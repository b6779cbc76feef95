use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::listing::AnimalRecord;

/// Stylesheet for the published page; kept inline so the document is
/// self-contained.
const PAGE_STYLE: &str = "p { margin: 40px 0 20px 0 !important; text-align: center; \
font-size: 16px; font-family: \"Open Sans\",sans-serif } \
a.button{ -webkit-appearance: button; -moz-appearance: button; appearance: button; \
display: inline; text-decoration: none; color: #fff; background-color: #e2737e; \
margin: 20px; border-radius: 20px; min-width: 200px !important; padding: 10px; }";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Adoption form URL up to and including its query parameter, e.g.
    /// `https://example.org/adopt?animal_name=`.
    pub adoption_form_url: String,
    /// Image shown for a record whose photo field is empty.
    pub default_image_url: String,
}

/// Build the call-to-action href for one animal.
///
/// The name goes into the URL as a form-encoded query value, so reserved
/// characters in animal names cannot break the link.
pub fn adoption_link(form_url: &str, name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("{form_url}{encoded}")
}

/// Render the full HTML document: a dated header followed by one block per
/// record, in record order. Deterministic apart from `run_time`.
pub fn render(records: &[AnimalRecord], run_time: DateTime<Local>, options: &RenderOptions) -> String {
    let run_date = run_time.format("%A, %B %d, %Y");

    let mut html = String::new();
    html.push_str("<html>\n<head>\n<style>");
    html.push_str(PAGE_STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    let _ = write!(html, "<b><p>Updated on {run_date}</p></b>");

    for record in records {
        let photo = if record.photo_url.is_empty() {
            &options.default_image_url
        } else {
            &record.photo_url
        };
        let link = adoption_link(&options.adoption_form_url, &record.name);
        let _ = write!(
            html,
            "\n<p><img src=\"{photo}\" style=\"padding-bottom:10px;\"><br>{name}<br><br><br>\
<a href=\"{link}\" target=\"_blank\" class=\"button\">Apply to Adopt</a></p>",
            name = record.name,
        );
    }

    html.push_str("\n</body>\n</html>");
    html
}
