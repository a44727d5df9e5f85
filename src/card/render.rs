//! Card renderer
//!
//! A pure function from `{record, loading, theme}` to markup. The output
//! always replaces the previous markup, so rendering the same state twice
//! yields identical bytes.

use super::record::UserRecord;
use super::state::Theme;

/// Scoped styles for the shadow root
const STYLE: &str = r#"<style>
  :host { display: block; border: 1px solid #ccc; padding: 10px; }
  :host([theme="dark"]) { background: #333; color: #fff; }
  .loader { color: blue; }
</style>"#;

/// Text of the loading indicator
pub const LOADING_TEXT: &str = "Loading...";

/// Text shown when no record is present
pub const PLACEHOLDER_TEXT: &str = "No user data";

/// Render the card markup
pub fn render_card(user: Option<&UserRecord>, loading: bool, theme: Theme) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(STYLE);
    html.push('\n');
    html.push_str(&format!(
        "<div class=\"card\" data-theme=\"{}\">\n",
        theme.as_str()
    ));

    if loading {
        html.push_str(&format!("  <span class=\"loader\">{}</span>\n", LOADING_TEXT));
    }

    match user {
        Some(user) => {
            html.push_str(&format!(
                "  <h2>{}</h2><p>{}</p>\n",
                html_escape::encode_text(user.display_name()),
                html_escape::encode_text(user.display_email())
            ));
        }
        None => {
            html.push_str(&format!("  <p>{}</p>\n", PLACEHOLDER_TEXT));
        }
    }

    html.push_str("  <button id=\"refresh-btn\">Refresh</button>\n");
    html.push_str("</div>\n");
    html
}
