//! Rewrites the `base` of the theme's embedded JSON configuration script.

use regex::Regex;
use serde_json::Value;

use crate::types::relative_root;

/// Locates `<script id="<id>" type="application/json">…</script>` by exact tag match.
#[derive(Debug, Clone)]
pub struct BasePathRewriter {
    pattern: Regex,
}

impl BasePathRewriter {
    /// # Errors
    /// Never in practice: the script id is escaped before compiling.
    pub fn new(script_id: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"(?s)<script id="{}" type="application/json">(.*?)</script>"#,
            regex::escape(script_id)
        ))?;
        Ok(Self { pattern })
    }

    /// Points `base` at the site root when the page is not in the default locale.
    ///
    /// Pages in the default locale, pages without the script, and payloads
    /// that are not a JSON object come back unchanged.
    #[must_use]
    pub fn rewrite(
        &self,
        html: &str,
        page_url: &str,
        page_locale: &str,
        default_locale: &str,
    ) -> String {
        if page_locale == default_locale {
            return html.to_string();
        }

        let Some(payload) = self.pattern.captures(html).and_then(|c| c.get(1)) else {
            tracing::debug!(page_url, "No embedded config script");
            return html.to_string();
        };

        let mut config = match serde_json::from_str::<Value>(payload.as_str()) {
            Ok(Value::Object(config)) => config,
            Ok(_) => {
                tracing::debug!(page_url, "Embedded config is not an object");
                return html.to_string();
            }
            Err(err) => {
                tracing::debug!(page_url, ?err, "Embedded config is not valid JSON");
                return html.to_string();
            }
        };

        config.insert("base".to_string(), Value::String(relative_root(page_url)));
        let Ok(rewritten) = serde_json::to_string(&config) else {
            return html.to_string();
        };

        let mut output = String::with_capacity(html.len() + 8);
        output.push_str(html.get(..payload.start()).unwrap_or_default());
        output.push_str(&rewritten);
        output.push_str(html.get(payload.end()..).unwrap_or_default());
        output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[fixture]
    fn rewriter() -> BasePathRewriter {
        BasePathRewriter::new("__config").unwrap()
    }

    fn page(config: &str) -> String {
        format!(
            "<html><head></head><body><main>x</main>\
             <script id=\"__config\" type=\"application/json\">{config}</script>\
             <script src=\"../assets/bundle.js\"></script></body></html>"
        )
    }

    fn embedded_config(html: &str) -> Value {
        let start = html.find("application/json\">").unwrap() + "application/json\">".len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[rstest]
    fn rewrites_base_for_non_default_locale(rewriter: BasePathRewriter) {
        let html = page(r#"{"base": ".", "features": ["navigation.tabs"]}"#);

        let output = rewriter.rewrite(&html, "fr/guide/", "fr", "en");

        assert_eq!(
            embedded_config(&output),
            json!({"base": "../..", "features": ["navigation.tabs"]})
        );
        assert!(output.ends_with("<script src=\"../assets/bundle.js\"></script></body></html>"));
        assert!(output.starts_with("<html><head></head><body><main>x</main>"));
    }

    #[rstest]
    fn adds_base_when_absent(rewriter: BasePathRewriter) {
        let output = rewriter.rewrite(&page("{}"), "fr/", "fr", "en");

        assert_eq!(embedded_config(&output), json!({"base": ".."}));
    }

    #[rstest]
    fn default_locale_is_untouched(rewriter: BasePathRewriter) {
        let html = page(r#"{"base": "."}"#);

        assert_eq!(rewriter.rewrite(&html, "guide/", "en", "en"), html);
    }

    #[rstest]
    #[case::invalid_json(r#"{"base": "#)]
    #[case::not_an_object(r#"["base"]"#)]
    fn bad_payload_is_untouched(rewriter: BasePathRewriter, #[case] config: &str) {
        let html = page(config);

        assert_eq!(rewriter.rewrite(&html, "fr/guide/", "fr", "en"), html);
    }

    #[rstest]
    fn missing_script_is_untouched(rewriter: BasePathRewriter) {
        let html = "<html><body><script type=\"application/json\">{}</script></body></html>";

        assert_eq!(rewriter.rewrite(html, "fr/", "fr", "en"), html);
    }

    #[rstest]
    fn custom_script_id_is_matched_literally() {
        let rewriter = BasePathRewriter::new("cfg.v2").unwrap();
        let other = "<script id=\"cfgXv2\" type=\"application/json\">{}</script>";
        let target = "<script id=\"cfg.v2\" type=\"application/json\">{}</script>";

        assert_eq!(rewriter.rewrite(other, "fr/", "fr", "en"), other);
        assert_eq!(
            rewriter.rewrite(target, "fr/", "fr", "en"),
            "<script id=\"cfg.v2\" type=\"application/json\">{\"base\":\"..\"}</script>"
        );
    }
}
