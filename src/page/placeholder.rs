//! Translation placeholders left in rendered output, and the link-confirmation strings.

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use serde_json::{
    Map,
    Value,
};

use crate::translator::Translator;

/// Global name the injected script assigns the link-confirmation strings to.
pub const LINK_CONFIRM_GLOBAL: &str = "__linkConfirmI18n";

/// `{{ trans('key') }}` and `{{ 'key' | trans }}`, with raw or entity-escaped quotes.
static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    const QUOTE: &str = r#"(?:'|"|&#39;|&#x27;|&quot;)"#;
    const KEY: &str = r"[^'\x22<>{}&]+";
    Regex::new(&format!(
        r"\{{\{{\s*trans\(\s*{QUOTE}(?P<call>{KEY}){QUOTE}\s*\)\s*\}}\}}|\{{\{{\s*{QUOTE}(?P<filter>{KEY}){QUOTE}\s*\|\s*trans\s*\}}\}}"
    ))
});

/// Replaces every translation placeholder with its value in `language`.
///
/// Values are HTML-escaped. Output is unchanged when nothing matches.
#[must_use]
pub fn substitute_placeholders(html: &str, translator: &Translator, language: &str) -> String {
    let Ok(pattern) = PLACEHOLDER.as_ref() else {
        return html.to_string();
    };

    pattern
        .replace_all(html, |caps: &Captures<'_>| {
            let key = caps.name("call").or_else(|| caps.name("filter")).map_or("", |m| m.as_str());
            escape_html(translator.translate(key.trim(), Some(language)))
        })
        .into_owned()
}

/// Inserts the link-confirmation script before the last `</body>`.
///
/// Appended at the end when the page has no `</body>`.
#[must_use]
pub fn inject_link_confirm_script(
    html: &str,
    translator: &Translator,
    language: &str,
    keys: &[String],
) -> String {
    let script = link_confirm_script(translator, language, keys);

    match html.rfind("</body>") {
        Some(position) => {
            let mut output = String::with_capacity(html.len() + script.len());
            output.push_str(html.get(..position).unwrap_or_default());
            output.push_str(&script);
            output.push_str(html.get(position..).unwrap_or_default());
            output
        }
        None => format!("{html}{script}"),
    }
}

/// `<script>window.__linkConfirmI18n = {"lang": …, "<key>": …};</script>`
#[must_use]
pub fn link_confirm_script(translator: &Translator, language: &str, keys: &[String]) -> String {
    let mut strings = Map::new();
    strings.insert("lang".to_string(), Value::String(language.to_string()));
    for key in keys {
        strings.insert(
            key.clone(),
            Value::String(translator.translate(key, Some(language)).to_string()),
        );
    }

    // `<` escaped so no value can close the script element.
    let payload = Value::Object(strings).to_string().replace('<', "\\u003c");
    format!("<script>window.{LINK_CONFIRM_GLOBAL} = {payload};</script>")
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::input::{
        CatalogStore,
        StructuredStore,
    };

    #[fixture]
    fn translator() -> Translator {
        let mut tables = HashMap::new();
        tables.insert(
            "en".to_string(),
            [
                ("footer.note", "Built with <care>"),
                ("link_confirm.title", "Leave site?"),
                ("link_confirm.confirm", "Continue"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        );
        tables.insert(
            "fr".to_string(),
            [("footer.note", "Fait avec soin"), ("link_confirm.title", "Quitter le site ?")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        Translator::from_stores(
            "en".to_string(),
            StructuredStore::from_tables(tables),
            CatalogStore::default(),
        )
    }

    #[rstest]
    #[case::call_single_quotes("<p>{{ trans('footer.note') }}</p>")]
    #[case::call_double_quotes("<p>{{trans(\"footer.note\")}}</p>")]
    #[case::filter("<p>{{ 'footer.note' | trans }}</p>")]
    #[case::filter_escaped_quotes("<p>{{ &quot;footer.note&quot;|trans }}</p>")]
    #[case::call_escaped_apostrophes("<p>{{ trans(&#39;footer.note&#39;) }}</p>")]
    fn substitutes_placeholder_forms(translator: Translator, #[case] html: &str) {
        assert_eq!(substitute_placeholders(html, &translator, "fr"), "<p>Fait avec soin</p>");
    }

    #[rstest]
    fn substituted_values_are_escaped(translator: Translator) {
        let output = substitute_placeholders("{{ trans('footer.note') }}", &translator, "de");

        assert_eq!(output, "Built with &lt;care&gt;");
    }

    #[rstest]
    fn unknown_keys_render_as_key(translator: Translator) {
        let output = substitute_placeholders("<i>{{ trans('nope.key') }}</i>", &translator, "fr");

        assert_eq!(output, "<i>nope.key</i>");
    }

    #[rstest]
    fn text_without_placeholders_is_unchanged(translator: Translator) {
        let html = "<p>{{ not a placeholder }} and {{ trans(key) }}</p>";

        assert_eq!(substitute_placeholders(html, &translator, "fr"), html);
    }

    #[rstest]
    fn injects_before_closing_body(translator: Translator) {
        let keys = vec!["link_confirm.title".to_string(), "link_confirm.confirm".to_string()];

        let output = inject_link_confirm_script(
            "<html><body><p>x</p></body></html>",
            &translator,
            "fr",
            &keys,
        );

        let start = output.find(" = ").unwrap() + 3;
        let end = output.find(";</script>").unwrap();
        let payload: Value = serde_json::from_str(&output[start..end]).unwrap();
        assert_eq!(
            payload,
            json!({
                "lang": "fr",
                "link_confirm.title": "Quitter le site ?",
                "link_confirm.confirm": "Continue"
            })
        );
        assert!(output.starts_with("<html><body><p>x</p><script>window.__linkConfirmI18n = "));
        assert!(output.ends_with("</script></body></html>"));
    }

    #[rstest]
    fn appends_without_body(translator: Translator) {
        let output = inject_link_confirm_script("<p>fragment</p>", &translator, "en", &[]);

        assert_eq!(
            output,
            "<p>fragment</p><script>window.__linkConfirmI18n = {\"lang\":\"en\"};</script>"
        );
    }

    #[rstest]
    fn payload_cannot_close_script(translator: Translator) {
        let script = link_confirm_script(&translator, "en", &["footer.note".to_string()]);

        assert!(!script.contains("<care>"));
        assert!(script.contains("\\u003ccare>"));
        assert_eq!(script.matches("</script>").count(), 1);
    }
}
