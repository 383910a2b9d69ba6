use crate::Config;

/// Service options that travel with every check request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub options_cor: String,
    pub options_style: String,
    pub language: String,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RequestOptions {
    fn from(config: &Config) -> Self {
        Self {
            options_cor: config.options_cor.clone(),
            options_style: config.options_style.clone(),
            language: config.language.clone(),
        }
    }
}

pub type Form = Vec<(&'static str, String)>;

/// Wrap every line of `text` in a paragraph tag, the way the web editor
/// submits its content.
pub fn to_paragraphs(text: &str) -> String {
    text.split('\n').map(|line| format!("<p>{}</p>", line)).collect()
}

/// Build the form fields of a `GetTextSolution` request.
pub fn build(text: &str, options: &RequestOptions) -> Form {
    vec![
        ("FunctionName", "GetTextSolution".to_string()),
        ("texteHTML", to_paragraphs(text)),
        ("IdMax", "0".to_string()),
        ("IdMaxSousGroupeRep", "0".to_string()),
        ("writeRequest", "False".to_string()),
        ("cntRequest30", "1".to_string()),
        ("firstRequest", "True".to_string()),
        ("progression", "0".to_string()),
        ("charPrecPh", "-1".to_string()),
        ("optionsCor", options.options_cor.clone()),
        ("optionsStyle", options.options_style.clone()),
        ("corSt", "False".to_string()),
        ("plugin", "False".to_string()),
        ("langId", options.language.clone()),
        ("isSampleText", "False".to_string()),
        ("modePlugin", String::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(form: &'a Form, name: &str) -> &'a str {
        form.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap()
    }

    #[test]
    fn test_lines_become_paragraphs() {
        assert_eq!(
            to_paragraphs("Bonjour\n\nÀ demain"),
            "<p>Bonjour</p><p></p><p>À demain</p>"
        );
    }

    #[test]
    fn test_form_carries_every_field() {
        let form = build("Je sui content", &RequestOptions::default());
        let names: Vec<&str> = form.iter().map(|(key, _)| *key).collect();

        assert_eq!(
            names,
            vec![
                "FunctionName",
                "texteHTML",
                "IdMax",
                "IdMaxSousGroupeRep",
                "writeRequest",
                "cntRequest30",
                "firstRequest",
                "progression",
                "charPrecPh",
                "optionsCor",
                "optionsStyle",
                "corSt",
                "plugin",
                "langId",
                "isSampleText",
                "modePlugin",
            ]
        );
        assert_eq!(field(&form, "texteHTML"), "<p>Je sui content</p>");
        assert_eq!(field(&form, "langId"), "fr");
        assert_eq!(field(&form, "charPrecPh"), "-1");
    }

    #[test]
    fn test_options_come_from_config() {
        let config = Config {
            options_cor: "RefOrth:1".to_string(),
            ..Default::default()
        };
        let form = build("texte", &RequestOptions::from(&config));

        assert_eq!(field(&form, "optionsCor"), "RefOrth:1");
        assert_eq!(field(&form, "optionsStyle"), crate::config::DEFAULT_OPTIONS_STYLE);
    }
}
