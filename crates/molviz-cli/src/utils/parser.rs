use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE (e.g., 'camera.margin=2.0').")]
    MissingSeparator(String),

    #[error("Configuration key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Key '{0}' must be written as 'section.key' (e.g., 'bonds.color').")]
    MissingSection(String),
}

/// A parsed `-S section.key=value` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetValue<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl SetValue<'_> {
    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.key)
    }
}

pub fn parse_set_value(input: &str) -> Result<SetValue<'_>, ParseError> {
    let (path, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(ParseError::EmptyKey(input.to_string()));
    }
    let (section, key) = path
        .split_once('.')
        .filter(|(section, key)| !section.is_empty() && !key.is_empty())
        .ok_or_else(|| ParseError::MissingSection(path.to_string()))?;
    Ok(SetValue {
        section,
        key,
        value: value.trim(),
    })
}

/// Joins the words of a molecule name given as separate arguments.
pub fn join_name(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_section_key_and_value() {
        let parsed = parse_set_value("bonds.color=#112233").unwrap();
        assert_eq!(parsed.section, "bonds");
        assert_eq!(parsed.key, "color");
        assert_eq!(parsed.value, "#112233");
        assert_eq!(parsed.path(), "bonds.color");
    }

    #[test]
    fn value_may_contain_equals_signs() {
        let parsed = parse_set_value("lookup.pubchem-url=http://x/?a=b").unwrap();
        assert_eq!(parsed.value, "http://x/?a=b");
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert_eq!(
            parse_set_value("camera.margin"),
            Err(ParseError::MissingSeparator("camera.margin".to_string()))
        );
        assert_eq!(
            parse_set_value("=3"),
            Err(ParseError::EmptyKey("=3".to_string()))
        );
        assert_eq!(
            parse_set_value("margin=3"),
            Err(ParseError::MissingSection("margin".to_string()))
        );
        assert_eq!(
            parse_set_value("camera.=3"),
            Err(ParseError::MissingSection("camera.".to_string()))
        );
    }

    #[test]
    fn joins_words_with_single_spaces() {
        let words = vec!["carbon".to_string(), " dioxide ".to_string(), String::new()];
        assert_eq!(join_name(&words), "carbon dioxide");
        assert_eq!(join_name(&[]), "");
    }
}
