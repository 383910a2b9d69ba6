use crate::{Misspelling, Result, ScribensError, Span};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(rename = "SolutionCor")]
    solution_cor: SolutionCor,
}

#[derive(Debug, Deserialize)]
struct SolutionCor {
    /// Entries stay in the order the service sent them
    #[serde(rename = "MapMotSolution")]
    map_mot_solution: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawMisspelling {
    #[serde(rename = "Start_Pos")]
    start_pos: usize,
    #[serde(rename = "End_Pos")]
    end_pos: usize,
    #[serde(rename = "IdPhrase")]
    id_phrase: String,
    #[serde(rename = "vectSolution")]
    vect_solution: Vec<RawSolution>,
    #[serde(rename = "ExplicationSolution")]
    explication_solution: String,
}

#[derive(Debug, Deserialize)]
struct RawSolution {
    #[serde(rename = "Left")]
    left: String,
}

/// Parse the raw JSON returned by the service into misspellings.
pub fn parse_misspellings(json: &str) -> Result<Vec<Misspelling>> {
    let response: CheckResponse = serde_json::from_str(json)?;

    response
        .solution_cor
        .map_mot_solution
        .into_iter()
        .map(|(_, entry)| serde_json::from_value::<RawMisspelling>(entry)?.into_misspelling())
        .collect()
}

impl RawMisspelling {
    fn into_misspelling(self) -> Result<Misspelling> {
        let line = parse_line_id(&self.id_phrase)?;
        let suggestion = self
            .vect_solution
            .into_iter()
            .next()
            .map(|solution| solution.left);

        Ok(Misspelling {
            line,
            span: Span {
                start: self.start_pos,
                end: self.end_pos,
            },
            suggestion,
            annotation: first_sentence(&remove_tags(&self.explication_solution)),
        })
    }
}

/// Paragraph ids look like `p3`: strip the letter prefix and parse the index
fn parse_line_id(id: &str) -> Result<usize> {
    let digits = id.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits.parse().map_err(|_| {
        ScribensError::ResponseParseFailed(format!("invalid paragraph id: {:?}", id))
    })
}

/// Remove every HTML tag from `html`
pub fn remove_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}

/// First sentence of `text`, up to and including the first `.`
///
/// Surrounding whitespace is trimmed. Text without any `.` is returned
/// whole, no period is appended.
pub fn first_sentence(text: &str) -> String {
    match text.find('.') {
        Some(index) => text[..=index].trim().to_string(),
        None => text.trim().to_string(),
    }
}
