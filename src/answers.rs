//! Parsing of answer lists given on the command line.
//!
//! Two forms are accepted: nine values in item order (`6,6,0,0,6,0,0,0,0`)
//! or `id=value` pairs in any order (`1=6,5=6,2=6,...`). Parsing only checks
//! syntax; range and completeness are left to scoring so that those errors
//! name the offending items the same way the TUI does.

use thiserror::Error;

use crate::scoring::{ResponseSet, ITEM_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerParseError {
    #[error("no answers given")]
    Empty,
    #[error("expected {} values in item order, got {found}", ITEM_COUNT)]
    WrongCount { found: usize },
    #[error("answer {position} is not a number: {token:?}")]
    NotANumber { position: usize, token: String },
    #[error("answer {position} is not an id=value pair: {token:?}")]
    MixedForms { position: usize, token: String },
    #[error("item Q{0} answered more than once")]
    Duplicate(u8),
}

pub fn parse_answers(input: &str) -> Result<ResponseSet, AnswerParseError> {
    let tokens: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(AnswerParseError::Empty);
    }

    if tokens.iter().any(|token| token.contains('=')) {
        parse_pairs(&tokens)
    } else {
        parse_positional(&tokens)
    }
}

fn parse_number(position: usize, token: &str) -> Result<u8, AnswerParseError> {
    token.trim().parse().map_err(|_| AnswerParseError::NotANumber {
        position,
        token: token.to_string(),
    })
}

fn parse_positional(tokens: &[&str]) -> Result<ResponseSet, AnswerParseError> {
    if tokens.len() != ITEM_COUNT {
        return Err(AnswerParseError::WrongCount { found: tokens.len() });
    }

    let mut responses = ResponseSet::new();
    for (idx, token) in tokens.iter().enumerate() {
        let value = parse_number(idx + 1, token)?;
        responses.insert(idx as u8 + 1, value);
    }
    Ok(responses)
}

fn parse_pairs(tokens: &[&str]) -> Result<ResponseSet, AnswerParseError> {
    let mut responses = ResponseSet::new();
    for (idx, token) in tokens.iter().enumerate() {
        let position = idx + 1;
        let Some((id, value)) = token.split_once('=') else {
            return Err(AnswerParseError::MixedForms {
                position,
                token: token.to_string(),
            });
        };

        let id = id.trim();
        let id = id.strip_prefix(['Q', 'q']).unwrap_or(id);
        let id = parse_number(position, id)?;
        let value = parse_number(position, value)?;
        if responses.insert(id, value).is_some() {
            return Err(AnswerParseError::Duplicate(id));
        }
    }
    Ok(responses)
}
