use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Scoring was attempted on a set with missing ids or out-of-range values.
    #[error("incomplete response: {}", incomplete_detail(.missing, .invalid))]
    IncompleteResponse {
        missing: Vec<u8>,
        invalid: Vec<(u8, u8)>,
    },
}

impl ScoringError {
    /// Every item id the respondent has to answer (again), ascending.
    pub fn item_ids(&self) -> Vec<u8> {
        match self {
            ScoringError::IncompleteResponse { missing, invalid } => {
                let mut ids: Vec<u8> = missing
                    .iter()
                    .copied()
                    .chain(invalid.iter().map(|(id, _)| *id))
                    .collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            }
        }
    }
}

fn incomplete_detail(missing: &[u8], invalid: &[(u8, u8)]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(|id| format!("Q{}", id)).collect();
        parts.push(format!("missing {}", ids.join(", ")));
    }
    if !invalid.is_empty() {
        let pairs: Vec<String> = invalid
            .iter()
            .map(|(id, value)| format!("Q{}={}", id, value))
            .collect();
        parts.push(format!("invalid {}", pairs.join(", ")));
    }
    parts.join("; ")
}
