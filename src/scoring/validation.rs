use super::catalog::{is_valid_answer, ITEMS, ITEM_COUNT};
use super::responses::ResponseSet;
use crate::error::ScoringError;

/// True iff all nine items are answered and every answer is within 0-6.
pub fn validate_complete(responses: &ResponseSet) -> bool {
    complete_values(responses).is_ok()
}

/// Same check as [`validate_complete`], naming what is wrong on failure.
/// Collects all problems at once (not just the first).
pub fn check_complete(responses: &ResponseSet) -> Result<(), ScoringError> {
    complete_values(responses).map(|_| ())
}

/// Answers in item order once the set is known to be complete.
pub(crate) fn complete_values(responses: &ResponseSet) -> Result<[u8; ITEM_COUNT], ScoringError> {
    let mut values = [0u8; ITEM_COUNT];
    let mut missing = Vec::new();
    let mut invalid = Vec::new();

    for (slot, item) in values.iter_mut().zip(ITEMS.iter()) {
        match responses.get(item.id) {
            Some(value) if is_valid_answer(value) => *slot = value,
            Some(value) => invalid.push((item.id, value)),
            None => missing.push(item.id),
        }
    }

    // Ids outside the catalog make the set malformed as well
    invalid.extend(
        responses
            .iter()
            .filter(|(id, _)| !ITEMS.iter().any(|item| item.id == *id)),
    );

    if missing.is_empty() && invalid.is_empty() {
        Ok(values)
    } else {
        invalid.sort_unstable();
        Err(ScoringError::IncompleteResponse { missing, invalid })
    }
}
