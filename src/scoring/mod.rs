pub mod catalog;
pub mod engine;
pub mod level;
pub mod responses;
pub mod validation;

pub use catalog::{answer_label, item, Item, Subscale, ITEMS, ITEM_COUNT, MAX_ANSWER, MIN_ANSWER};
pub use engine::{compute_scores, ScoreKind, ScoreReport};
pub use level::{interpretation_for, level_of, Level};
pub use responses::ResponseSet;
pub use validation::{check_complete, validate_complete};
