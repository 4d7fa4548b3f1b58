use chrono::{DateTime, Local};
use thiserror::Error;

use crate::error::ScoringError;
use crate::scoring::{self, ResponseSet, ScoreReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Collecting,
    Submitted,
    Reviewing,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Collecting => "collecting",
            SessionState::Submitted => "submitted",
            SessionState::Reviewing => "reviewing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("answers can only be changed while collecting (session is {})", .0.label())]
    NotCollecting(SessionState),
    #[error("unknown item Q{0}")]
    UnknownItem(u8),
    #[error("answer {value} for Q{id} is outside 0-6")]
    OutOfRange { id: u8, value: u8 },
    #[error("no submission to review")]
    NothingSubmitted,
    #[error(transparent)]
    Incomplete(#[from] ScoringError),
}

/// Answers frozen at submission together with their scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub responses: ResponseSet,
    pub report: ScoreReport,
    pub submitted_at: DateTime<Local>,
}

/// One respondent's questionnaire session.
///
/// Owned by the shell and passed into its handlers. The draft is edited
/// while collecting; `submit` freezes a copy and scores it.
pub struct Session {
    state: SessionState,
    draft: ResponseSet,
    submission: Option<Submission>,
    clock: Box<dyn Fn() -> DateTime<Local> + Send>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .field("submission", &self.submission)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_clock(Local::now)
    }

    /// Session whose submission timestamps come from `clock`.
    pub fn with_clock(clock: impl Fn() -> DateTime<Local> + Send + 'static) -> Self {
        Self {
            state: SessionState::Collecting,
            draft: ResponseSet::new(),
            submission: None,
            clock: Box::new(clock),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn draft(&self) -> &ResponseSet {
        &self.draft
    }

    pub fn answer(&self, id: u8) -> Option<u8> {
        self.draft.get(id)
    }

    pub fn answered_count(&self) -> usize {
        self.draft.len()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn report(&self) -> Option<&ScoreReport> {
        self.submission.as_ref().map(|s| &s.report)
    }

    pub fn submitted_responses(&self) -> Option<&ResponseSet> {
        self.submission.as_ref().map(|s| &s.responses)
    }

    pub fn submitted_at(&self) -> Option<DateTime<Local>> {
        self.submission.as_ref().map(|s| s.submitted_at)
    }

    pub fn set_response(&mut self, id: u8, value: u8) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        if scoring::item(id).is_none() {
            return Err(SessionError::UnknownItem(id));
        }
        if !scoring::catalog::is_valid_answer(value) {
            return Err(SessionError::OutOfRange { id, value });
        }
        self.draft.insert(id, value);
        Ok(())
    }

    pub fn clear_response(&mut self, id: u8) -> Result<(), SessionError> {
        self.ensure_collecting()?;
        self.draft.remove(id);
        Ok(())
    }

    /// Freeze and score the draft.
    ///
    /// On an incomplete draft the session stays in `Collecting` and the
    /// error names the unanswered items.
    pub fn submit(&mut self) -> Result<&ScoreReport, SessionError> {
        self.ensure_collecting()?;
        let responses = self.draft.clone();
        let report = scoring::compute_scores(&responses)?;
        let submitted_at = (self.clock)();

        tracing::debug!(
            overall = report.overall,
            vigor = report.vigor,
            dedication = report.dedication,
            absorption = report.absorption,
            "questionnaire submitted"
        );

        self.state = SessionState::Submitted;
        let submission = self.submission.insert(Submission {
            responses,
            report,
            submitted_at,
        });
        Ok(&submission.report)
    }

    /// Submitted -> Reviewing. Already reviewing is a no-op.
    pub fn begin_review(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Submitted | SessionState::Reviewing => {
                self.state = SessionState::Reviewing;
                Ok(())
            }
            SessionState::Collecting => Err(SessionError::NothingSubmitted),
        }
    }

    /// Back to collecting with the submitted answers kept as the draft.
    pub fn revise(&mut self) -> Result<(), SessionError> {
        let submission = self.submission.take().ok_or(SessionError::NothingSubmitted)?;
        self.draft = submission.responses;
        self.state = SessionState::Collecting;
        Ok(())
    }

    /// Start over with an empty response set.
    pub fn reset(&mut self) {
        self.draft = ResponseSet::new();
        self.submission = None;
        self.state = SessionState::Collecting;
        tracing::debug!("session reset");
    }

    fn ensure_collecting(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Collecting {
            Ok(())
        } else {
            Err(SessionError::NotCollecting(self.state))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_session() -> Session {
        Session::with_clock(|| Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }

    fn fill(session: &mut Session, value: u8) {
        for id in 1..=9 {
            session.set_response(id, value).unwrap();
        }
    }

    #[test]
    fn test_starts_collecting_and_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.answered_count(), 0);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_submit_incomplete_stays_collecting() {
        let mut session = fixed_session();
        session.set_response(1, 4).unwrap();
        let err = session.submit().unwrap_err();
        match err {
            SessionError::Incomplete(inner) => {
                assert_eq!(inner.item_ids(), vec![2, 3, 4, 5, 6, 7, 8, 9]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.state(), SessionState::Collecting);
        assert!(session.report().is_none());
    }

    #[test]
    fn test_submit_complete() {
        let mut session = fixed_session();
        fill(&mut session, 6);
        let report = *session.submit().unwrap();
        assert_eq!(report.overall, 6.0);
        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(
            session.submitted_at(),
            Some(Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_submission_is_frozen() {
        let mut session = fixed_session();
        fill(&mut session, 2);
        session.submit().unwrap();
        assert_eq!(
            session.set_response(1, 5),
            Err(SessionError::NotCollecting(SessionState::Submitted))
        );
        assert_eq!(session.submitted_responses().and_then(|r| r.get(1)), Some(2));
    }

    #[test]
    fn test_review_then_revise_keeps_answers() {
        let mut session = fixed_session();
        fill(&mut session, 3);
        session.submit().unwrap();
        session.begin_review().unwrap();
        assert_eq!(session.state(), SessionState::Reviewing);

        session.revise().unwrap();
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.answered_count(), 9);
        assert!(session.report().is_none());

        session.set_response(4, 6).unwrap();
        let report = session.submit().unwrap();
        assert!((report.dedication - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = fixed_session();
        fill(&mut session, 5);
        session.submit().unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::Collecting);
        assert_eq!(session.answered_count(), 0);
        assert!(session.submission().is_none());
    }

    #[test]
    fn test_review_requires_submission() {
        let mut session = fixed_session();
        assert_eq!(session.begin_review(), Err(SessionError::NothingSubmitted));
        assert_eq!(session.revise(), Err(SessionError::NothingSubmitted));
    }

    #[test]
    fn test_rejects_bad_answers() {
        let mut session = fixed_session();
        assert_eq!(session.set_response(0, 3), Err(SessionError::UnknownItem(0)));
        assert_eq!(session.set_response(10, 3), Err(SessionError::UnknownItem(10)));
        assert_eq!(
            session.set_response(2, 7),
            Err(SessionError::OutOfRange { id: 2, value: 7 })
        );
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_clear_response() {
        let mut session = fixed_session();
        session.set_response(3, 1).unwrap();
        session.clear_response(3).unwrap();
        assert_eq!(session.answer(3), None);
    }
}
