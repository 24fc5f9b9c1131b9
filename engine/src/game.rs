//! Game session state machine.
//!
//! One session spans many rounds. Score and streak are session-scoped and
//! survive across rounds; the question, the selected option, and the
//! feedback line are round-scoped and replaced by each fetch.

use tldq_api::{ApiClient, ApiError};
use tldq_types::Question;

/// Fixed reward for a correct guess.
pub const CORRECT_GUESS_POINTS: u32 = 10;

/// Shown when a question fetch fails; the round stays retryable.
const FETCH_FAILED_MESSAGE: &str = "Could not load question. Is the backend running?";

/// Where the current round stands.
///
/// A failed fetch is its own phase rather than a loading/question boolean
/// pair, which rules out the invalid "not loading, no question, no error"
/// combination. `Failed` means "retry available", not "awaiting a guess".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPhase {
    /// A question fetch is in flight.
    Loading,
    /// A question is installed and a guess may be submitted.
    Ready(Question),
    /// The last fetch failed; the reason doubles as the feedback line.
    Failed(String),
}

/// Ties an in-flight question fetch to the round that issued it.
///
/// [`GameSession::finish_round`] discards the result of any fetch that has
/// been superseded by a newer [`GameSession::begin_round`], so only the most
/// recent request mutates session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket that is never finished leaves the session loading"]
pub struct FetchTicket(u64);

/// What a guess submission did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect { answer: String },
    /// No question to guess against, the round was already answered, or the
    /// guess was not one of the offered options. State is unchanged.
    Rejected,
}

#[derive(Debug)]
pub struct GameSession {
    phase: RoundPhase,
    selected: Option<String>,
    feedback: Option<String>,
    score: u32,
    streak: u32,
    fetch_seq: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// A fresh session: loading its first question, score and streak at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Loading,
            selected: None,
            feedback: None,
            score: 0,
            streak: 0,
            fetch_seq: 0,
        }
    }

    /// Start a new round: enter `Loading` and clear the round-scoped state.
    /// Valid from any phase — it also serves as retry after a failed fetch.
    pub fn begin_round(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        self.phase = RoundPhase::Loading;
        self.selected = None;
        self.feedback = None;
        FetchTicket(self.fetch_seq)
    }

    /// Install the result of a fetch, unless a newer round has started since.
    pub fn finish_round(&mut self, ticket: FetchTicket, result: Result<Question, ApiError>) {
        if ticket.0 != self.fetch_seq {
            tracing::debug!(
                stale = ticket.0,
                current = self.fetch_seq,
                "discarding superseded question fetch"
            );
            return;
        }
        match result {
            Ok(question) => {
                self.phase = RoundPhase::Ready(question);
            }
            Err(error) => {
                tracing::warn!(%error, "question fetch failed");
                self.phase = RoundPhase::Failed(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Fetch the next question and install it. Convenience wrapper around
    /// [`Self::begin_round`] / [`Self::finish_round`].
    pub async fn advance(&mut self, client: &ApiClient) {
        let ticket = self.begin_round();
        let result = client.fetch_question().await;
        self.finish_round(ticket, result);
    }

    /// Submit a guess for the current round.
    ///
    /// At most one guess per round is accepted; repeated calls after the
    /// first are no-ops, which is what prevents double-scoring from rapid
    /// repeated input. A guess outside the offered options is also rejected,
    /// preserving the invariant that the selection is always an option of
    /// the current question.
    pub fn submit_guess(&mut self, tld: &str) -> GuessOutcome {
        let RoundPhase::Ready(question) = &self.phase else {
            return GuessOutcome::Rejected;
        };
        if self.selected.is_some() {
            return GuessOutcome::Rejected;
        }
        if !question.is_option(tld) {
            return GuessOutcome::Rejected;
        }
        self.selected = Some(tld.to_string());
        if question.is_correct(tld) {
            self.score += CORRECT_GUESS_POINTS;
            self.streak += 1;
            self.feedback = Some("Correct!".to_string());
            GuessOutcome::Correct
        } else {
            self.streak = 0;
            let answer = question.answer().to_string();
            self.feedback = Some(format!("Wrong! The correct TLD was .{answer}"));
            GuessOutcome::Incorrect { answer }
        }
    }

    #[must_use]
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        match &self.phase {
            RoundPhase::Ready(question) => Some(question),
            RoundPhase::Loading | RoundPhase::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, RoundPhase::Loading)
    }

    /// The selected option for this round, if a guess was already made.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Outcome text for the current round: guess feedback, or the fetch
    /// failure reason when the round could not load.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        match &self.phase {
            RoundPhase::Failed(reason) => Some(reason),
            RoundPhase::Loading | RoundPhase::Ready(_) => self.feedback.as_deref(),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }
}
