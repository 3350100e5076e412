//! # Request Controller
//!
//! Owns the conversation, the draft and the busy flag, and runs one send
//! cycle at a time:
//!
//! ```text
//! Idle ──send()──▶ Sending (busy) ──answer──▶ Completed-Success ──▶ Idle
//!                                  └─failure─▶ Completed-Error   ──▶ Idle
//! ```
//!
//! The user message is appended before the request leaves, and exactly one
//! bot message is appended when it settles. Draft clear and busy reset happen
//! in [`CycleGuard`]'s `Drop`, so every exit path (success, failure, or the
//! send future being dropped) runs them.
//!
//! Event-loop renderers that cannot hold `&mut self` across an await use the
//! split form: [`RequestController::begin_send`] hands back a
//! [`PendingQuery`], the caller awaits the transport wherever it likes, then
//! feeds the result to [`RequestController::settle`].

use std::sync::Arc;

use log::{debug, info, warn};

use super::conversation::Conversation;
use super::draft::Draft;
use super::message::Message;
use crate::transport::{ChatAnswer, ChatTransport, TransportError};

/// A query that has been committed to the transcript and is waiting on the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub query: String,
}

/// Clears the draft and drops the busy flag when it goes out of scope.
struct CycleGuard<'a> {
    draft: &'a mut Draft,
    busy: &'a mut bool,
}

impl<'a> CycleGuard<'a> {
    fn new(draft: &'a mut Draft, busy: &'a mut bool) -> Self {
        Self { draft, busy }
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.draft.clear();
        *self.busy = false;
        debug!("Send cycle finished: draft cleared, busy=false");
    }
}

pub struct RequestController {
    transport: Arc<dyn ChatTransport>,
    conversation: Conversation,
    draft: Draft,
    busy: bool,
}

impl RequestController {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            conversation: Conversation::new(),
            draft: Draft::new(),
            busy: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Input surfaces write keystrokes through this.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn transport(&self) -> Arc<dyn ChatTransport> {
        Arc::clone(&self.transport)
    }

    /// Validates the draft and commits it as a user message.
    ///
    /// Returns `None` without touching any state when the draft is blank or a
    /// request is already outstanding. Otherwise the user message is appended,
    /// busy is set, and the caller owns delivering the transport result to
    /// [`settle`](Self::settle).
    pub fn begin_send(&mut self) -> Option<PendingQuery> {
        if self.busy {
            warn!("Send ignored: a request is already in flight");
            return None;
        }
        if self.draft.is_blank() {
            debug!("Send ignored: draft is blank");
            return None;
        }

        let query = self.draft.get().to_string();
        self.conversation.append(Message::user(query.clone()));
        self.busy = true;
        info!(
            "Send cycle started via {} (query_len={})",
            self.transport.name(),
            query.len()
        );

        Some(PendingQuery { query })
    }

    /// Appends the bot message for the outstanding request and ends the cycle.
    ///
    /// Ignored when nothing is in flight, so a stray completion can never add
    /// a second bot line for one query.
    pub fn settle(&mut self, outcome: Result<ChatAnswer, TransportError>) {
        if !self.busy {
            warn!("Completion ignored: no request in flight");
            return;
        }
        let _cycle = CycleGuard::new(&mut self.draft, &mut self.busy);
        log_outcome(&outcome);
        self.conversation.append(Message::from_outcome(outcome));
    }

    /// Runs a full send cycle: validate, append the user line, ask the
    /// transport, append the answer or the error line, clean up.
    pub async fn send(&mut self) {
        let Some(pending) = self.begin_send() else {
            return;
        };

        let transport = Arc::clone(&self.transport);
        let _cycle = CycleGuard::new(&mut self.draft, &mut self.busy);
        let outcome = transport.ask(&pending.query).await;
        log_outcome(&outcome);
        self.conversation.append(Message::from_outcome(outcome));
    }
}

fn log_outcome(outcome: &Result<ChatAnswer, TransportError>) {
    match outcome {
        Ok(answer) => info!(
            "Request succeeded: {} bytes, {} sources",
            answer.result.len(),
            answer.sources.as_ref().map_or(0, Vec::len)
        ),
        Err(e) => warn!("Request failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{FALLBACK_ERROR_TEXT, Sender};
    use crate::test_support::{PendingTransport, ScriptedTransport, test_controller};
    use futures::FutureExt;

    fn answer(text: &str, sources: &[&str]) -> ChatAnswer {
        ChatAnswer::new(text, Some(sources.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn test_send_success_appends_user_then_answer() {
        let transport = ScriptedTransport::new(vec![Ok(answer("X is Y", &["doc1"]))]);
        let mut controller = RequestController::new(transport.clone());
        controller.draft_mut().set("What is X?");

        tokio_test::block_on(controller.send());

        let messages = controller.conversation().snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("What is X?"));
        assert_eq!(messages[1].sender(), Sender::Bot);
        assert_eq!(messages[1].text(), "X is Y");
        assert_eq!(messages[1].sources(), Some(&["doc1".to_string()][..]));
        assert_eq!(transport.queries(), vec!["What is X?".to_string()]);
    }

    #[test]
    fn test_send_failure_appends_fallback() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        })]);
        let mut controller = RequestController::new(transport);
        controller.draft_mut().set("fail case");

        tokio_test::block_on(controller.send());

        let messages = controller.conversation().snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("fail case"));
        assert_eq!(messages[1].text(), FALLBACK_ERROR_TEXT);
        assert!(messages[1].sources().is_none());
    }

    #[test]
    fn test_cleanup_runs_on_both_paths() {
        let transport = ScriptedTransport::new(vec![
            Ok(answer("ok", &[])),
            Err(TransportError::Network("refused".into())),
        ]);
        let mut controller = RequestController::new(transport);

        for query in ["first", "second"] {
            controller.draft_mut().set(query);
            tokio_test::block_on(controller.send());
            assert_eq!(controller.draft().get(), "");
            assert!(!controller.is_busy());
        }
        assert_eq!(controller.conversation().len(), 4);
    }

    #[test]
    fn test_blank_drafts_are_noops() {
        let transport = ScriptedTransport::new(vec![]);
        let mut controller = RequestController::new(transport.clone());

        for draft in ["", "  ", "\t\n "] {
            controller.draft_mut().set(draft);
            tokio_test::block_on(controller.send());
            assert!(controller.conversation().is_empty());
            assert!(!controller.is_busy());
            assert_eq!(controller.draft().get(), draft, "blank draft is left alone");
        }
        assert!(transport.queries().is_empty());
    }

    #[test]
    fn test_user_text_is_sent_untrimmed() {
        let transport = ScriptedTransport::new(vec![Ok(answer("ok", &[]))]);
        let mut controller = RequestController::new(transport.clone());
        controller.draft_mut().set("  spaced out  ");

        tokio_test::block_on(controller.send());

        assert_eq!(controller.conversation().snapshot()[0].text(), "  spaced out  ");
        assert_eq!(transport.queries(), vec!["  spaced out  ".to_string()]);
    }

    #[test]
    fn test_begin_send_commits_user_message_before_request() {
        let mut controller = test_controller();
        controller.draft_mut().set("hello");

        let pending = controller.begin_send().expect("draft is not blank");

        assert_eq!(pending.query, "hello");
        assert!(controller.is_busy());
        assert_eq!(controller.conversation().snapshot(), &[Message::user("hello")]);
        // Draft survives until the request settles
        assert_eq!(controller.draft().get(), "hello");
    }

    #[test]
    fn test_second_trigger_while_busy_is_rejected() {
        let mut controller = test_controller();
        controller.draft_mut().set("first");
        assert!(controller.begin_send().is_some());

        controller.draft_mut().set("second");
        assert!(controller.begin_send().is_none());

        assert_eq!(controller.conversation().len(), 1);
        assert!(controller.is_busy());
        assert_eq!(controller.draft().get(), "second");
    }

    #[test]
    fn test_settle_appends_one_bot_message_and_cleans_up() {
        let mut controller = test_controller();
        controller.draft_mut().set("q");
        controller.begin_send();

        controller.settle(Ok(answer("a", &["s1", "s2"])));

        let messages = controller.conversation().snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text(), "a");
        assert_eq!(messages[1].sources().map(<[String]>::len), Some(2));
        assert!(!controller.is_busy());
        assert_eq!(controller.draft().get(), "");
    }

    #[test]
    fn test_settle_clears_text_typed_while_waiting() {
        let mut controller = test_controller();
        controller.draft_mut().set("q");
        controller.begin_send();
        controller.draft_mut().set("typed during the request");

        controller.settle(Err(TransportError::Parse("bad".into())));

        assert_eq!(controller.draft().get(), "");
    }

    #[test]
    fn test_settle_without_request_is_ignored() {
        let mut controller = test_controller();
        controller.draft_mut().set("keep me");

        controller.settle(Ok(answer("stray", &[])));

        assert!(controller.conversation().is_empty());
        assert_eq!(controller.draft().get(), "keep me");
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_duplicate_settle_adds_nothing() {
        let mut controller = test_controller();
        controller.draft_mut().set("q");
        controller.begin_send();
        controller.settle(Ok(answer("a", &[])));
        controller.settle(Ok(answer("again", &[])));

        assert_eq!(controller.conversation().len(), 2);
    }

    #[test]
    fn test_dropped_send_still_cleans_up() {
        let mut controller = RequestController::new(std::sync::Arc::new(PendingTransport));
        controller.draft_mut().set("never answered");

        // One poll gets past begin_send and parks on the transport
        assert!(controller.send().now_or_never().is_none());

        assert_eq!(controller.conversation().snapshot(), &[Message::user("never answered")]);
        assert!(!controller.is_busy());
        assert_eq!(controller.draft().get(), "");
    }

    #[test]
    fn test_pairs_stay_adjacent_across_sequential_sends() {
        let transport = ScriptedTransport::new(vec![
            Ok(answer("one", &[])),
            Err(TransportError::Network("down".into())),
            Ok(answer("three", &["d3"])),
        ]);
        let mut controller = RequestController::new(transport);

        for query in ["q1", "q2", "q3"] {
            controller.draft_mut().set(query);
            tokio_test::block_on(controller.send());
        }

        let senders: Vec<Sender> = controller
            .conversation()
            .snapshot()
            .iter()
            .map(Message::sender)
            .collect();
        assert_eq!(
            senders,
            vec![
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot,
                Sender::User,
                Sender::Bot
            ]
        );
        let texts: Vec<&str> = controller
            .conversation()
            .snapshot()
            .iter()
            .map(Message::text)
            .collect();
        assert_eq!(texts, vec!["q1", "one", "q2", FALLBACK_ERROR_TEXT, "q3", "three"]);
    }
}
