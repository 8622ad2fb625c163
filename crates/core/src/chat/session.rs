use super::message::{Message, MessageId, MessageIdAllocator};

/// Reply shown whenever the remote call fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that. Please try again.";

/// User message that is waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub user_message_id: MessageId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    Sending(PendingTurn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    EmptyText,
    AlreadySending { pending: MessageId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveRejection {
    NoPendingTurn,
    TurnMismatch {
        pending: MessageId,
        attempted: MessageId,
    },
}

/// Append-only message history for one chat view plus its request phase.
///
/// Submitting and resolving are separate transitions: the user message is appended
/// as soon as a turn starts, and the reply (or [`FALLBACK_REPLY`]) when it ends.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    phase: ChatPhase,
    ids: MessageIdAllocator,
}

impl ChatSession {
    /// Seeds the history with exactly one ai welcome message.
    pub fn new(welcome_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::ai(MessageId::WELCOME, welcome_message)],
            phase: ChatPhase::Idle,
            ids: MessageIdAllocator::starting_after(MessageId::WELCOME),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ChatPhase::Sending(_))
    }

    pub fn input_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn pending_turn(&self) -> Option<&PendingTurn> {
        match &self.phase {
            ChatPhase::Sending(turn) => Some(turn),
            ChatPhase::Idle => None,
        }
    }

    pub fn submit(&mut self, text: &str) -> Result<PendingTurn, SubmitRejection> {
        self.check_submittable(text)?;
        let id = self.ids.next();
        Ok(self.start_turn(id, text))
    }

    pub fn submit_at(&mut self, text: &str, now_millis: u64) -> Result<PendingTurn, SubmitRejection> {
        self.check_submittable(text)?;
        let id = self.ids.next_at(now_millis);
        Ok(self.start_turn(id, text))
    }

    /// Appends the ai reply for `turn` and returns to idle.
    pub fn complete_turn(
        &mut self,
        turn: MessageId,
        reply: impl Into<String>,
    ) -> Result<&Message, ResolveRejection> {
        self.finish_turn(turn, reply.into())
    }

    /// Appends [`FALLBACK_REPLY`] for `turn` and returns to idle.
    pub fn fail_turn(&mut self, turn: MessageId) -> Result<&Message, ResolveRejection> {
        self.finish_turn(turn, FALLBACK_REPLY.to_string())
    }

    fn check_submittable(&self, text: &str) -> Result<(), SubmitRejection> {
        if let ChatPhase::Sending(pending) = &self.phase {
            return Err(SubmitRejection::AlreadySending {
                pending: pending.user_message_id,
            });
        }
        if text.trim().is_empty() {
            return Err(SubmitRejection::EmptyText);
        }
        Ok(())
    }

    fn start_turn(&mut self, id: MessageId, text: &str) -> PendingTurn {
        let turn = PendingTurn {
            user_message_id: id,
            text: text.to_string(),
        };
        self.messages.push(Message::user(id, text));
        self.phase = ChatPhase::Sending(turn.clone());
        turn
    }

    fn finish_turn(&mut self, turn: MessageId, text: String) -> Result<&Message, ResolveRejection> {
        let pending = match &self.phase {
            ChatPhase::Sending(pending) => pending.user_message_id,
            ChatPhase::Idle => return Err(ResolveRejection::NoPendingTurn),
        };
        if pending != turn {
            return Err(ResolveRejection::TurnMismatch {
                pending,
                attempted: turn,
            });
        }

        let id = self.ids.next();
        self.messages.push(Message::ai(id, text));
        self.phase = ChatPhase::Idle;
        Ok(&self.messages[self.messages.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Sender;

    const WELCOME: &str = "Hi, I'm Aura. How can I help you today?";

    fn transcript(session: &ChatSession) -> Vec<(Sender, &str)> {
        session
            .messages()
            .iter()
            .map(|message| (message.sender, message.text.as_str()))
            .collect()
    }

    #[test]
    fn new_session_holds_only_the_welcome_message() {
        let session = ChatSession::new(WELCOME);
        assert_eq!(transcript(&session), vec![(Sender::Ai, WELCOME)]);
        assert_eq!(session.messages()[0].id, MessageId::WELCOME);
        assert!(!session.is_loading());
    }

    #[test]
    fn submit_appends_user_message_before_reply_and_sets_loading() {
        let mut session = ChatSession::new(WELCOME);

        let turn = session.submit_at("hello", 10_000).unwrap();
        assert!(session.is_loading());
        assert!(!session.input_enabled());
        assert_eq!(
            transcript(&session),
            vec![(Sender::Ai, WELCOME), (Sender::User, "hello")]
        );

        session.complete_turn(turn.user_message_id, "hi there").unwrap();
        assert!(!session.is_loading());
        assert_eq!(
            transcript(&session),
            vec![
                (Sender::Ai, WELCOME),
                (Sender::User, "hello"),
                (Sender::Ai, "hi there"),
            ]
        );
    }

    #[test]
    fn submit_while_sending_changes_nothing() {
        let mut session = ChatSession::new(WELCOME);
        let turn = session.submit("first").unwrap();
        let before = session.messages().len();

        let rejection = session.submit("second").unwrap_err();

        assert_eq!(
            rejection,
            SubmitRejection::AlreadySending {
                pending: turn.user_message_id
            }
        );
        assert_eq!(session.messages().len(), before);
        assert_eq!(session.pending_turn(), Some(&turn));
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut session = ChatSession::new(WELCOME);
        for text in ["", "   ", "\n\t"] {
            assert_eq!(session.submit(text), Err(SubmitRejection::EmptyText));
        }
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn failure_appends_fallback_and_returns_to_idle() {
        let mut session = ChatSession::new(WELCOME);
        let turn = session.submit("x").unwrap();

        let reply = session.fail_turn(turn.user_message_id).unwrap();

        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.sender, Sender::Ai);
        assert!(!session.is_loading());
        assert_eq!(
            transcript(&session)[1..],
            [(Sender::User, "x"), (Sender::Ai, FALLBACK_REPLY)]
        );
    }

    #[test]
    fn resolving_without_a_pending_turn_is_rejected() {
        let mut session = ChatSession::new(WELCOME);
        assert_eq!(
            session.complete_turn(MessageId::new(7), "late").unwrap_err(),
            ResolveRejection::NoPendingTurn
        );
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn stale_turn_ids_are_rejected() {
        let mut session = ChatSession::new(WELCOME);
        let turn = session.submit_at("hello", 50_000).unwrap();

        let rejection = session.fail_turn(MessageId::new(3)).unwrap_err();

        assert_eq!(
            rejection,
            ResolveRejection::TurnMismatch {
                pending: turn.user_message_id,
                attempted: MessageId::new(3),
            }
        );
        assert!(session.is_loading());
    }

    #[test]
    fn text_is_kept_as_typed() {
        let mut session = ChatSession::new(WELCOME);
        let turn = session.submit("  spaced  ").unwrap();
        assert_eq!(turn.text, "  spaced  ");
        assert_eq!(session.messages()[1].text, "  spaced  ");
    }

    #[test]
    fn message_ids_increase_in_submission_order() {
        let mut session = ChatSession::new(WELCOME);
        let turn = session.submit_at("a", 100).unwrap();
        session.complete_turn(turn.user_message_id, "b").unwrap();
        let turn = session.submit_at("c", 100).unwrap();
        session.fail_turn(turn.user_message_id).unwrap();

        let ids = session
            .messages()
            .iter()
            .map(|message| message.id)
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
