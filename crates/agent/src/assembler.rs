//! Prompt assembly.
//!
//! Combines the retrieved context passage, a window of the conversation
//! history and the trailing instruction into the payload the backend's
//! [`PromptFormat`] expects. Assembly is a pure function of its inputs.

use parley_core::message::{History, Role, Turn};
use parley_core::prompt::{PromptFormat, PromptPayload, PromptSections};

/// Builds a fresh prompt payload for every generation turn.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    instruction: String,
    max_turns: Option<usize>,
}

impl PromptAssembler {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            max_turns: None,
        }
    }

    /// Only send the most recent `max` non-system turns. System turns are
    /// always kept. `None` sends the whole history.
    pub fn with_max_turns(mut self, max: Option<usize>) -> Self {
        self.max_turns = max;
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// The turns the model will see: system framing plus the windowed tail
    /// of the conversation, ending with `current`.
    pub fn window(&self, history: &History, current: &Turn) -> Vec<Turn> {
        let mut turns: Vec<Turn> = history.iter().cloned().collect();
        if history.last() != Some(current) {
            turns.push(current.clone());
        }

        let Some(max) = self.max_turns else {
            return turns;
        };
        let max = max.max(1);

        let conversational = turns.iter().filter(|t| t.role() != Role::System).count();
        let mut skip = conversational.saturating_sub(max);

        turns
            .into_iter()
            .filter(|t| {
                if t.role() == Role::System {
                    return true;
                }
                if skip > 0 {
                    skip -= 1;
                    return false;
                }
                true
            })
            .collect()
    }

    /// Assemble the payload for one generation request.
    ///
    /// `current` is the user turn being answered; it is included whether or
    /// not it has already been appended to `history`.
    pub fn assemble(
        &self,
        context_passage: &str,
        history: &History,
        current: &Turn,
        format: &dyn PromptFormat,
    ) -> PromptPayload {
        let turns = self.window(history, current);
        format.render(&PromptSections {
            context_passage,
            turns: &turns,
            instruction: &self.instruction,
        })
    }
}
