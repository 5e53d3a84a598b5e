//! Markdown-style autoformat shortcuts.
//!
//! Typing a space on a line whose trimmed text is exactly one of the trigger
//! prefixes converts the line's block type and strips the prefix:
//!
//! | Line  | Block type   |
//! |-------|--------------|
//! | `#`   | `header-one` |
//! | `*`   | `BOLD`       |
//! | `**`  | `RED_LINE`   |
//! | `***` | `UNDERLINE`  |
//!
//! Pressing Enter splits the block and always starts the new block as
//! `unstyled`.

use crate::document::{Block, BlockType};

use super::modifier;
use super::selection::Selection;
use super::state::{ChangeType, EditorState};
use super::EditError;

/// Outcome of an input hook.
#[derive(Debug, Clone)]
pub enum HandleValue {
    /// The hook produced this state; the default action must not run.
    Handled(EditorState),
    /// The hook did nothing; run the default action.
    NotHandled,
}

impl HandleValue {
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// How the trigger characters are located for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanPolicy {
    /// Delete exactly the matched trigger text where it sits in the line.
    #[default]
    MatchLength,
    /// Delete the fixed per-trigger span from the legacy key table, even when
    /// the line carries surrounding whitespace.
    FixedSpan,
}

/// Legacy fixed deletion span for a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSpan {
    /// `n` characters immediately before the caret.
    BeforeCaret(usize),
    /// Offsets `0..n` of the line, clamped to its length.
    Leading(usize),
}

/// A line prefix that restyles its block when followed by a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// The prefix, compared against the line with whitespace trimmed.
    pub text: &'static str,
    /// Type the block takes when the trigger fires.
    pub block_type: BlockType,
    /// Span removed under [`SpanPolicy::FixedSpan`].
    pub fixed_span: FixedSpan,
}

/// Recognised triggers. Matching is exact, so `**` never fires the `*` rule.
pub const TRIGGERS: [Trigger; 4] = [
    Trigger {
        text: "#",
        block_type: BlockType::HeaderOne,
        fixed_span: FixedSpan::BeforeCaret(1),
    },
    Trigger {
        text: "*",
        block_type: BlockType::Bold,
        fixed_span: FixedSpan::Leading(2),
    },
    Trigger {
        text: "**",
        block_type: BlockType::RedLine,
        fixed_span: FixedSpan::Leading(2),
    },
    Trigger {
        text: "***",
        block_type: BlockType::Underline,
        fixed_span: FixedSpan::Leading(3),
    },
];

/// The trigger fired by typing `ch` on a line holding `text`, if any.
pub fn match_trigger(ch: char, text: &str) -> Option<Trigger> {
    if ch != ' ' {
        return None;
    }
    let candidate = text.trim();
    TRIGGERS.into_iter().find(|trigger| trigger.text == candidate)
}

/// The autoformat rule engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autoformat {
    policy: SpanPolicy,
}

impl Autoformat {
    pub const fn new(policy: SpanPolicy) -> Self {
        Self { policy }
    }

    /// Inspect a character about to be inserted.
    ///
    /// Returns [`HandleValue::NotHandled`] without touching anything unless
    /// `ch` is a space and the block at the selection start is a bare
    /// trigger. Otherwise retypes the block, deletes the trigger and commits
    /// the result as one `change-block-type` snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OffsetOutOfRange`] when the fixed span policy
    /// asks for characters before offset 0, or [`EditError::UnknownBlock`]
    /// when the selection does not belong to the document.
    pub fn handle_before_input(
        &self,
        ch: char,
        state: &EditorState,
    ) -> Result<HandleValue, EditError> {
        if ch != ' ' {
            return Ok(HandleValue::NotHandled);
        }
        let doc = state.current_content();
        let start = state.selection().start(doc)?;
        let block = &doc.blocks()[start.index];
        let Some(trigger) = match_trigger(ch, &block.text) else {
            return Ok(HandleValue::NotHandled);
        };

        let removal = self.removal_range(&trigger, block, start.offset)?;
        let caret_block = Selection::collapsed(start.key, start.offset);
        let retyped = modifier::set_block_type(doc, &caret_block, &trigger.block_type)?;
        let (content, caret) = modifier::remove_range(&retyped, &removal)?;

        tracing::debug!(
            trigger = trigger.text,
            block_type = %trigger.block_type,
            key = %block.key,
            policy = ?self.policy,
            "autoformat"
        );
        Ok(HandleValue::Handled(state.push(
            content,
            caret,
            ChangeType::ChangeBlockType,
        )))
    }

    fn removal_range(
        &self,
        trigger: &Trigger,
        block: &Block,
        caret: usize,
    ) -> Result<Selection, EditError> {
        match self.policy {
            SpanPolicy::MatchLength => {
                let lead = block.text.chars().take_while(|c| c.is_whitespace()).count();
                Ok(Selection::within(
                    &block.key,
                    lead,
                    lead + trigger.text.chars().count(),
                ))
            }
            SpanPolicy::FixedSpan => match trigger.fixed_span {
                FixedSpan::BeforeCaret(n) => {
                    let from = caret.checked_sub(n).ok_or_else(|| EditError::OffsetOutOfRange {
                        key: block.key.clone(),
                        offset: caret,
                        len: block.char_len(),
                    })?;
                    Ok(Selection::within(&block.key, from, caret))
                }
                FixedSpan::Leading(n) => {
                    Ok(Selection::within(&block.key, 0, n.min(block.char_len())))
                }
            },
        }
    }
}

/// Split the block at the caret and start the new block as `unstyled`.
///
/// Always handled; commits one `split-block` snapshot.
///
/// # Errors
///
/// Returns an error if the selection does not belong to the document.
pub fn handle_return(state: &EditorState) -> Result<HandleValue, EditError> {
    let (split, caret) = modifier::split_block(state.current_content(), state.selection())?;
    let content = modifier::set_block_type(&split, &caret, &BlockType::Unstyled)?;
    Ok(HandleValue::Handled(state.push(
        content,
        caret,
        ChangeType::SplitBlock,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockKey, Document};
    use crate::editor::commands::{self, caret};

    /// Feed characters through the rule engine the way the app does.
    fn type_str(engine: Autoformat, state: &EditorState, text: &str) -> EditorState {
        text.chars().fold(state.clone(), |s, ch| {
            match engine.handle_before_input(ch, &s).unwrap() {
                HandleValue::Handled(next) => next,
                HandleValue::NotHandled => commands::insert_characters(&s, &ch.to_string()).unwrap(),
            }
        })
    }

    fn line(text: &str, offset: usize) -> EditorState {
        let doc = Document::from_blocks(vec![Block::new(
            BlockKey::new("k"),
            text,
            BlockType::Unstyled,
        )]);
        commands::move_to(&EditorState::create_with_content(doc), 0, offset)
    }

    fn only_block(state: &EditorState) -> (BlockType, String) {
        let doc = state.current_content();
        assert_eq!(doc.block_count(), 1);
        (doc.first_block().block_type.clone(), doc.first_block().text.clone())
    }

    fn fire(policy: SpanPolicy, state: &EditorState) -> EditorState {
        match Autoformat::new(policy).handle_before_input(' ', state).unwrap() {
            HandleValue::Handled(next) => next,
            HandleValue::NotHandled => panic!("expected the trigger to fire"),
        }
    }

    #[test]
    fn test_hash_space_makes_header() {
        for policy in [SpanPolicy::MatchLength, SpanPolicy::FixedSpan] {
            let out = fire(policy, &line("#", 1));
            assert_eq!(only_block(&out), (BlockType::HeaderOne, String::new()));
            assert_eq!(caret(&out), (0, 0));
            assert_eq!(out.last_change(), Some(ChangeType::ChangeBlockType));
        }
    }

    #[test]
    fn test_star_triggers_map_to_block_types() {
        let cases = [
            ("*", BlockType::Bold),
            ("**", BlockType::RedLine),
            ("***", BlockType::Underline),
        ];
        for policy in [SpanPolicy::MatchLength, SpanPolicy::FixedSpan] {
            for (text, expected) in &cases {
                let out = fire(policy, &line(text, text.len()));
                assert_eq!(only_block(&out), (expected.clone(), String::new()), "{text}");
            }
        }
    }

    #[test]
    fn test_typing_sequence_from_empty_document() {
        let engine = Autoformat::default();
        let state = type_str(engine, &EditorState::create_empty(), "# hello");
        assert_eq!(only_block(&state), (BlockType::HeaderOne, "hello".to_string()));

        let HandleValue::Handled(state) = handle_return(&state).unwrap() else {
            panic!("return is always handled");
        };
        let blocks = state.current_content().blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::HeaderOne);
        assert_eq!(blocks[0].text, "hello");
        assert_eq!(blocks[1].block_type, BlockType::Unstyled);
        assert!(blocks[1].text.is_empty());
        assert_eq!(caret(&state), (1, 0));
    }

    #[test]
    fn test_non_space_character_is_not_handled() {
        let engine = Autoformat::default();
        let state = line("#", 1);
        assert!(!engine.handle_before_input('x', &state).unwrap().is_handled());
        assert!(!engine.handle_before_input('#', &state).unwrap().is_handled());
    }

    #[test]
    fn test_other_line_content_is_not_handled() {
        let engine = Autoformat::default();
        for text in ["", "##", "****", "#a", "* x", "-", "hello"] {
            let state = line(text, text.chars().count());
            assert!(
                !engine.handle_before_input(' ', &state).unwrap().is_handled(),
                "{text:?} should not trigger"
            );
        }
    }

    #[test]
    fn test_space_after_plain_text_inserts_normally() {
        let state = type_str(Autoformat::default(), &EditorState::create_empty(), "a b");
        assert_eq!(only_block(&state), (BlockType::Unstyled, "a b".to_string()));
    }

    #[test]
    fn test_surrounding_whitespace_still_triggers() {
        let out = fire(SpanPolicy::MatchLength, &line("  ** ", 5));
        assert_eq!(only_block(&out), (BlockType::RedLine, "   ".to_string()));
        assert_eq!(caret(&out), (0, 2));
    }

    #[test]
    fn test_hash_after_leading_whitespace_keeps_indent() {
        let out = type_str(Autoformat::default(), &line("  ", 2), "# ");
        assert_eq!(only_block(&out), (BlockType::HeaderOne, "  ".to_string()));
        assert_eq!(caret(&out), (0, 2));
    }

    #[test]
    fn test_fixed_span_strips_leading_offsets_not_trigger() {
        let out = fire(SpanPolicy::FixedSpan, &line("  *", 3));
        assert_eq!(only_block(&out), (BlockType::Bold, "*".to_string()));
    }

    #[test]
    fn test_fixed_span_header_removes_char_before_caret() {
        let out = fire(SpanPolicy::FixedSpan, &line("# ", 2));
        assert_eq!(only_block(&out), (BlockType::HeaderOne, "#".to_string()));
    }

    #[test]
    fn test_fixed_span_header_with_caret_at_start_is_out_of_range() {
        let engine = Autoformat::new(SpanPolicy::FixedSpan);
        let err = engine.handle_before_input(' ', &line("#", 0)).unwrap_err();
        assert_eq!(
            err,
            EditError::OffsetOutOfRange {
                key: BlockKey::new("k"),
                offset: 0,
                len: 1
            }
        );
    }

    #[test]
    fn test_trigger_only_retypes_the_caret_block() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "keep", BlockType::Unstyled),
            Block::new(BlockKey::new("b"), "*", BlockType::Unstyled),
        ]);
        let state = commands::move_to(&EditorState::create_with_content(doc), 1, 1);
        let out = fire(SpanPolicy::MatchLength, &state);
        let blocks = out.current_content().blocks();
        assert_eq!(blocks[0].block_type, BlockType::Unstyled);
        assert_eq!(blocks[0].text, "keep");
        assert_eq!(blocks[1].block_type, BlockType::Bold);
    }

    #[test]
    fn test_undo_restores_trigger_text() {
        let state = type_str(Autoformat::default(), &EditorState::create_empty(), "** ");
        assert_eq!(only_block(&state), (BlockType::RedLine, String::new()));
        let undone = state.undo();
        assert_eq!(only_block(&undone), (BlockType::Unstyled, "**".to_string()));
    }

    #[test]
    fn test_return_resets_type_for_every_source_type() {
        for ty in [
            BlockType::HeaderOne,
            BlockType::Bold,
            BlockType::RedLine,
            BlockType::Underline,
            BlockType::Other("blockquote".to_string()),
        ] {
            let doc = Document::from_blocks(vec![Block::new(BlockKey::new("k"), "text", ty.clone())]);
            let state = commands::move_to(&EditorState::create_with_content(doc), 0, 2);
            let HandleValue::Handled(out) = handle_return(&state).unwrap() else {
                panic!("return is always handled");
            };
            let blocks = out.current_content().blocks();
            assert_eq!(blocks[0].block_type, ty);
            assert_eq!(blocks[0].text, "te");
            assert_eq!(blocks[1].block_type, BlockType::Unstyled);
            assert_eq!(blocks[1].text, "xt");
            assert_eq!(out.last_change(), Some(ChangeType::SplitBlock));
        }
    }

    #[test]
    fn test_match_trigger_table() {
        assert_eq!(match_trigger(' ', " # ").map(|t| t.block_type), Some(BlockType::HeaderOne));
        assert_eq!(match_trigger(' ', "***").map(|t| t.block_type), Some(BlockType::Underline));
        assert!(match_trigger('a', "#").is_none());
        assert!(match_trigger(' ', "# #").is_none());
    }
}
