//! Benchmarks for the autoformat rule engine and editor commands.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use blockpad::document::{Block, BlockKey, BlockType, Document};
use blockpad::editor::{Autoformat, EditorState, HandleValue, commands, handle_return};

fn large_document(blocks: usize) -> Document {
    Document::from_blocks(
        (0..blocks)
            .map(|i| {
                Block::new(
                    BlockKey::new(format!("b{i}")),
                    format!("Paragraph {i} with some ordinary prose in it."),
                    BlockType::Unstyled,
                )
            })
            .collect(),
    )
}

fn type_text(rules: &Autoformat, state: EditorState, text: &str) -> EditorState {
    text.chars().fold(state, |state, ch| {
        match rules.handle_before_input(ch, &state) {
            Ok(HandleValue::Handled(next)) => next,
            _ => commands::insert_characters(&state, &ch.to_string()).unwrap_or(state),
        }
    })
}

fn bench_typing_with_triggers(c: &mut Criterion) {
    let rules = Autoformat::default();
    c.bench_function("type_with_triggers", |b| {
        b.iter(|| {
            let mut state = EditorState::create_empty();
            for line in ["# Heading", "* bold", "** red", "*** underline", "plain text"] {
                state = type_text(&rules, state, black_box(line));
                if let Ok(HandleValue::Handled(next)) = handle_return(&state) {
                    state = next;
                }
            }
            state
        })
    });
}

fn bench_trigger_in_large_document(c: &mut Criterion) {
    let rules = Autoformat::default();
    let state = EditorState::create_with_content(large_document(5_000));
    let state = commands::move_to(&state, 4_999, 0);
    let state = match handle_return(&state) {
        Ok(HandleValue::Handled(next)) => next,
        _ => state,
    };
    let state = type_text(&rules, state, "**");
    c.bench_function("trigger_large_document", |b| {
        b.iter(|| rules.handle_before_input(black_box(' '), &state))
    });
}

criterion_group!(
    benches,
    bench_typing_with_triggers,
    bench_trigger_in_large_document
);
criterion_main!(benches);
