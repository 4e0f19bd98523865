//! Table selection wiring example
//!
//! Demonstrates the selection surface from a host's point of view:
//! - a provider owning the selection for a small table
//! - the scope bridge used by the header and row renderers
//! - the tri-state header checkbox driven by the aggregate state
//! - the change handler invoked for locally-originated edits
//! - an external controller overwriting the selection via reconcile

use std::fs::File;

use log::LevelFilter;
use rowpick::prelude::*;
use simplelog::{Config, WriteLogger};

struct Row {
    id: &'static str,
    name: &'static str,
}

const ROWS: &[Row] = &[
    Row {
        id: "apples",
        name: "Apples",
    },
    Row {
        id: "oranges",
        name: "Oranges",
    },
    Row {
        id: "pears",
        name: "Pears",
    },
];

fn header_checkbox(state: BulkState) -> &'static str {
    match state {
        BulkState::All => "[x]",
        BulkState::None => "[ ]",
        BulkState::Some => "[-]",
    }
}

fn render(scope: &SelectionScope) {
    scope
        .with_provider(|p| {
            println!(
                "{} select all ({} of {} selected)",
                header_checkbox(p.bulk_state()),
                p.num_selected(),
                ROWS.len()
            );
            for row in ROWS {
                let mark = if p.is_selected(&row.id.into()) {
                    "[x]"
                } else {
                    "[ ]"
                };
                println!("  {mark} {}", row.name);
            }
            p.clear_dirty();
        })
        .expect("table rendered inside a selection scope");
}

fn main() {
    if let Ok(log_file) = File::create("table_demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let provider = SelectionProvider::new(ROWS.iter().map(|r| r.id))
        .on_change(|ids| println!("  -> host notified: {ids:?}"));
    let scope = SelectionScope::new();
    let _guard = scope.enter(provider.clone());

    render(&scope);

    println!("\nclick the 'Apples' row checkbox");
    scope
        .with_provider(|p| p.toggle_select(&"apples".into()))
        .expect("provider in scope");
    render(&scope);

    println!("\nclick the header checkbox (partial selection selects the rest)");
    scope
        .with_provider(|p| p.toggle_bulk())
        .expect("provider in scope");
    render(&scope);

    println!("\nclick the header checkbox again (full selection clears)");
    scope
        .with_provider(|p| p.toggle_bulk())
        .expect("provider in scope");
    render(&scope);

    println!("\nexternal controller delivers [\"pears\"] (no host notification)");
    provider.reconcile(Some(&["pears".into()]));
    render(&scope);
}
