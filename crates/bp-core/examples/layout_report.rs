//! Print the computed layout of every phase in a design document.
//!
//! Usage: `cargo run -p bp-core --example layout_report [document.json]`
//! Set `RUST_LOG=debug` for loader and layout diagnostics.

use bp_core::{CanvasConfig, Document, hint, layout_children};
use std::env;
use std::fs;
use std::process::ExitCode;

const FIXTURE: &str = include_str!("../tests/fixtures/product.json");

fn main() -> ExitCode {
    env_logger::init();

    let source = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => FIXTURE.to_string(),
    };

    let doc = match Document::from_json(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("invalid document: {e}");
            return ExitCode::FAILURE;
        }
    };
    let config = CanvasConfig::default();

    for phase in doc.phases() {
        let Some(node) = doc.get(phase) else { continue };
        let proposal = layout_children(&doc, phase, config.canvas_width, config.canvas_height);
        println!(
            "{} ({:?}) view box {}×{}",
            node.name,
            doc.phase_category(phase),
            proposal.view_box.w,
            proposal.view_box.h
        );
        for p in &proposal.positions {
            let child = doc.get(p.id);
            let hint = child.and_then(hint::resolve).unwrap_or_else(|| "-".into());
            println!(
                "  {:<16} {:>6} {:>6} {:>5}×{:<5} {:<9} {}",
                p.id.as_str(),
                p.x,
                p.y,
                p.w,
                p.h,
                p.zone.map(|z| format!("{z:?}")).unwrap_or_default(),
                hint
            );
        }
    }
    ExitCode::SUCCESS
}
