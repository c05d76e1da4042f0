//! Hand-authored wireframe fragments, keyed by canonical hint.
//!
//! Every fragment is drawn on a 280×180 design box and fitted into the
//! requested size by [`Fragment::fit`].

use crate::primitive::{Anchor, Fragment, Primitive};
use bp_core::{Color, Rect};

pub const DESIGN_WIDTH: f64 = 280.0;
pub const DESIGN_HEIGHT: f64 = 180.0;

pub(crate) const INK: Color = Color::rgba(0.2, 0.255, 0.333, 1.0);
pub(crate) const MUTED: Color = Color::rgba(0.58, 0.639, 0.722, 1.0);
pub(crate) const LINE: Color = Color::rgba(0.796, 0.835, 0.882, 1.0);
pub(crate) const SURFACE: Color = Color::rgba(0.973, 0.98, 0.988, 1.0);
pub(crate) const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

/// Hints the library can draw.
pub const HINTS: &[&str] = &[
    "form",
    "table",
    "list",
    "card",
    "dashboard",
    "chart",
    "stepper",
    "breadcrumb",
    "tabs",
    "modal",
    "sidebar",
    "header",
    "footer",
    "search",
    "upload",
    "editor",
    "chat",
    "calendar",
    "timeline",
    "gallery",
    "profile",
    "settings",
    "button",
];

pub struct WireframeLibrary;

impl WireframeLibrary {
    /// Fragment for `hint`, fitted and centered in a `width × height` box at
    /// the origin. `None` for hints the library does not know.
    pub fn get(hint: &str, color: Color, width: f64, height: f64, label: &str) -> Option<Fragment> {
        let primitives = match hint {
            "form" => form(color, label),
            "table" => table(color),
            "list" => list(color),
            "card" => card(color, label),
            "dashboard" => dashboard(color),
            "chart" => chart(color),
            "stepper" => stepper(color),
            "breadcrumb" => breadcrumb(color),
            "tabs" => tabs(color),
            "modal" => modal(color, label),
            "sidebar" => sidebar(color),
            "header" => header(color, label),
            "footer" => footer(),
            "search" => search(color),
            "upload" => upload(color),
            "editor" => editor(color),
            "chat" => chat(color),
            "calendar" => calendar(color),
            "timeline" => timeline(color),
            "gallery" => gallery(color),
            "profile" => profile(color, label),
            "settings" => settings(color),
            "button" => button(color, label),
            _ => return None,
        };
        Some(Fragment::new(primitives).fit(
            DESIGN_WIDTH,
            DESIGN_HEIGHT,
            Rect::new(0.0, 0.0, width, height),
        ))
    }

    pub fn contains(hint: &str) -> bool {
        HINTS.contains(&hint)
    }
}

fn field(x: f64, y: f64, w: f64, caption: &str) -> [Primitive; 2] {
    [
        Primitive::text(x, y - 6.0, caption, 10.0)
            .anchor(Anchor::Start)
            .fill(MUTED),
        Primitive::rect(x, y, w, 32.0)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.5)
            .tag("input"),
    ]
}

fn bar(x: f64, y: f64, w: f64, h: f64, color: Color) -> Primitive {
    Primitive::rect(x, y, w, h).rounded(h / 2.0).fill(color)
}

fn form(color: Color, label: &str) -> Vec<Primitive> {
    let mut out = Vec::new();
    out.extend(field(20.0, 24.0, 240.0, "Email"));
    out.extend(field(20.0, 80.0, 240.0, "Password"));
    let caption = if label.is_empty() { "Submit" } else { label };
    out.push(
        Primitive::rect(20.0, 132.0, 240.0, 32.0)
            .rounded(4.0)
            .fill(color)
            .tag("button"),
    );
    out.push(Primitive::text(140.0, 152.0, caption, 12.0).fill(WHITE).bold());
    out
}

fn table(color: Color) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(10.0, 10.0, 260.0, 160.0)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
        Primitive::rect(10.0, 10.0, 260.0, 28.0)
            .fill(color.with_alpha(0.15))
            .tag("header"),
    ];
    for row in 1..5 {
        let y = 10.0 + 28.0 + row as f64 * 26.0;
        out.push(Primitive::line(10.0, y, 270.0, y).stroke(LINE, 1.0).tag("row"));
    }
    for col in 1..3 {
        let x = 10.0 + col as f64 * 87.0;
        out.push(Primitive::line(x, 10.0, x, 170.0).stroke(LINE, 1.0));
    }
    out
}

fn list(color: Color) -> Vec<Primitive> {
    (0..4)
        .flat_map(|i| {
            let y = 14.0 + i as f64 * 40.0;
            [
                Primitive::rect(10.0, y, 260.0, 32.0)
                    .rounded(4.0)
                    .fill(WHITE)
                    .stroke(LINE, 1.0)
                    .tag("row"),
                Primitive::circle(28.0, y + 16.0, 8.0).fill(color.with_alpha(0.5)),
                bar(46.0, y + 12.0, 140.0 - i as f64 * 20.0, 8.0, LINE),
            ]
        })
        .collect()
}

fn card(color: Color, label: &str) -> Vec<Primitive> {
    vec![
        Primitive::rect(30.0, 10.0, 220.0, 160.0)
            .rounded(8.0)
            .fill(WHITE)
            .stroke(LINE, 1.5),
        Primitive::rect(30.0, 10.0, 220.0, 72.0)
            .rounded(8.0)
            .fill(color.with_alpha(0.2))
            .tag("media"),
        Primitive::text(46.0, 106.0, label, 12.0)
            .anchor(Anchor::Start)
            .fill(INK)
            .bold(),
        bar(46.0, 120.0, 160.0, 8.0, LINE),
        bar(46.0, 136.0, 120.0, 8.0, LINE),
    ]
}

fn dashboard(color: Color) -> Vec<Primitive> {
    let mut out: Vec<Primitive> = (0..3)
        .flat_map(|i| {
            let x = 10.0 + i as f64 * 88.0;
            [
                Primitive::rect(x, 10.0, 80.0, 52.0)
                    .rounded(6.0)
                    .fill(WHITE)
                    .stroke(LINE, 1.0)
                    .tag("kpi"),
                bar(x + 10.0, 24.0, 36.0, 6.0, LINE),
                Primitive::text(x + 10.0, 52.0, "00", 14.0)
                    .anchor(Anchor::Start)
                    .fill(color)
                    .bold(),
            ]
        })
        .collect();
    out.push(
        Primitive::rect(10.0, 72.0, 260.0, 98.0)
            .rounded(6.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
    );
    out.push(
        Primitive::polyline(vec![
            (24.0, 150.0),
            (70.0, 120.0),
            (120.0, 134.0),
            (170.0, 96.0),
            (256.0, 108.0),
        ])
        .stroke(color, 2.0),
    );
    out
}

fn chart(color: Color) -> Vec<Primitive> {
    let heights = [60.0, 100.0, 80.0, 130.0, 50.0, 110.0];
    let mut out = vec![
        Primitive::line(24.0, 10.0, 24.0, 166.0).stroke(MUTED, 1.0),
        Primitive::line(24.0, 166.0, 270.0, 166.0).stroke(MUTED, 1.0),
    ];
    for (i, h) in heights.iter().enumerate() {
        let x = 40.0 + i as f64 * 38.0;
        out.push(
            Primitive::rect(x, 166.0 - h, 24.0, *h)
                .rounded(2.0)
                .fill(color.with_alpha(if i % 2 == 0 { 0.8 } else { 0.45 }))
                .tag("bar"),
        );
    }
    out
}

fn stepper(color: Color) -> Vec<Primitive> {
    let mut out = vec![Primitive::line(40.0, 80.0, 240.0, 80.0).stroke(LINE, 2.0)];
    for i in 0..4 {
        let cx = 40.0 + i as f64 * (200.0 / 3.0);
        let done = i < 2;
        let dot = Primitive::circle(cx, 80.0, 14.0).tag("step");
        out.push(if done {
            dot.fill(color)
        } else {
            dot.fill(WHITE).stroke(LINE, 2.0)
        });
        out.push(
            Primitive::text(cx, 85.0, (i + 1).to_string(), 12.0)
                .fill(if done { WHITE } else { MUTED })
                .bold(),
        );
        out.push(bar(cx - 20.0, 108.0, 40.0, 6.0, LINE));
    }
    out
}

fn breadcrumb(color: Color) -> Vec<Primitive> {
    let mut out = Vec::new();
    for i in 0..3 {
        let x = 20.0 + i as f64 * 88.0;
        let last = i == 2;
        out.push(
            Primitive::rect(x, 76.0, 64.0, 28.0)
                .rounded(4.0)
                .fill(if last { color.with_alpha(0.2) } else { SURFACE })
                .tag("crumb"),
        );
        out.push(bar(x + 12.0, 87.0, 40.0, 6.0, if last { color } else { MUTED }));
        if !last {
            out.push(
                Primitive::polyline(vec![(x + 72.0, 82.0), (x + 80.0, 90.0), (x + 72.0, 98.0)])
                    .stroke(MUTED, 1.5),
            );
        }
    }
    out
}

fn tabs(color: Color) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::line(10.0, 46.0, 270.0, 46.0).stroke(LINE, 1.0),
        Primitive::rect(10.0, 56.0, 260.0, 114.0)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
    ];
    for i in 0..3 {
        let x = 14.0 + i as f64 * 80.0;
        out.push(bar(x + 12.0, 24.0, 48.0, 8.0, if i == 0 { color } else { MUTED }).tag("tab"));
        if i == 0 {
            out.push(Primitive::line(x, 46.0, x + 72.0, 46.0).stroke(color, 3.0));
        }
    }
    out
}

fn modal(color: Color, label: &str) -> Vec<Primitive> {
    vec![
        Primitive::rect(0.0, 0.0, 280.0, 180.0).fill(INK.with_alpha(0.2)),
        Primitive::rect(40.0, 24.0, 200.0, 132.0)
            .rounded(8.0)
            .fill(WHITE)
            .stroke(LINE, 1.0)
            .tag("dialog"),
        Primitive::text(56.0, 50.0, label, 12.0)
            .anchor(Anchor::Start)
            .fill(INK)
            .bold(),
        bar(56.0, 66.0, 150.0, 6.0, LINE),
        bar(56.0, 80.0, 120.0, 6.0, LINE),
        Primitive::rect(128.0, 120.0, 48.0, 24.0)
            .rounded(4.0)
            .stroke(LINE, 1.0),
        Primitive::rect(180.0, 120.0, 48.0, 24.0)
            .rounded(4.0)
            .fill(color)
            .tag("button"),
    ]
}

fn sidebar(color: Color) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(10.0, 10.0, 84.0, 160.0)
            .rounded(4.0)
            .fill(SURFACE)
            .stroke(LINE, 1.0)
            .tag("sidebar"),
        Primitive::rect(104.0, 10.0, 166.0, 160.0)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
    ];
    for i in 0..5 {
        let y = 26.0 + i as f64 * 24.0;
        out.push(bar(22.0, y, 56.0, 8.0, if i == 1 { color } else { LINE }).tag("item"));
    }
    out
}

fn header(color: Color, label: &str) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(10.0, 60.0, 260.0, 60.0)
            .rounded(4.0)
            .fill(WHITE)
            .stroke(LINE, 1.0)
            .tag("header"),
        Primitive::circle(34.0, 90.0, 10.0).fill(color),
        Primitive::text(52.0, 95.0, label, 12.0)
            .anchor(Anchor::Start)
            .fill(INK)
            .bold(),
    ];
    for i in 0..3 {
        out.push(bar(160.0 + i as f64 * 34.0, 87.0, 26.0, 6.0, MUTED));
    }
    out
}

fn footer() -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(10.0, 100.0, 260.0, 70.0)
            .rounded(4.0)
            .fill(SURFACE)
            .stroke(LINE, 1.0)
            .tag("footer"),
    ];
    for col in 0..3 {
        let x = 26.0 + col as f64 * 84.0;
        for row in 0..3 {
            out.push(bar(x, 116.0 + row as f64 * 14.0, 56.0 - row as f64 * 10.0, 6.0, LINE));
        }
    }
    out
}

fn search(color: Color) -> Vec<Primitive> {
    vec![
        Primitive::rect(20.0, 20.0, 240.0, 36.0)
            .rounded(18.0)
            .fill(WHITE)
            .stroke(color, 1.5)
            .tag("input"),
        Primitive::circle(42.0, 37.0, 7.0).stroke(MUTED, 2.0),
        Primitive::line(47.0, 42.0, 53.0, 48.0).stroke(MUTED, 2.0),
        bar(64.0, 34.0, 100.0, 6.0, LINE),
        Primitive::rect(20.0, 72.0, 240.0, 28.0)
            .rounded(4.0)
            .fill(SURFACE)
            .tag("result"),
        Primitive::rect(20.0, 106.0, 240.0, 28.0)
            .rounded(4.0)
            .fill(SURFACE)
            .tag("result"),
        Primitive::rect(20.0, 140.0, 240.0, 28.0)
            .rounded(4.0)
            .fill(SURFACE)
            .tag("result"),
    ]
}

fn upload(color: Color) -> Vec<Primitive> {
    vec![
        Primitive::rect(20.0, 20.0, 240.0, 140.0)
            .rounded(8.0)
            .fill(color.with_alpha(0.06))
            .stroke(color, 1.5)
            .dashed()
            .tag("dropzone"),
        Primitive::polyline(vec![(124.0, 78.0), (140.0, 62.0), (156.0, 78.0)]).stroke(color, 2.5),
        Primitive::line(140.0, 62.0, 140.0, 100.0).stroke(color, 2.5),
        bar(96.0, 116.0, 88.0, 8.0, LINE),
    ]
}

fn editor(color: Color) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(10.0, 10.0, 260.0, 160.0)
            .rounded(6.0)
            .fill(INK)
            .tag("editor"),
        Primitive::rect(10.0, 10.0, 28.0, 160.0).fill(INK.mix(WHITE, 0.1)),
    ];
    let widths = [120.0, 180.0, 90.0, 150.0, 60.0, 130.0, 100.0];
    for (i, w) in widths.iter().enumerate() {
        let y = 24.0 + i as f64 * 20.0;
        let indent = if (2..5).contains(&i) { 16.0 } else { 0.0 };
        let tint = if i % 3 == 0 { color } else { MUTED };
        out.push(bar(48.0 + indent, y, *w, 6.0, tint).tag("code-line"));
    }
    out
}

fn chat(color: Color) -> Vec<Primitive> {
    vec![
        Primitive::rect(16.0, 16.0, 150.0, 32.0)
            .rounded(12.0)
            .fill(SURFACE)
            .stroke(LINE, 1.0)
            .tag("bubble"),
        Primitive::rect(114.0, 60.0, 150.0, 32.0)
            .rounded(12.0)
            .fill(color)
            .tag("bubble"),
        Primitive::rect(16.0, 104.0, 120.0, 28.0)
            .rounded(12.0)
            .fill(SURFACE)
            .stroke(LINE, 1.0)
            .tag("bubble"),
        Primitive::rect(16.0, 142.0, 248.0, 28.0)
            .rounded(14.0)
            .fill(WHITE)
            .stroke(LINE, 1.5)
            .tag("input"),
    ]
}

fn calendar(color: Color) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::rect(30.0, 10.0, 220.0, 160.0)
            .rounded(6.0)
            .fill(WHITE)
            .stroke(LINE, 1.0),
        Primitive::rect(30.0, 10.0, 220.0, 28.0)
            .fill(color.with_alpha(0.15))
            .tag("month"),
    ];
    for row in 0..4 {
        for col in 0..7 {
            let x = 40.0 + col as f64 * 30.0;
            let y = 48.0 + row as f64 * 30.0;
            let today = row == 1 && col == 3;
            let cell = Primitive::rect(x, y, 22.0, 22.0).rounded(4.0).tag("day");
            out.push(if today {
                cell.fill(color)
            } else {
                cell.fill(SURFACE)
            });
        }
    }
    out
}

fn timeline(color: Color) -> Vec<Primitive> {
    let mut out = vec![Primitive::line(20.0, 90.0, 260.0, 90.0).stroke(LINE, 2.0)];
    for i in 0..4 {
        let x = 40.0 + i as f64 * 66.0;
        let above = i % 2 == 0;
        out.push(Primitive::circle(x, 90.0, 7.0).fill(color).tag("milestone"));
        let y = if above { 52.0 } else { 110.0 };
        out.push(
            Primitive::rect(x - 26.0, y, 52.0, 28.0)
                .rounded(4.0)
                .fill(WHITE)
                .stroke(LINE, 1.0),
        );
    }
    out
}

fn gallery(color: Color) -> Vec<Primitive> {
    let mut out = Vec::new();
    for row in 0..2 {
        for col in 0..3 {
            let x = 16.0 + col as f64 * 86.0;
            let y = 14.0 + row as f64 * 80.0;
            out.push(
                Primitive::rect(x, y, 78.0, 72.0)
                    .rounded(4.0)
                    .fill(color.with_alpha(0.12 + 0.06 * (row * 3 + col) as f32))
                    .tag("image"),
            );
            out.push(
                Primitive::polyline(vec![
                    (x + 10.0, y + 60.0),
                    (x + 30.0, y + 36.0),
                    (x + 46.0, y + 52.0),
                    (x + 68.0, y + 28.0),
                ])
                .stroke(WHITE, 2.0),
            );
        }
    }
    out
}

fn profile(color: Color, label: &str) -> Vec<Primitive> {
    vec![
        Primitive::circle(140.0, 56.0, 32.0)
            .fill(color.with_alpha(0.25))
            .stroke(color, 2.0)
            .tag("avatar"),
        Primitive::text(140.0, 112.0, label, 13.0).fill(INK).bold(),
        bar(96.0, 124.0, 88.0, 6.0, LINE),
        Primitive::rect(100.0, 144.0, 80.0, 24.0)
            .rounded(12.0)
            .fill(color)
            .tag("button"),
    ]
}

fn settings(color: Color) -> Vec<Primitive> {
    let mut out = Vec::new();
    for i in 0..4 {
        let y = 22.0 + i as f64 * 38.0;
        let on = i % 2 == 0;
        out.push(bar(20.0, y + 8.0, 140.0, 8.0, LINE).tag("setting"));
        out.push(
            Primitive::rect(216.0, y, 44.0, 24.0)
                .rounded(12.0)
                .fill(if on { color } else { LINE })
                .tag("toggle"),
        );
        out.push(Primitive::circle(if on { 248.0 } else { 228.0 }, y + 12.0, 9.0).fill(WHITE));
    }
    out
}

fn button(color: Color, label: &str) -> Vec<Primitive> {
    let caption = if label.is_empty() { "Action" } else { label };
    vec![
        Primitive::rect(60.0, 66.0, 160.0, 48.0)
            .rounded(8.0)
            .fill(color)
            .tag("button"),
        Primitive::text(140.0, 95.0, caption, 14.0).fill(WHITE).bold(),
    ]
}
