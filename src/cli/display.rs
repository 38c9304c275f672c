// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for the shimdb CLI.
//!
//! Records are drawn inside a box, one line each, with a type badge whose
//! color depends on the record family. Colors come from a [`Palette`]
//! chosen once per process: OneDark on dark terminals, One Light on light
//! ones. `SHIMDB_THEME=light|dark` overrides, otherwise the background
//! index in `COLORFGBG` decides.
//!
//! `NO_COLOR` and non-TTY stdout disable escapes entirely.

use std::sync::OnceLock;

use shimdb::TagType;

/// Width between the two `│` borders.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

type Rgb = (u8, u8, u8);

/// What a piece of output means, independent of the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    List,
    Integer,
    Text,
    Binary,
    Muted,
    Good,
    Bad,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    list: Rgb,
    integer: Rgb,
    text: Rgb,
    binary: Rgb,
    muted: Rgb,
    bad: Rgb,
}

impl Palette {
    fn get(&self, role: Role) -> Rgb {
        match role {
            Role::List => self.list,
            Role::Integer => self.integer,
            Role::Text | Role::Good => self.text,
            Role::Binary => self.binary,
            Role::Muted => self.muted,
            Role::Bad => self.bad,
        }
    }
}

const ONE_DARK: Palette = Palette {
    list: (86, 182, 194),
    integer: (229, 192, 123),
    text: (152, 195, 121),
    binary: (198, 120, 221),
    muted: (92, 99, 112),
    bad: (224, 108, 117),
};

const ONE_LIGHT: Palette = Palette {
    list: (1, 132, 188),
    integer: (193, 132, 1),
    text: (80, 161, 79),
    binary: (166, 38, 164),
    muted: (160, 161, 167),
    bad: (228, 86, 73),
};

/// Pick a palette from the two environment hints.
fn palette_for(theme: Option<&str>, colorfgbg: Option<&str>) -> &'static Palette {
    match theme.map(str::to_ascii_lowercase).as_deref() {
        Some("light" | "l") => return &ONE_LIGHT,
        Some("dark" | "d") => return &ONE_DARK,
        _ => {}
    }
    // "fg;bg": background 7 and up, except 8, is a light terminal.
    let bg = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());
    match bg {
        Some(bg) if bg >= 7 && bg != 8 => &ONE_LIGHT,
        _ => &ONE_DARK,
    }
}

fn palette() -> &'static Palette {
    static PALETTE: OnceLock<&'static Palette> = OnceLock::new();
    PALETTE.get_or_init(|| {
        palette_for(
            std::env::var("SHIMDB_THEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    })
}

fn use_colors() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

fn escape((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// `text` in the color for `role`, or unchanged when colors are off.
pub fn paint(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!(
            "{}{}{}{}",
            modifiers.concat(),
            escape(palette().get(role)),
            text,
            RESET
        )
    } else {
        text.to_string()
    }
}

fn border(glyphs: &str) -> String {
    paint(Role::Muted, &[], glyphs)
}

/// Length in chars, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

/// Cut unstyled `s` to `max` chars, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX
// ═══════════════════════════════════════════════════════════════════════════

pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

pub fn section_top(label: &str) {
    let label = format!(" {} ", paint(Role::List, &[BOLD], label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label) + 1);
    println!(
        "{}{}{}",
        border("┌─"),
        label,
        border(&format!("{}┐", "─".repeat(rest)))
    );
}

pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// RECORD FORMATTING
// ═══════════════════════════════════════════════════════════════════════════

fn role_of(kind: Option<TagType>) -> Role {
    match kind {
        Some(TagType::List) => Role::List,
        Some(TagType::Word | TagType::Dword | TagType::Qword) => Role::Integer,
        Some(TagType::String | TagType::StringRef) => Role::Text,
        Some(TagType::Binary) => Role::Binary,
        Some(TagType::Null) => Role::Muted,
        _ => Role::Bad,
    }
}

/// Fixed-width record type label.
pub fn type_badge(kind: Option<TagType>) -> String {
    let name = kind.map_or("?", TagType::name);
    paint(role_of(kind), &[], &format!("{:<9}", name))
}

pub fn status(ok: bool, text: &str) -> String {
    if ok {
        paint(Role::Good, &[BOLD], &format!("✓ {}", text))
    } else {
        paint(Role::Bad, &[BOLD], &format!("✗ {}", text))
    }
}

pub fn format_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MB", b as f64 / f64::from(1u32 << 20)),
        b if b >= 1 << 10 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}
