// Copyright (c) 2026 rezky_nightky

use std::env;
use std::io::{Result, Write};

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::store::Message;

/// How many messages the store is asked for; the chrome shows the tail of it.
pub const HISTORY_LIMIT: usize = 50;
const VISIBLE_MESSAGES: usize = 10;

const TITLE: &str = " HIDDEN MATRIX COMMUNICATION SYSTEM ";
const PROMPT: &str = "Message: ";
const HINT: &str = "Press ESC to return to the rain, F1 to clear messages";

pub fn sender_name() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "User".to_string())
}

fn message_line(msg: &Message) -> String {
    format!("{} | {}: {}", msg.timestamp, msg.sender, msg.content)
}

/// Truncate to `width` chars and right-pad with spaces.
fn pad(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return pad(s, width);
    }
    let left = (width - len) / 2;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(' ').take(left));
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width - left - len));
    out
}

fn queue_bordered(out: &mut impl Write, row: u16, text: &str) -> Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(Print('│'))?;
    out.queue(SetForegroundColor(Color::White))?;
    out.queue(Print(text))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(Print('│'))?;
    Ok(())
}

fn queue_rule(out: &mut impl Write, row: u16, left: char, right: char, inner: usize) -> Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(Print(left))?;
    out.queue(Print("─".repeat(inner)))?;
    out.queue(Print(right))?;
    Ok(())
}

/// Full-screen redraw of the hidden chat chrome. `messages` arrives newest
/// first from the store; the visible tail is flipped so it reads downward.
/// The cursor is left parked at the end of the input buffer.
pub fn draw(
    out: &mut impl Write,
    messages: &[Message],
    input: &str,
    width: u16,
    height: u16,
) -> Result<()> {
    let width = width.max(10) as usize;
    let inner = width - 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut row: u16 = 0;
    queue_rule(out, row, '┌', '┐', inner)?;
    row += 1;

    queue_bordered(out, row, &center(TITLE, inner))?;
    row += 1;

    queue_rule(out, row, '├', '┤', inner)?;
    row += 1;

    let mut visible: Vec<&Message> = messages.iter().take(VISIBLE_MESSAGES).collect();
    visible.reverse();
    for msg in visible {
        if row + 4 >= height {
            break;
        }
        queue_bordered(out, row, &pad(&message_line(msg), inner))?;
        row += 1;
    }

    queue_rule(out, row, '├', '┤', inner)?;
    row += 1;

    let input_row = row;
    let line = format!("{PROMPT}{input}");
    queue_bordered(out, row, &pad(&line, inner))?;
    row += 1;

    queue_rule(out, row, '└', '┘', inner)?;
    row += 1;

    out.queue(cursor::MoveTo(0, row))?;
    out.queue(SetForegroundColor(Color::Cyan))?;
    out.queue(Print(HINT))?;
    out.queue(ResetColor)?;

    let cursor_col = (1 + line.chars().count()).min(width - 1) as u16;
    out.queue(cursor::MoveTo(cursor_col, input_row))?;
    out.flush()
}
