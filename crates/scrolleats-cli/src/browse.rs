//! Line-driven viewport over a result list.
//!
//! Each input line is one gesture: `j`/`k` (or DOM key names such as
//! `ArrowDown`) step through the list, a number jumps to that 1-based
//! position, `q` quits. Moves go through [`ScrollController`], so the same
//! throttle and settle rules apply as for wheel or touch input.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use scrolleats_core::Restaurant;
use scrolleats_viewport::{InputEvent, ScrollController};

const LOAD_MORE_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Input(InputEvent),
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let key = match line {
        "q" | "quit" => return Command::Quit,
        "" | "j" | "n" => "ArrowDown",
        "k" | "p" => "ArrowUp",
        "ArrowDown" | "ArrowUp" | "PageDown" | "PageUp" => line,
        _ => {
            return match line.parse::<usize>() {
                Ok(position) if position > 0 => Command::Input(InputEvent::IndicatorTap {
                    index: position - 1,
                }),
                _ => Command::Unknown,
            };
        }
    };
    Command::Input(InputEvent::Key {
        key: key.to_owned(),
    })
}

fn render(out: &mut impl Write, controller: &ScrollController<Restaurant>) -> std::io::Result<()> {
    let Some(current) = controller.current() else {
        return writeln!(out, "no restaurants to show");
    };
    let dots: String = controller
        .indicators()
        .map(|active| if active { '●' } else { '·' })
        .collect();
    let distance = current
        .distance_km
        .map(|d| format!(" · {d:.1} km"))
        .unwrap_or_default();
    writeln!(
        out,
        "[{}/{}] {} · {} · {} · ★{:.1}{distance}",
        controller.cursor() + 1,
        controller.len(),
        current.name,
        current.cuisine,
        current.price_range.as_str(),
        current.rating,
    )?;
    writeln!(out, "    {}", current.address)?;
    writeln!(out, "    {dots}")
}

/// Runs the browse loop until `q` or end of input. Returns the final cursor.
///
/// `now_ms` supplies the monotonic time for each gesture.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub(crate) fn run_browse(
    restaurants: Vec<Restaurant>,
    input: impl BufRead,
    mut out: impl Write,
    mut now_ms: impl FnMut() -> u64,
) -> anyhow::Result<usize> {
    let moves = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&moves);
    let mut controller = ScrollController::new(restaurants).with_observer(move |index| {
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(index, "browse cursor moved");
    });

    render(&mut out, &controller)?;
    if controller.is_empty() {
        return Ok(0);
    }

    for line in input.lines() {
        let event = match parse_command(&line?) {
            Command::Quit => break,
            Command::Unknown => {
                writeln!(out, "keys: j/k or ArrowDown/ArrowUp, a number to jump, q to quit")?;
                continue;
            }
            Command::Input(event) => event,
        };

        let now = now_ms();
        controller.tick(now);
        if controller.handle(&event, now).is_some() {
            render(&mut out, &controller)?;
            if controller.near_end(LOAD_MORE_THRESHOLD) {
                writeln!(out, "    (end of results approaching)")?;
            }
        } else {
            writeln!(out, "    (stayed at {})", controller.cursor() + 1)?;
        }
    }

    let cursor = controller.cursor();
    controller.dispose();
    tracing::info!(moves = moves.load(Ordering::Relaxed), cursor, "browse finished");
    Ok(cursor)
}
