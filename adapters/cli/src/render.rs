use std::{io, io::Write, time::Duration};

use letter_hunt_core::{GameMode, TileStatus};
use letter_hunt_session::{query, Session};
use letter_hunt_system_level_rules::{instruction, shows_target_characters};
use letter_hunt_system_stats::Stats;

const HELP: &str = "\
Commands:
  s <row> <col>      select a cell (rows and columns start at 0)
  d <row> <col>      deselect a cell
  count <n>          enter your count (count mode)
  check              submit your answer
  hint [n]           reveal up to n target cells (selection mode, default 3)
  pause | resume     freeze or unfreeze the clock
  next               play the next level after a win
  new [level] [mode] start a new round (mode is selection or count)
  reset              abandon the round and return to the starting level
  board              redraw the board
  code               print a share code for this session's opening round
  help               show this help
  quit               leave the game";

pub(crate) fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{HELP}")
}

/// Prints the round header followed by the board.
pub(crate) fn round(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let Some(rule) = query::rule(session) else {
        return writeln!(out, "No round in progress. Type `new` to start one.");
    };

    writeln!(out)?;
    writeln!(
        out,
        "Level {} ({} mode)",
        query::level(session),
        query::mode(session)
    )?;
    writeln!(out, "{}", instruction(&rule))?;
    if shows_target_characters(&rule) {
        if let Some(targets) = query::targets(session) {
            let listed: Vec<String> = targets.characters().iter().map(char::to_string).collect();
            writeln!(out, "Targets: {}", listed.join(" "))?;
        }
    }
    board(out, session)
}

pub(crate) fn board(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let Some(board) = query::board(session) else {
        return Ok(());
    };

    write!(out, "    ")?;
    for column in 0..board.size() {
        write!(out, "{column:>3}")?;
    }
    writeln!(out)?;

    for (row, cells) in board.rows().enumerate() {
        write!(out, "{row:>3} ")?;
        for (column, symbol) in cells.iter().enumerate() {
            let index = row * board.size() + column;
            let (open, close) = marker(query::tile_status(session, index));
            write!(out, "{open}{symbol}{close}")?;
        }
        writeln!(out)?;
    }

    match query::mode(session) {
        GameMode::Selection => writeln!(
            out,
            "Selected {} cells in {} moves",
            query::selected(session).len(),
            query::moves(session)
        ),
        GameMode::Count => match query::user_count(session) {
            Some(count) => writeln!(out, "Your count: {count}"),
            None => writeln!(out, "Enter your count with `count <n>`"),
        },
    }
}

fn marker(status: TileStatus) -> (char, char) {
    match status {
        TileStatus::Plain => (' ', ' '),
        TileStatus::Selected => ('[', ']'),
        TileStatus::Hinted => ('(', ')'),
        TileStatus::Correct => ('+', '+'),
        TileStatus::Wrong => ('!', '!'),
        TileStatus::Missed => ('*', '*'),
    }
}

/// Prints the revealed board and the verdict of a resolved round.
pub(crate) fn outcome(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let (Some(summary), Some(validation)) = (query::summary(session), query::validation(session))
    else {
        return Ok(());
    };

    board(out, session)?;
    writeln!(out, "Legend: +found+ !wrong! *missed*")?;
    let seconds = Duration::from_millis(summary.elapsed_ms).as_secs_f64();
    if summary.correct {
        writeln!(
            out,
            "Correct! Level {} cleared in {seconds:.1}s for {} points.",
            summary.level, summary.score
        )?;
    } else {
        writeln!(
            out,
            "Not quite. Level {} took {seconds:.1}s and scored {} points.",
            summary.level, summary.score
        )?;
    }

    match summary.mode {
        GameMode::Selection => writeln!(
            out,
            "Found {} of {} targets with {} wrong picks ({:.0}% accuracy).",
            validation.correct_count,
            validation.total_count,
            validation.wrong_count,
            validation.accuracy * 100.0
        )?,
        GameMode::Count => writeln!(out, "The board held {} targets.", validation.total_count)?,
    }

    if summary.correct {
        writeln!(out, "Type `next` for the next level or `new` to replay.")
    } else {
        writeln!(out, "Type `new` to try again.")
    }
}

pub(crate) fn stats(out: &mut impl Write, stats: &Stats) -> io::Result<()> {
    writeln!(
        out,
        "Rounds played: {}, won: {}",
        stats.games_played(),
        stats.games_won()
    )?;
    if let Some(best) = stats.best_score() {
        writeln!(out, "Best score: {best}")?;
    }
    if let Some(best) = stats.best_time() {
        writeln!(out, "Fastest win: {:.1}s", best.as_secs_f64())?;
    }
    if let Some(average) = stats.average_winning_time() {
        writeln!(out, "Average win: {:.1}s", average.as_secs_f64())?;
    }
    if let Some(accuracy) = stats.average_accuracy() {
        writeln!(out, "Average accuracy: {:.0}%", accuracy * 100.0)?;
    }
    Ok(())
}
