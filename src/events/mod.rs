//! Input handling for stratmarket.
//!
//! Turns text commands into store actions and renders state back as text.
//! This is the line-oriented stand-in for the graphical UI collaborators.

mod command;

pub use command::Command;

use crate::app::AppContext;
use crate::error::Result;
use crate::state::{COMPARE_CAPACITY, StoreState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Command reference printed by `help`.
pub const HELP: &str = "\
commands:
  theme [toggle|light|dark]        switch theme
  sidebar                          toggle the sidebar
  modal <id>|close                 open or close a modal
  notify <title> [message]         add a notification
  read <id>|all                    mark notifications read
  dismiss <id>                     remove a notification
  inbox clear                      remove all notifications
  fav add|rm <strategy>            edit favorites
  watch new <name>                 create a watchlist
  watch add|rm <list> <strategy>   edit a watchlist
  watch rename <list> <name>       rename a watchlist
  watch delete <list>              delete a watchlist
  compare add|rm <strategy>        edit the compare list
  compare clear                    empty the compare list
  search <query>                   run a search
  history clear                    forget recent searches
  reset                            restore all defaults
  show | help | quit";

/// Feed commands from `reader` into the context until `quit` or end of input.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 turn into an
/// unknown-command error for that line only. Rendered state goes to `out`,
/// command errors to `err`. Only I/O failures end the loop early.
pub async fn run<R, O, E>(reader: R, ctx: &mut AppContext, out: &mut O, err: &mut E) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    O: std::io::Write,
    E: std::io::Write,
{
    let mut reader = reader;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Show)) => writeln!(out, "{}", describe(ctx.store().state()))?,
            Ok(Some(Command::Help)) => writeln!(out, "{}", HELP)?,
            Ok(Some(Command::Dispatch(actions))) => {
                for action in actions {
                    ctx.dispatch(action);
                }
            }
            Err(e) => writeln!(err, "{}", e)?,
        }
    }
    Ok(())
}

/// One-line summary of a snapshot.
pub fn status_line(state: &StoreState) -> String {
    format!(
        "theme={} unread={} favorites={} watchlists={} compare={}/{} recent={}",
        state.theme(),
        state.unread_count(),
        state.favorites.len(),
        state.watchlists.len(),
        state.compare.len(),
        COMPARE_CAPACITY,
        state.recent_searches().len(),
    )
}

/// Multi-line rendering of a snapshot.
pub fn describe(state: &StoreState) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "theme: {}", state.theme());
    let _ = writeln!(
        out,
        "sidebar: {}  modal: {}",
        if state.app.sidebar_open { "open" } else { "closed" },
        state.app.active_modal.as_deref().unwrap_or("-")
    );

    let _ = writeln!(out, "notifications ({} unread):", state.unread_count());
    for n in state.notifications.items() {
        let marker = if n.read { ' ' } else { '*' };
        let _ = writeln!(
            out,
            "  {} [{}] {} {} ({})",
            marker,
            n.id,
            n.title,
            n.message,
            n.timestamp.format("%Y-%m-%d %H:%M")
        );
    }

    let _ = writeln!(out, "favorites: {}", state.favorites.ids().join(", "));
    let _ = writeln!(out, "watchlists:");
    for w in state.watchlists.lists() {
        let _ = writeln!(out, "  [{}] {}: {}", w.id, w.name, w.strategy_ids.join(", "));
    }
    let _ = writeln!(
        out,
        "compare ({}/{}): {}",
        state.compare.len(),
        COMPARE_CAPACITY,
        state.compare.ids().join(", ")
    );
    let _ = writeln!(out, "search: {}", state.search.query);
    let _ = write!(out, "recent: {}", state.recent_searches().join(", "));
    out
}
