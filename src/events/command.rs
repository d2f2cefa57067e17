//! Text commands that map onto store actions.

use crate::error::{Error, Result};
use crate::state::{Action, Notification, Theme, Watchlist};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Actions to dispatch in order.
    Dispatch(Vec<Action>),
    /// Print the current state.
    Show,
    /// Print the command reference.
    Help,
    /// Leave the input loop.
    Quit,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (head, rest) = split_word(line);
        let command = match head {
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "theme" => Self::one(parse_theme(rest)?),
            "sidebar" => Self::one(Action::ToggleSidebar),
            "modal" => match rest {
                "" => return Err(usage("modal <id>|close")),
                "close" => Self::one(Action::SetModalOpen(None)),
                id => Self::one(Action::SetModalOpen(Some(id.to_string()))),
            },
            "notify" => {
                let (title, message) = split_word(rest);
                if title.is_empty() {
                    return Err(usage("notify <title> [message]"));
                }
                Self::one(Action::AddNotification(Notification::new(title, message)))
            }
            "read" => match rest {
                "" => return Err(usage("read <id>|all")),
                "all" => Self::one(Action::MarkAllAsRead),
                id => Self::one(Action::MarkAsRead(id.to_string())),
            },
            "dismiss" => Self::one(Action::RemoveNotification(required(rest, "dismiss <id>")?)),
            "inbox" => match rest {
                "clear" => Self::one(Action::ClearNotifications),
                _ => return Err(usage("inbox clear")),
            },
            "fav" => parse_favorites(rest)?,
            "watch" => parse_watchlist(rest)?,
            "compare" => parse_compare(rest)?,
            "search" => {
                let query = required(rest, "search <query>")?;
                Self::Dispatch(vec![
                    Action::SetSearchQuery(query.clone()),
                    Action::AddRecentSearch(query),
                ])
            }
            "history" => match rest {
                "clear" => Self::one(Action::ClearRecentSearches),
                _ => return Err(usage("history clear")),
            },
            "reset" => Self::one(Action::Reset),
            other => {
                return Err(Error::invalid_input(format!(
                    "unknown command '{}', try 'help'",
                    other
                )));
            }
        };
        Ok(Some(command))
    }

    fn one(action: Action) -> Self {
        Self::Dispatch(vec![action])
    }
}

fn parse_theme(rest: &str) -> Result<Action> {
    match rest {
        "" | "toggle" => Ok(Action::ToggleTheme),
        name => Ok(Action::SetTheme(name.parse::<Theme>()?)),
    }
}

fn parse_favorites(rest: &str) -> Result<Command> {
    let (verb, id) = split_word(rest);
    let id = required(id, "fav add|rm <strategy>")?;
    match verb {
        "add" => Ok(Command::one(Action::AddToFavorites(id))),
        "rm" | "remove" => Ok(Command::one(Action::RemoveFromFavorites(id))),
        _ => Err(usage("fav add|rm <strategy>")),
    }
}

fn parse_compare(rest: &str) -> Result<Command> {
    let (verb, id) = split_word(rest);
    match verb {
        "clear" => Ok(Command::one(Action::ClearCompare)),
        "add" => Ok(Command::one(Action::AddToCompare(required(
            id,
            "compare add <strategy>",
        )?))),
        "rm" | "remove" => Ok(Command::one(Action::RemoveFromCompare(required(
            id,
            "compare rm <strategy>",
        )?))),
        _ => Err(usage("compare add|rm <strategy> | compare clear")),
    }
}

fn parse_watchlist(rest: &str) -> Result<Command> {
    let (verb, args) = split_word(rest);
    let (first, second) = split_word(args);
    let action = match verb {
        "new" => Action::CreateWatchlist(Watchlist::new(required(args, "watch new <name>")?)),
        "delete" => Action::DeleteWatchlist(required(first, "watch delete <watchlist>")?),
        "rename" => Action::RenameWatchlist {
            watchlist_id: required(first, "watch rename <watchlist> <name>")?,
            name: required(second, "watch rename <watchlist> <name>")?,
        },
        "add" => Action::AddToWatchlist {
            watchlist_id: required(first, "watch add <watchlist> <strategy>")?,
            strategy_id: required(second, "watch add <watchlist> <strategy>")?,
        },
        "rm" | "remove" => Action::RemoveFromWatchlist {
            watchlist_id: required(first, "watch rm <watchlist> <strategy>")?,
            strategy_id: required(second, "watch rm <watchlist> <strategy>")?,
        },
        _ => return Err(usage("watch new|delete|rename|add|rm ...")),
    };
    Ok(Command::one(action))
}

/// Split off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}

fn required(arg: &str, syntax: &str) -> Result<String> {
    if arg.is_empty() {
        Err(usage(syntax))
    } else {
        Ok(arg.to_string())
    }
}

fn usage(syntax: &str) -> Error {
    Error::invalid_input(format!("usage: {}", syntax))
}
