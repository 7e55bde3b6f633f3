//! Line commands accepted by the interactive browser.

use anyhow::{anyhow, bail, Result};
use catalog_core::UiAction;
use shared::domain::{FacetName, OptionId};

pub const HELP: &str = "\
commands:
  genre|country|year|actor|director <id>|none   select or clear a filter
  find <facet> <term>                           search a facet's options
  more [<facet>]                                next page of movies or of a facet
  search [<text>]                               set or clear the title search
  reset                                         clear every filter
  retry                                         retry the last failed movie load
  show [<facet>]                                print current movies or options
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UiAction),
    Show(Option<FacetName>),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head {
        "" | "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "reset" => Command::Action(UiAction::Reset),
        "retry" => Command::Action(UiAction::RetryResults),
        "search" => Command::Action(UiAction::SetTitleSearch(rest.to_string())),
        "more" if rest.is_empty() => Command::Action(UiAction::LoadMoreResults),
        "more" => Command::Action(UiAction::LoadMoreOptions {
            facet: parse_facet(rest)?,
        }),
        "show" if rest.is_empty() => Command::Show(None),
        "show" => Command::Show(Some(parse_facet(rest)?)),
        "find" => {
            let (facet, term) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: find <facet> <term>"))?;
            Command::Action(UiAction::SearchFacet {
                facet: parse_facet(facet)?,
                term: term.trim().to_string(),
            })
        }
        other => {
            let facet = parse_facet(other)?;
            Command::Action(UiAction::Select {
                facet,
                option: parse_option(rest)?,
            })
        }
    };
    Ok(command)
}

pub fn parse_facet(raw: &str) -> Result<FacetName> {
    FacetName::ALL
        .into_iter()
        .find(|facet| facet.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| anyhow!("unknown command or facet '{raw}'"))
}

fn parse_option(raw: &str) -> Result<Option<OptionId>> {
    match raw {
        "" => bail!("expected an option id or 'none'"),
        "none" => Ok(None),
        id => id
            .parse::<i64>()
            .map(|id| Some(OptionId(id)))
            .map_err(|_| anyhow!("'{id}' is not an option id")),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
