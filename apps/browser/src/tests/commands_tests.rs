use super::*;

fn action(line: &str) -> UiAction {
    match parse_command(line).expect("parse") {
        Command::Action(action) => action,
        other => panic!("expected action for '{line}', got {other:?}"),
    }
}

#[test]
fn selects_and_clears_facets() {
    assert_eq!(
        action("genre 5"),
        UiAction::Select {
            facet: FacetName::Genre,
            option: Some(OptionId(5)),
        }
    );
    assert_eq!(
        action("Country none"),
        UiAction::Select {
            facet: FacetName::Country,
            option: None,
        }
    );
    assert_eq!(
        action("year 1999"),
        UiAction::Select {
            facet: FacetName::Year,
            option: Some(OptionId(1999)),
        }
    );
}

#[test]
fn find_keeps_the_whole_term() {
    assert_eq!(
        action("find actor ann marie"),
        UiAction::SearchFacet {
            facet: FacetName::Actor,
            term: "ann marie".into(),
        }
    );
    assert!(parse_command("find actor").is_err());
}

#[test]
fn more_targets_results_or_a_facet() {
    assert_eq!(action("more"), UiAction::LoadMoreResults);
    assert_eq!(
        action("more director"),
        UiAction::LoadMoreOptions {
            facet: FacetName::Director,
        }
    );
}

#[test]
fn title_search_may_be_cleared() {
    assert_eq!(
        action("search the thing"),
        UiAction::SetTitleSearch("the thing".into())
    );
    assert_eq!(action("search"), UiAction::SetTitleSearch(String::new()));
}

#[test]
fn control_commands() {
    assert_eq!(action("reset"), UiAction::Reset);
    assert_eq!(action("retry"), UiAction::RetryResults);
    assert_eq!(parse_command("quit").expect("quit"), Command::Quit);
    assert_eq!(parse_command("  ").expect("blank"), Command::Help);
    assert_eq!(parse_command("show").expect("show"), Command::Show(None));
    assert_eq!(
        parse_command("show actor").expect("show actor"),
        Command::Show(Some(FacetName::Actor))
    );
}

#[test]
fn rejects_bad_input() {
    assert!(parse_command("genre").is_err());
    assert!(parse_command("genre drama").is_err());
    assert!(parse_command("studio 4").is_err());
    assert!(parse_command("more studio").is_err());
}
