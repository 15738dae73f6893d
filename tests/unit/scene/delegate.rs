use super::*;

#[test]
fn interactive_list_matches_tags_and_classes() {
    let sel = SelectorList::interactive();
    assert!(sel.matches(&ElementInfo::new("a")));
    assert!(sel.matches(&ElementInfo::new("BUTTON")));
    assert!(sel.matches(&ElementInfo::new("div").with_class("hover-trigger")));
    assert!(!sel.matches(&ElementInfo::new("div").with_class("card")));
}

#[test]
fn closest_walks_up_the_path() {
    let sel = SelectorList::interactive();
    let path = vec![
        ElementInfo::new("span"),
        ElementInfo::new("svg"),
        ElementInfo::new("a"),
        ElementInfo::new("nav"),
    ];
    assert_eq!(sel.closest(&path), Some(2));
    assert_eq!(sel.closest(&path[..2]), None);
    assert_eq!(sel.closest(&[]), None);
}

#[test]
fn compound_selectors_need_every_part() {
    let sel = SelectorList::parse("button.primary.big").unwrap();
    let el = ElementInfo::new("button").with_class("primary");
    assert!(!sel.matches(&el));
    assert!(sel.matches(&el.with_class("big")));
}

#[test]
fn unsupported_syntax_is_rejected() {
    assert!(SelectorList::parse("a, , b").is_err());
    assert!(SelectorList::parse("div > a").is_err());
    assert!(SelectorList::parse("a:hover").is_err());
    assert!(matches!(SelectorList::parse("."), Err(GlideError::Config(_))));
}
