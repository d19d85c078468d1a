//! Integration tests for the combinator engine
//!
//! Uses the two small grammars `D <- [0-9]+` and `S <- ("+" / "-")? D`, plus
//! hand-built combinators run directly against a `ParseState`.

use parcom::grammars::number;
use parcom::{
    alternation, char_class, literal, optional, reference, repetition, sequence, CharClass,
    Combinator, Grammar, ParseNode, ParseState,
};
use rstest::rstest;
use std::collections::HashMap;

fn digit() -> Combinator<()> {
    char_class(CharClass::range('0', '9'))
}

fn digits_and_signed() -> Grammar<()> {
    Grammar::builder("S")
        .rule(
            "S",
            sequence(vec![
                optional(alternation(vec![literal("+"), literal("-")])),
                reference("D"),
            ]),
        )
        .rule("D", repetition(digit(), 1))
        .build()
        .unwrap()
}

fn no_rules() -> HashMap<String, Combinator<()>> {
    HashMap::new()
}

#[test]
fn test_digits_consumed_fully() {
    let node = digits_and_signed().parse_rule("D", "123").unwrap();
    assert_eq!(
        node,
        ParseNode::Repetition(vec![
            ParseNode::Char('1'),
            ParseNode::Char('2'),
            ParseNode::Char('3'),
        ])
    );
}

#[test]
fn test_empty_input_has_too_few_digits() {
    assert!(digits_and_signed().parse_rule("D", "").is_none());
}

#[test]
fn test_trailing_input_is_rejected() {
    let grammar = digits_and_signed();

    // The rule itself matches the prefix...
    let rule = grammar.rule("D").unwrap();
    let (_, end) = rule.apply(&grammar, ParseState::new("12a")).unwrap();
    assert_eq!(end.offset(), 2);

    // ...but the driver requires the whole input.
    assert!(grammar.parse_rule("D", "12a").is_none());
}

#[test]
fn test_signed_digit() {
    let node = digits_and_signed().parse("-5").unwrap();
    assert_eq!(
        node,
        ParseNode::Sequence(vec![
            ParseNode::Repetition(vec![ParseNode::Literal("-".into())]),
            ParseNode::Repetition(vec![ParseNode::Char('5')]),
        ])
    );
}

#[rstest]
#[case("5", true)]
#[case("+5", true)]
#[case("-55", true)]
#[case("--5", false)]
#[case("+", false)]
#[case("5-", false)]
fn test_signed_grammar_acceptance(#[case] input: &str, #[case] accepted: bool) {
    assert_eq!(digits_and_signed().parse(input).is_some(), accepted);
}

#[test]
fn test_sequence_failure_leaves_original_state_usable() {
    let state = ParseState::new("-x");
    let seq = sequence(vec![literal("-"), digit()]);

    assert!(seq.apply(&no_rules(), state).is_none());

    // The same state still works for a different combinator, from the start.
    let (node, next) = literal::<()>("-").apply(&no_rules(), state).unwrap();
    assert_eq!(node, ParseNode::Literal("-".into()));
    assert_eq!(next.offset(), 1);
    assert_eq!(state.offset(), 0);
}

#[rstest]
#[case("", 0)]
#[case("7", 1)]
#[case("789", 3)]
#[case("78x9", 2)]
fn test_repetition_end_state_matches_count(#[case] input: &str, #[case] available: usize) {
    for min in 0..=4 {
        let result = repetition(digit(), min).apply(&no_rules(), ParseState::new(input));
        match result {
            Some((node, end)) => {
                assert!(available >= min);
                assert_eq!(node.children().len(), available);
                assert_eq!(end.offset(), available);
            }
            None => assert!(available < min),
        }
    }
}

#[test]
fn test_alternation_prefers_declaration_order() {
    let short_first = alternation(vec![literal::<()>("a"), literal("abc")]);
    let (node, next) = short_first.apply(&no_rules(), ParseState::new("abc")).unwrap();
    assert_eq!(node, ParseNode::Literal("a".into()));
    assert_eq!(next.offset(), 1);

    let long_first = alternation(vec![literal::<()>("abc"), literal("a")]);
    let (node, next) = long_first.apply(&no_rules(), ParseState::new("abc")).unwrap();
    assert_eq!(node, ParseNode::Literal("abc".into()));
    assert_eq!(next.offset(), 3);
}

#[test]
fn test_alternation_result_can_fail_the_whole_parse() {
    // First-match-wins: "a" is chosen, leaving "bc" unconsumed.
    let grammar: Grammar<()> = Grammar::builder("main")
        .rule("main", alternation(vec![literal("a"), literal("abc")]))
        .build()
        .unwrap();
    assert!(grammar.parse("abc").is_none());
    assert!(grammar.parse("a").is_some());
}

#[test]
fn test_mutual_recursion() {
    // even <- "a" odd / ""   odd <- "a" even
    let grammar: Grammar<()> = Grammar::builder("even")
        .rule(
            "even",
            alternation(vec![sequence(vec![literal("a"), reference("odd")]), literal("")]),
        )
        .rule("odd", sequence(vec![literal("a"), reference("even")]))
        .build()
        .unwrap();

    assert!(grammar.parse("").is_some());
    assert!(grammar.parse("aa").is_some());
    assert!(grammar.parse("aaaa").is_some());
    assert!(grammar.parse("aaa").is_none());
}

#[test]
fn test_transform_result_is_opaque_to_parents() {
    let grammar: Grammar<u32> = Grammar::builder("pair")
        .rule(
            "pair",
            sequence(vec![reference("n"), literal(","), reference("n")])
                .map(|node| node.children().iter().filter_map(|c| c.as_value()).sum::<u32>()),
        )
        .rule(
            "n",
            char_class(CharClass::range('0', '9'))
                .map(|node| node.as_char().and_then(|c| c.to_digit(10)).unwrap_or(0)),
        )
        .build()
        .unwrap();

    assert_eq!(grammar.parse_value("3,4"), Some(7));
}

#[test]
fn test_reparse_is_deterministic() {
    let grammar = number::grammar().unwrap();
    let first = grammar.parse("-12345");
    let second = grammar.parse("-12345");
    assert_eq!(first, second);
    assert_eq!(first.and_then(ParseNode::into_value), Some(-12345));
}

#[test]
fn test_grammar_is_shared_across_threads() {
    let grammar = number::grammar().unwrap();
    let inputs = ["1", "-22", "+333", "x"];

    let results: Vec<Option<i64>> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let grammar = &grammar;
                scope.spawn(move || grammar.parse_value(input))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, vec![Some(1), Some(-22), Some(333), None]);
}

#[test]
fn test_pattern_char_class() {
    let ident: Grammar<()> = Grammar::builder("ident")
        .rule(
            "ident",
            sequence(vec![
                char_class(CharClass::pattern("a-zA-Z_").unwrap()),
                repetition(char_class(CharClass::pattern("a-zA-Z0-9_").unwrap()), 0),
            ]),
        )
        .build()
        .unwrap();

    assert!(ident.parse("snake_case_2").is_some());
    assert!(ident.parse("2fast").is_none());
}
