use crest::error::CompileError;
use crest::routing::{Dispatcher, Label, NodeKind, Route, compile, compile_source, parse_routes};

fn books() -> Vec<Route> {
    vec![
        Route::new("show", "/books"),
        Route::new("create", "/books/new"),
        Route::new("index", "/"),
    ]
}

fn handler<'a>(dispatcher: &'a Dispatcher, uri: &str) -> Option<&'a str> {
    dispatcher.dispatch(uri).map(|id| id.as_str())
}

#[test]
fn test_dispatch_literal_routes() {
    let dispatcher = Dispatcher::new(compile(&books()).unwrap());

    assert_eq!(handler(&dispatcher, "/books"), Some("show"));
    assert_eq!(handler(&dispatcher, "/books/new"), Some("create"));
    assert_eq!(handler(&dispatcher, "/"), Some("index"));
    assert_eq!(handler(&dispatcher, "/missing"), None);
}

#[test]
fn test_prefix_of_route_does_not_match() {
    let dispatcher = Dispatcher::new(compile(&books()).unwrap());

    assert_eq!(handler(&dispatcher, "/book"), None);
    assert_eq!(handler(&dispatcher, "/books/"), None);
    assert_eq!(handler(&dispatcher, "/books/newer"), None);
    assert_eq!(handler(&dispatcher, ""), None);
}

#[test]
fn test_longer_uri_does_not_match_shorter_route() {
    let dispatcher = Dispatcher::new(compile(&[Route::new("show", "/books")]).unwrap());

    assert_eq!(handler(&dispatcher, "/books/1"), None);
    assert_eq!(handler(&dispatcher, "/booksx"), None);
}

#[test]
fn test_compiled_automaton_is_deterministic() {
    let automaton = compile(&books()).unwrap();

    assert!(automaton.is_deterministic());
    assert_eq!(automaton.start().kind, NodeKind::Start);
    // "/books/new" shares "/books" which shares "/" with the index route.
    assert_eq!(
        automaton.start().transitions.len(),
        1,
        "all routes start with '/'"
    );
    assert_eq!(automaton.handlers().len(), 3);
}

#[test]
fn test_each_route_reaches_one_accepting_node() {
    let automaton = compile(&books()).unwrap();
    let accepting = automaton
        .nodes()
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::Accepting { .. }))
        .count();

    assert_eq!(accepting, 3);
    for node in automaton.nodes() {
        for t in &node.transitions {
            let target = automaton.node(t.to);
            match t.label {
                Label::EndOfPath => assert!(target.handler().is_some()),
                Label::Byte(_) => assert!(target.handler().is_none()),
            }
        }
    }
}

#[test]
fn test_compiling_twice_gives_same_language() {
    let mut reordered = books();
    reordered.reverse();

    let a = compile(&books()).unwrap();
    let b = compile(&books()).unwrap();
    let c = compile(&reordered).unwrap();

    assert_eq!(a.routes(), b.routes());
    assert_eq!(a.routes(), c.routes());
    assert_eq!(
        a.routes()
            .iter()
            .map(|(p, h)| (p.as_str(), h.as_str()))
            .collect::<Vec<_>>(),
        vec![("/", "index"), ("/books", "show"), ("/books/new", "create")]
    );
}

#[test]
fn test_duplicate_path_is_rejected() {
    let err = compile(&[
        Route::new("show", "/books"),
        Route::new("list", "/books"),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        CompileError::DuplicateRoute {
            path: "/books".to_string(),
            first: "show".to_string(),
            second: "list".to_string(),
        }
    );
}

#[test]
fn test_duplicate_path_with_same_handler_is_rejected() {
    let err = compile(&[Route::new("show", "/a"), Route::new("show", "/a")]).unwrap_err();

    assert!(matches!(err, CompileError::DuplicateRoute { .. }));
}

#[test]
fn test_duplicate_buried_after_shared_prefix() {
    let err = compile_source("a /x/y\nb /x\nc /x/z\nd /x/y\n").unwrap_err();

    assert!(matches!(err, CompileError::DuplicateRoute { ref path, .. } if path == "/x/y"));
}

#[test]
fn test_empty_input() {
    assert_eq!(compile(&[]).unwrap_err(), CompileError::EmptyInput);
    assert_eq!(compile_source("\n  \n").unwrap_err(), CompileError::EmptyInput);
}

#[test]
fn test_invalid_route_syntax_reports_line() {
    let cases = [
        ("index /\nshow\n", 2),
        ("index /\n\nshow books\n", 3),
        ("index / extra\n", 1),
        ("index /\nself /x\n", 2),
        ("index /\nSelf /x\n", 2),
        ("super /s\n", 1),
        ("crate /c\n", 1),
    ];

    for (source, expected) in cases {
        match compile_source(source) {
            Err(CompileError::InvalidRouteSyntax { line, .. }) => assert_eq!(line, expected),
            other => panic!("expected syntax error for {source:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_routes_built_in_code_check_handler_names() {
    for name in ["self", "super", "9lives", "two words"] {
        assert!(
            matches!(
                compile(&[Route::new(name, "/x")]),
                Err(CompileError::InvalidRouteSyntax { line: 0, .. })
            ),
            "{name}"
        );
    }
}

#[test]
fn test_route_source_format() {
    let routes = parse_routes("index /\n\n\tshow /books\ncreate   /books/new").unwrap();

    assert_eq!(routes.len(), 3);
    assert_eq!(routes[2].handler, "create");
    assert_eq!(routes[2].path, "/books/new");
    assert_eq!(routes[2].line, 4);
}

#[test]
fn test_many_routes_without_ceiling() {
    let routes: Vec<Route> = (0..500)
        .map(|i| Route::new(format!("h{i}"), format!("/items/{i}")))
        .collect();
    let dispatcher = Dispatcher::new(compile(&routes).unwrap());

    assert_eq!(handler(&dispatcher, "/items/0"), Some("h0"));
    assert_eq!(handler(&dispatcher, "/items/499"), Some("h499"));
    assert_eq!(handler(&dispatcher, "/items/500"), None);
    assert_eq!(handler(&dispatcher, "/items/"), None);
}

#[test]
fn test_non_ascii_path_bytes() {
    let dispatcher = Dispatcher::new(compile(&[Route::new("cafe", "/café")]).unwrap());

    assert_eq!(handler(&dispatcher, "/café"), Some("cafe"));
    assert_eq!(handler(&dispatcher, "/cafe"), None);
    // Latin-1 bytes are not the UTF-8 encoding of the route, so they miss.
    assert!(dispatcher.dispatch(b"/caf\xe9").is_none());
    assert!(dispatcher.dispatch("/café".as_bytes()).is_some());
}
