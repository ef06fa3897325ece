use nodequery::document::parser::parse_design;
use nodequery::document::tree::Tree;
use nodequery::file::loader::parse_script;
use nodequery::query::{Command, QueryError, Selection, Selector, Strategy};

const REFERENCE_DESIGN: &str = r#"
root:
  node: rootNode
  red: dark
  children:
    foo:
      node: fooNode
      purple: true
      children:
        bar:
          node: barNode
          purple: true
          yellow: not
          red: dark
    qux:
      node: quxNode
      red: light
    baz:
      node: bazNode
      purple: true
      red: dark
"#;

fn reference_tree() -> Tree<String> {
    parse_design(REFERENCE_DESIGN).unwrap()
}

fn run(tree: &Tree<String>, script: &str) -> Result<Vec<String>, QueryError> {
    let commands = parse_script(script).unwrap();
    Selection::new(tree)
        .find_with_commands(&commands)
        .map(|selection| selection.iter().cloned().collect())
}

fn sorted(mut payloads: Vec<String>) -> Vec<String> {
    payloads.sort();
    payloads
}

#[test]
fn test_no_commands_is_identity() {
    let tree = reference_tree();
    assert_eq!(run(&tree, "[]").unwrap(), vec!["rootNode"]);

    let selection = Selection::new(&tree).find_all(&Selector::any());
    let same = selection.find_with_commands(&[]).unwrap();
    assert_eq!(same.payloads(), selection.payloads());
}

#[test]
fn test_applies_find() {
    let tree = reference_tree();
    let result = run(&tree, "[{type: find, selector: {red: light}}]").unwrap();
    assert_eq!(result, vec!["quxNode"]);
}

#[test]
fn test_applies_find_all() {
    let tree = reference_tree();
    let result = run(&tree, "[{type: findAll, selector: {purple: true}}]").unwrap();
    assert_eq!(sorted(result), vec!["barNode", "bazNode", "fooNode"]);
}

#[test]
fn test_applies_find_in_children() {
    let tree = reference_tree();
    let result = run(&tree, "[{type: findInChildren, selector: {purple: true}}]").unwrap();
    assert_eq!(result, vec!["fooNode"]);
}

#[test]
fn test_applies_find_all_in_children() {
    let tree = reference_tree();
    let result = run(&tree, "[{type: findAllInChildren, selector: {purple: true}}]").unwrap();
    assert_eq!(sorted(result), vec!["bazNode", "fooNode"]);
}

#[test]
fn test_commands_are_chained() {
    let tree = reference_tree();
    let script = r#"
- type: findAllInChildren
  selector: { purple: true }
- type: find
  selector: { yellow: not }
"#;
    assert_eq!(run(&tree, script).unwrap(), vec!["barNode"]);
}

#[test]
fn test_result_is_chainable() {
    let tree = reference_tree();
    let first = [Command::new(Strategy::FindAllInChildren, Selector::any())];
    let second = [Command::new(Strategy::Find, Selector::any().with("red", "dark"))];
    let result = Selection::new(&tree)
        .find_with_commands(&first)
        .unwrap()
        .find_with_commands(&second)
        .unwrap();
    assert_eq!(result.payloads(), vec!["barNode", "bazNode"]);
}

#[test]
fn test_unknown_type_fails() {
    let tree = reference_tree();
    let err = run(&tree, "[{type: unknown, selector: {}}]").unwrap_err();
    assert_eq!(
        err,
        QueryError::UnsupportedCommand {
            kind: "unknown".to_string()
        }
    );
}

#[test]
fn test_unknown_type_fails_on_empty_selection() {
    let tree: Tree<String> = Tree::new();
    let err = run(&tree, "[{type: unknown}]").unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedCommand { .. }));
}

#[test]
fn test_unknown_type_fails_whole_script() {
    let tree = reference_tree();
    let script = "[{type: findAll}, {type: find, selector: {red: dark}}, {type: remove}]";
    let err = run(&tree, script).unwrap_err();
    assert!(err.to_string().contains("'remove'"), "{}", err);
}

#[test]
fn test_invalid_selector_in_script_is_rejected() {
    let err = parse_script("[{type: findInChildren, selector: bar}]").unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid selector"), "{:#}", err);
}

#[test]
fn test_spread_search_per_branch() {
    let tree = parse_design(
        r#"
root:
  red: dark
  children:
    foo:
      purple: true
      children:
        bar: { red: dark }
    qux:
      purple: true
      children:
        baz: { red: dark }
"#,
    )
    .unwrap();
    let script = "[{type: findAll, selector: {purple: true}}, {type: findInChildren, selector: {red: dark}}]";
    assert_eq!(sorted(run(&tree, script).unwrap()), vec!["bar", "baz"]);
}
