use nom::bytes::complete::take_while;
use nom::character::complete::{char, multispace0, satisfy};
use nom::combinator::{all_consuming, cut, map, recognize};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair};
use nom::{Finish, IResult};

use super::model::SelectionTree;

/// Hard cap on parenthesis nesting. The parser recurses per group, so
/// hostile input must not be able to grow the stack without bound.
const MAX_NESTING: usize = 64;

/// Malformed selection text. The position is the byte offset into the raw
/// input at which parsing could not continue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct ParseError {
    position: usize,
    message: String,
}

impl ParseError {
    fn from_nom(input: &str, err: NomError<&str>) -> Self {
        let position = input.len() - err.input.len();
        let message = match (err.code, err.input.chars().next()) {
            (ErrorKind::TooLarge, _) => "selection nested too deeply".to_string(),
            (ErrorKind::Char, Some('(')) => "unterminated '('".to_string(),
            (_, Some(c)) => format!("unexpected character `{c}`"),
            (_, None) => "unexpected end of input".to_string(),
        };
        ParseError { position, message }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parses an edge-selection expression into a [`SelectionTree`].
///
/// Blank input yields the empty tree ("expand nothing"). The parse is
/// all-or-nothing: any malformed input fails with a [`ParseError`] and no
/// partial tree is produced.
pub fn parse(input: &str) -> Result<SelectionTree, ParseError> {
    if input.trim().is_empty() {
        return Ok(SelectionTree::new());
    }

    match all_consuming(|input| edge_list(input, MAX_NESTING))(input).finish() {
        Ok((_, tree)) => Ok(tree),
        Err(err) => Err(ParseError::from_nom(input, err)),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn edge_list(input: &str, nesting: usize) -> IResult<&str, SelectionTree> {
    map(
        separated_list1(char('|'), |input| edge(input, nesting)),
        |edges| edges.into_iter().collect(),
    )(input)
}

fn edge(input: &str, nesting: usize) -> IResult<&str, (String, SelectionTree)> {
    let (rest, name) = ws(identifier)(input)?;

    let Ok((inner, _)) = char::<_, NomError<&str>>('(')(rest) else {
        return Ok((rest, (name.to_string(), SelectionTree::new())));
    };
    if nesting == 0 {
        return Err(nom::Err::Failure(NomError::new(rest, ErrorKind::TooLarge)));
    }

    let (inner, subtree) = cut(|input| edge_list(input, nesting - 1))(inner)?;
    match ws(char(')'))(inner) {
        Ok((after, _)) => Ok((after, (name.to_string(), subtree))),
        // report the opening parenthesis, not wherever its body stopped
        Err(_) => Err(nom::Err::Failure(NomError::new(rest, ErrorKind::Char))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_single_edge() {
        let tree = parse("relationship").unwrap();
        assert_eq!(tree, SelectionTree::new().with_edge("relationship"));
    }

    #[test]
    fn test_sibling_edges() {
        let tree = parse("relationship|friends|achievements").unwrap();
        assert_eq!(
            tree,
            SelectionTree::new()
                .with_edge("relationship")
                .with_edge("friends")
                .with_edge("achievements")
        );
    }

    #[test]
    fn test_nested_edges() {
        let tree = parse("relationship|friends(relationship|achievements)").unwrap();
        assert_eq!(
            tree,
            SelectionTree::new().with_edge("relationship").with(
                "friends",
                SelectionTree::new()
                    .with_edge("relationship")
                    .with_edge("achievements")
            )
        );
    }

    #[test]
    fn test_deep_nesting() {
        let tree = parse("a(b(c(d(e))))").unwrap();
        let expected = SelectionTree::new().with(
            "a",
            SelectionTree::new().with(
                "b",
                SelectionTree::new().with(
                    "c",
                    SelectionTree::new().with("d", SelectionTree::new().with_edge("e")),
                ),
            ),
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_whitespace_insignificant() {
        let compact = parse("a|b(c|d)").unwrap();
        let spaced = parse("  a | b ( c | d )  ").unwrap();
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap(), SelectionTree::new());
        assert_eq!(parse("   ").unwrap(), SelectionTree::new());
    }

    #[test]
    fn test_identifier_syntax() {
        let tree = parse("_private|v2_edge").unwrap();
        assert!(tree.contains("_private"));
        assert!(tree.contains("v2_edge"));
    }

    #[test]
    fn test_duplicate_edge_last_wins() {
        let tree = parse("a(x)|a(y)").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("a").unwrap(), &SelectionTree::new().with_edge("y"));
    }

    #[test]
    fn test_pretty_print_round_trip() {
        for input in ["a", "a|b", "a|b(c)", "a(b(c(d)|e)|f)|g", "rel_1|f2(x)"] {
            let tree = parse(input).unwrap();
            assert_eq!(parse(&tree.to_string()).unwrap(), tree, "input: {input}");
        }
    }

    #[test]
    fn test_unterminated_paren_points_at_opening() {
        let err = parse("a(b").unwrap_err();
        assert_eq!(err.position(), 1);
        assert_eq!(err.message(), "unterminated '('");
    }

    #[test]
    fn test_unterminated_nested_paren() {
        let err = parse("a(b(c)").unwrap_err();
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_trailing_pipe() {
        let err = parse("a|").unwrap_err();
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_leading_pipe() {
        let err = parse("|a").unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_empty_group() {
        let err = parse("a()").unwrap_err();
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn test_unbalanced_closing_paren() {
        let err = parse("a(b))").unwrap_err();
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn test_nesting_depth_capped() {
        let hostile = format!("{}x{}", "a(".repeat(100_000), ")".repeat(100_000));
        let err = parse(&hostile).unwrap_err();
        assert_eq!(err.message(), "selection nested too deeply");
        // the position points at the paren that broke the budget
        assert_eq!(err.position(), MAX_NESTING * 2 + 1);

        let deep_but_sane = format!("{}x{}", "a(".repeat(32), ")".repeat(32));
        assert!(parse(&deep_but_sane).is_ok());
    }

    #[test]
    fn test_invalid_identifier_start() {
        let err = parse("9lives").unwrap_err();
        assert_eq!(err.position(), 0);
    }
}
