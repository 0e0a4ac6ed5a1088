use nom::{
    branch::alt,
    character::complete::{anychar, char, none_of, one_of},
    combinator::{map, opt, value},
    error::{ErrorKind, ParseError},
    multi::many0,
    sequence::{preceded, tuple},
    IResult,
};
use std::cell::RefCell;

use crate::error::{CompileError, CompileErrorKind};
use crate::matchers::{CharSet, Polarity, DIGITS, WORD_CHARS};
use crate::pattern::Anchor;
use crate::syntax::{Node, Syntax};

/// Parse failure carrying the remaining input so the caller can recover a
/// position. `kind` is set for failures raised on purpose; plain nom
/// errors leave it empty.
#[derive(Debug)]
struct PatternError<'a> {
    input: &'a str,
    kind: Option<CompileErrorKind>,
}

impl<'a> ParseError<&'a str> for PatternError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self { input, kind: None }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, PatternError<'a>>;

fn failure<'a, O>(input: &'a str, kind: CompileErrorKind) -> PResult<'a, O> {
    Err(nom::Err::Failure(PatternError {
        input,
        kind: Some(kind),
    }))
}

struct ParseContext {
    /// One entry per opened group, `true` once its `)` has been seen.
    groups: RefCell<Vec<bool>>,
}

impl ParseContext {
    fn new() -> Self {
        Self {
            groups: RefCell::new(Vec::new()),
        }
    }

    fn next_group_number(&self) -> usize {
        let mut groups = self.groups.borrow_mut();
        groups.push(false);
        groups.len() - 1
    }

    fn close_group(&self, index: usize) {
        self.groups.borrow_mut()[index] = true;
    }

    fn is_closed(&self, index: usize) -> bool {
        self.groups.borrow().get(index).copied().unwrap_or(false)
    }

    fn group_count(&self) -> usize {
        self.groups.borrow().len()
    }
}

pub fn parse_pattern(pattern: &str) -> Result<Syntax, CompileError> {
    let (anchor, body, body_start) = split_anchors(pattern);
    let context = ParseContext::new();

    let position = |rest: &str| {
        let consumed = body_start + body.len().saturating_sub(rest.len());
        pattern.get(..consumed).map_or(0, |s| s.chars().count())
    };

    match alternatives(body, &context) {
        Ok(("", alternatives)) => Ok(Syntax {
            anchor,
            alternatives,
            group_count: context.group_count(),
        }),
        Ok((rest, _)) => Err(CompileError::new(leftover_kind(rest), position(rest))),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let kind = e.kind.unwrap_or_else(|| leftover_kind(e.input));
            Err(CompileError::new(kind, position(e.input)))
        }
        Err(nom::Err::Incomplete(_)) => Err(CompileError::new(
            CompileErrorKind::UnexpectedEnd,
            pattern.chars().count(),
        )),
    }
}

/// Strips a leading `^` and an unescaped trailing `$`. Returns the anchor,
/// the remaining body and the byte offset of the body in `pattern`.
fn split_anchors(pattern: &str) -> (Anchor, &str, usize) {
    let (start, body, body_start) = match pattern.strip_prefix('^') {
        Some(rest) => (true, rest, 1),
        None => (false, pattern, 0),
    };
    let (end, body) = match body.strip_suffix('$') {
        Some(rest) if !ends_with_escape(rest) => (true, rest),
        _ => (false, body),
    };
    (Anchor::from_flags(start, end), body, body_start)
}

fn ends_with_escape(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn leftover_kind(rest: &str) -> CompileErrorKind {
    match rest.chars().next() {
        Some(')') => CompileErrorKind::UnmatchedCloseParen,
        Some(q @ ('?' | '+' | '*')) => CompileErrorKind::NothingToRepeat(q),
        Some(c) => CompileErrorKind::Unexpected(c),
        None => CompileErrorKind::UnexpectedEnd,
    }
}

fn alternatives<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Vec<Vec<Node>>> {
    let (input, first) = sequence(input, context)?;
    let (input, mut rest) = many0(preceded(char('|'), |i| sequence(i, context)))(input)?;

    rest.insert(0, first);
    Ok((input, rest))
}

fn sequence<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Vec<Node>> {
    many0(|i| quantified(i, context))(input)
}

fn quantified<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Node> {
    let (input, base) = atom(input, context)?;
    let (input, quantifiers) = many0(one_of("?+*"))(input)?;

    let result = quantifiers.into_iter().fold(base, |node, q| match q {
        '?' => Node::Question(Box::new(node)),
        '+' => Node::Plus(Box::new(node)),
        _ => Node::Star(Box::new(node)),
    });

    Ok((input, result))
}

fn atom<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Node> {
    alt((
        dot,
        char_class,
        |i| escaped_char(i, context),
        |i| grouped(i, context),
        literal_char,
    ))(input)
}

fn dot(input: &str) -> PResult<'_, Node> {
    value(Node::Dot, char('.'))(input)
}

fn char_class(input: &str) -> PResult<'_, Node> {
    let (rest, _) = char('[')(input)?;
    let (rest, negated) = opt(char('^'))(rest)?;
    let (rest, items) = many0(class_item)(rest)?;
    let (rest, close) = opt(char(']'))(rest)?;

    if close.is_none() {
        return failure(input, CompileErrorKind::UnclosedSet);
    }
    let members: Vec<char> = items.into_iter().flatten().collect();
    if members.is_empty() {
        return failure(input, CompileErrorKind::EmptySet);
    }

    let polarity = if negated.is_some() {
        Polarity::Negative
    } else {
        Polarity::Positive
    };
    Ok((rest, Node::CharClass(CharSet::new(polarity, members))))
}

fn class_item(input: &str) -> PResult<'_, Vec<char>> {
    alt((
        preceded(char('\\'), map(anychar, class_escape)),
        class_range,
        map(none_of("]\\"), |c| vec![c]),
    ))(input)
}

fn class_escape(c: char) -> Vec<char> {
    match c {
        'd' => DIGITS.chars().collect(),
        'w' => WORD_CHARS.chars().collect(),
        c => vec![c],
    }
}

fn class_range(input: &str) -> PResult<'_, Vec<char>> {
    let (rest, (low, _, high)) = tuple((none_of("]\\"), char('-'), none_of("]\\")))(input)?;
    if low > high {
        return failure(input, CompileErrorKind::InvalidRange(low, high));
    }
    Ok((rest, (low..=high).collect()))
}

fn escaped_char<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Node> {
    let (rest, _) = char('\\')(input)?;
    let Ok((rest, ch)) = anychar::<_, PatternError>(rest) else {
        return failure(input, CompileErrorKind::TrailingBackslash);
    };

    let result = match ch {
        'd' => Node::Digit,
        'w' => Node::Word,
        '1'..='9' => {
            let number = ch as usize - '0' as usize;
            if !context.is_closed(number - 1) {
                return failure(input, CompileErrorKind::InvalidBackreference(number));
            }
            Node::Backreference(number - 1)
        }
        c => Node::Char(c),
    };

    Ok((rest, result))
}

fn grouped<'a>(input: &'a str, context: &ParseContext) -> PResult<'a, Node> {
    let (rest, _) = char('(')(input)?;
    let index = context.next_group_number();
    let (rest, alternatives) = alternatives(rest, context)?;

    match char::<_, PatternError>(')')(rest) {
        Ok((rest, _)) => {
            context.close_group(index);
            Ok((rest, Node::Group { index, alternatives }))
        }
        Err(_) if rest.is_empty() => failure(input, CompileErrorKind::UnclosedGroup),
        Err(_) => failure(rest, leftover_kind(rest)),
    }
}

fn literal_char(input: &str) -> PResult<'_, Node> {
    map(none_of("()[|\\.?+*"), Node::Char)(input)
}
