use std::cell::OnceCell;
use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use crate::lexer::Token;

use super::state::{Failure, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let b = other.parse(state)?;
            Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let _ = other.parse(state)?;
            Ok(a)
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let _ = self.parse(state)?;
            other.parse(state)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Choice: try self, if it fails recoverably try other from the same position.
    /// A fatal failure of either side is returned as is.
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(err) if err.is_fatal() => Err(err),
                Err(first) => {
                    state.restore(pos);
                    match other.parse(state) {
                        Ok(b) => Ok(b),
                        Err(second) if second.is_fatal() => Err(second),
                        Err(second) => {
                            state.restore(pos);
                            Err(first.merge(second))
                        }
                    }
                }
            }
        })
    }

    /// Only accept values for which `predicate` holds.
    pub fn filter<F: Fn(&T) -> bool + 'static>(
        self,
        predicate: F,
        expected: &'static str,
    ) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let value = self.parse(state)?;
            if predicate(&value) {
                return Ok(value);
            }
            state.restore(start);
            let err = state.failure_here(expected);
            state.record_error(&err);
            Err(err)
        })
    }

    /// Add a label to this parser for better error messages. Failures that
    /// got past the first token keep their own, more precise, expectations.
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            match self.parse(state) {
                Ok(v) => Ok(v),
                Err(err) if err.position != start || err.is_fatal() => Err(err),
                Err(mut err) => {
                    err.expected = vec![name.to_string()];
                    state.record_error(&err);
                    Err(err)
                }
            }
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

/// Consume one token if `decode` accepts it.
pub fn token<T: 'static, F: Fn(&Token) -> Option<T> + 'static>(
    decode: F,
    expected: impl Into<String>,
) -> BoxedParser<T> {
    let expected = expected.into();
    BoxedParser::new(move |state: &mut ParseState| match state.peek().and_then(&decode) {
        Some(value) => {
            state.advance();
            Ok(value)
        }
        None => {
            let err = state.failure_here(expected.clone());
            state.record_error(&err);
            Err(err)
        }
    })
}

/// Match a symbol token with exactly this text.
pub fn symbol(text: &str) -> BoxedParser<String> {
    let text = text.to_string();
    let expected = format!("'{text}'");
    token(
        move |tok| match tok {
            Token::Symbol(symbol) if *symbol == text => Some(symbol.clone()),
            _ => None,
        },
        expected,
    )
}

/// Match a bare word with exactly this text.
pub fn keyword(word: &str) -> BoxedParser<String> {
    let word = word.to_string();
    let expected = format!("'{word}'");
    token(
        move |tok| match tok {
            Token::Word(w) if *w == word => Some(w.clone()),
            _ => None,
        },
        expected,
    )
}

pub fn newline() -> BoxedParser<()> {
    token(|tok| matches!(tok, Token::Newline).then_some(()), "newline")
}

/// Succeeds, consuming nothing, only when the cursor is exhausted.
pub fn end_of_input() -> BoxedParser<()> {
    BoxedParser::new(|state: &mut ParseState| {
        if state.has_next() {
            let err = state.failure_here("end of input");
            state.record_error(&err);
            Err(err)
        } else {
            Ok(())
        }
    })
}

// === Structural combinators ===

/// Try each parser in order from the same position; the first success wins.
pub fn alternative<T: 'static>(parsers: Vec<BoxedParser<T>>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        let mut failure: Option<Failure> = None;

        for parser in &parsers {
            match parser.parse(state) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    state.restore(pos);
                    failure = Some(match failure {
                        Some(previous) => previous.merge(err),
                        None => err,
                    });
                }
            }
        }

        Err(failure.unwrap_or_else(|| state.failure_here("an alternative")))
    })
}

/// Run every parser in order, collecting the results.
pub fn sequence<T: 'static>(parsers: Vec<BoxedParser<T>>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        parsers
            .iter()
            .map(|parser| parser.parse(state))
            .collect::<ParseResult<Vec<T>>>()
    })
}

/// left, then parser, then right; keeps only the middle result.
pub fn between<L: 'static, R: 'static, T: 'static>(
    left: BoxedParser<L>,
    right: BoxedParser<R>,
    parser: BoxedParser<T>,
) -> BoxedParser<T> {
    left * parser - right
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Parse one or more occurrences
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = parser.parse(state)?;
        let mut results = vec![first];
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_fatal() => Err(err),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Zero or more `item`s separated by `delimiter`. A delimiter that is not
/// followed by an item is left unconsumed.
pub fn separated_by<T: 'static, D: 'static>(
    item: BoxedParser<T>,
    delimiter: BoxedParser<D>,
) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut items = Vec::new();

        let start = state.position();
        match item.parse(state) {
            Ok(first) => items.push(first),
            Err(err) if err.is_fatal() => return Err(err),
            Err(_) => {
                state.restore(start);
                return Ok(items);
            }
        }

        loop {
            let pos = state.position();
            let next = delimiter.parse(state).and_then(|_| item.parse(state));
            match next {
                Ok(value) => items.push(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }

        Ok(items)
    })
}

/// Tie a recursive knot. `build` receives a handle that parses with the
/// parser `build` itself returns; the handle is resolved on first use.
///
/// The handle only holds a weak reference, so the returned parser must be
/// kept alive for as long as the handle is used.
pub fn recursive<T: 'static, F: FnOnce(BoxedParser<T>) -> BoxedParser<T>>(
    build: F,
) -> BoxedParser<T> {
    let cell: Rc<OnceCell<BoxedParser<T>>> = Rc::new(OnceCell::new());

    let weak = Rc::downgrade(&cell);
    let handle = BoxedParser::new(move |state: &mut ParseState| {
        let resolved = weak.upgrade().and_then(|cell| cell.get().cloned());
        match resolved {
            Some(parser) => parser.parse(state),
            None => Err(state.failure_here("a resolved recursive rule").promote()),
        }
    });

    let parser = build(handle);
    let _ = cell.set(parser);

    BoxedParser::new(move |state: &mut ParseState| match cell.get() {
        Some(parser) => parser.parse(state),
        None => Err(state.failure_here("a resolved recursive rule").promote()),
    })
}

/// Any recoverable failure inside `parser` becomes fatal, so enclosing
/// alternatives stop backtracking past it.
pub fn critical<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        parser.parse(state).map_err(|err| {
            if !err.is_fatal() {
                log::trace!(
                    "promoting failure at token {} to fatal (expected {:?})",
                    err.position,
                    err.expected
                );
            }
            err.promote()
        })
    })
}

/// Run `parser` and require that no input remains afterwards.
pub fn terminating<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let value = parser.parse(state)?;
        if state.has_next() {
            return Err(state.failure_here("end of input").trailing());
        }
        Ok(value)
    })
}
