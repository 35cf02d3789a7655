//! Expression normalizer
//!
//! Rewrites the calculator's display symbols (`÷`, `×`, `log`, `ln`, `e`)
//! into the syntax of the evaluator. Replacement is a single left-to-right
//! scan: `log` and `ln` are matched as whole tokens before any single
//! character substitution, so the `e` rewrite can never touch the inside of
//! a function name it produced itself.

/// Names the evaluator uses for the calculator's functions and constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorSyntax {
    /// Base-10 logarithm (display `log`)
    pub log10: &'static str,
    /// Natural logarithm (display `ln`)
    pub ln: &'static str,
    /// Euler's number (display `e`)
    pub euler: &'static str,
    /// Re-emit every numeric literal as a positional float (`5` -> `5.0`)
    pub float_literals: bool,
}

impl EvaluatorSyntax {
    /// Conventional names: `log10`, `log` (natural), `E`
    pub const PLAIN: Self = Self {
        log10: "log10",
        ln: "log",
        euler: "E",
        float_literals: false,
    };

    /// evalexpr builtins; integer literals are widened so `/` never truncates
    pub const EVALEXPR: Self = Self {
        log10: "math::log10",
        ln: "math::ln",
        euler: "math::e",
        float_literals: true,
    };
}

/// A lexical unit of calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Numeric literal exactly as typed, exponent suffix included
    Number(&'a str),
    Log,
    Ln,
    Euler,
    Divide,
    Multiply,
    /// Anything else (operators, brackets, whitespace, unknown characters)
    Other(&'a str),
}

/// Single-pass tokenizer over calculator input
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.pos..];
        let c = rest.chars().next()?;

        let (token, len) = if rest.starts_with("log") {
            (Token::Log, 3)
        } else if rest.starts_with("ln") {
            (Token::Ln, 2)
        } else if starts_literal(rest) {
            let len = literal_len(rest);
            (Token::Number(&rest[..len]), len)
        } else {
            let len = c.len_utf8();
            let token = match c {
                '÷' => Token::Divide,
                '×' => Token::Multiply,
                'e' => Token::Euler,
                _ => Token::Other(&rest[..len]),
            };
            (token, len)
        };

        self.pos += len;
        Some(token)
    }
}

fn starts_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_digit() => true,
        Some(b'.') => bytes.get(1).is_some_and(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Length of the numeric literal at the start of `text`
///
/// An `e`/`E` only belongs to the literal when an exponent (optionally
/// signed) follows it; otherwise it is left for the Euler constant.
fn literal_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut len = digits(0);
    if bytes.get(len) == Some(&b'.') {
        len += 1 + digits(len + 1);
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits(len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
        }
    }
    len
}

impl Token<'_> {
    /// A value ends here: literal, constant or closing bracket
    fn ends_operand(self) -> bool {
        matches!(self, Token::Number(_) | Token::Euler | Token::Other(")"))
    }

    /// A value starts here without a number: function, constant or bracket
    fn starts_factor(self) -> bool {
        matches!(self, Token::Log | Token::Ln | Token::Euler | Token::Other("("))
    }
}

/// Rewrite display input into evaluator syntax
///
/// Juxtaposed factors as typed on the keypad (`2e`, `2(3)`, `2log(100)`,
/// `(1)(2)`) get an explicit `*`.
pub fn normalize(input: &str, syntax: EvaluatorSyntax) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut previous: Option<Token<'_>> = None;

    for token in Scanner::new(input) {
        if previous.is_some_and(Token::ends_operand) && token.starts_factor() {
            out.push('*');
        }
        previous = Some(token);

        match token {
            Token::Number(literal) if syntax.float_literals => {
                out.push_str(&float_literal(literal));
            },
            Token::Number(text) | Token::Other(text) => out.push_str(text),
            Token::Log => out.push_str(syntax.log10),
            Token::Ln => out.push_str(syntax.ln),
            Token::Euler => out.push_str(syntax.euler),
            Token::Divide => out.push('/'),
            Token::Multiply => out.push('*'),
        }
    }

    out
}

/// Numeric literals of `input`, in order, exactly as typed
pub fn literals(input: &str) -> Vec<&str> {
    Scanner::new(input)
        .filter_map(|token| match token {
            Token::Number(literal) => Some(literal),
            _ => None,
        })
        .collect()
}

/// `f64` Display is positional (never exponent notation), so the output is
/// always something evalexpr reads as a float.
fn float_literal(literal: &str) -> String {
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let mut text = value.to_string();
            if !text.contains('.') {
                text.push_str(".0");
            }
            text
        },
        _ => literal.to_string(),
    }
}
