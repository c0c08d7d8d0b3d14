//! Restricted arithmetic expression evaluator.
//!
//! Accepts the elementary functions drafting agents are told to use and
//! nothing else: no variables, no assignment, no calls outside the fixed
//! table. Grammar:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := '-' unary | power
//! power      := atom (('^' | '**') unary)?
//! atom       := number | name | name '(' args ')' | '(' expression ')'
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("malformed number '{0}'")]
    BadNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expected '{0}'")]
    Expected(char),

    #[error("trailing input after expression")]
    TrailingInput,

    #[error("unknown name '{0}'")]
    UnknownName(String),

    #[error("{name} takes {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NotFinite,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

/// Evaluate one expression to a finite value.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != tokens.len() {
        return Err(CalcError::TrailingInput);
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Render a computed value the way it is substituted into draft text:
/// scientific notation outside [0.01, 10000], integers without a
/// fractional part, four decimals otherwise.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude < 0.01 || magnitude > 10_000.0) {
        format!("{value:.4e}")
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| CalcError::BadNumber(literal.to_string()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = i + 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Name(input[start..end].to_string()));
            }
            '*' => {
                chars.next();
                // Python-style '**' is accepted as the power operator
                if let Some(&(_, '*')) = chars.peek() {
                    chars.next();
                    tokens.push(Token::Caret);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            other => return Err(CalcError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, token: Token, display: char) -> Result<(), CalcError> {
        match self.advance() {
            Some(t) if *t == token => Ok(()),
            Some(_) => Err(CalcError::Expected(display)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value %= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        if let Some(Token::Minus) = self.peek() {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            // right-associative: 2^3^2 == 2^(3^2)
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.advance().cloned() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Name(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.pos += 1;
                    let args = self.arguments()?;
                    apply(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(Token::LParen) => {
                let value = self.expression()?;
                self.expect(Token::RParen, ')')?;
                Ok(value)
            }
            Some(_) => Err(CalcError::Expected('(')),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, CalcError> {
        let mut args = Vec::new();
        if let Some(Token::RParen) = self.peek() {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RParen) => return Ok(args),
                Some(_) => return Err(CalcError::Expected(')')),
                None => return Err(CalcError::UnexpectedEnd),
            }
        }
    }
}

fn constant(name: &str) -> Result<f64, CalcError> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        other => Err(CalcError::UnknownName(other.to_string())),
    }
}

fn apply(name: &str, args: &[f64]) -> Result<f64, CalcError> {
    let unary = |f: fn(f64) -> f64| {
        if args.len() == 1 {
            Ok(f(args[0]))
        } else {
            Err(CalcError::WrongArity {
                name: name.to_string(),
                expected: 1,
                got: args.len(),
            })
        }
    };
    let binary = |f: fn(f64, f64) -> f64| {
        if args.len() == 2 {
            Ok(f(args[0], args[1]))
        } else {
            Err(CalcError::WrongArity {
                name: name.to_string(),
                expected: 2,
                got: args.len(),
            })
        }
    };

    match name {
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "asin" => unary(f64::asin),
        "acos" => unary(f64::acos),
        "atan" => unary(f64::atan),
        "sqrt" => unary(f64::sqrt),
        "exp" => unary(f64::exp),
        "log" | "ln" => unary(f64::ln),
        "log10" => unary(f64::log10),
        "radians" => unary(f64::to_radians),
        "degrees" => unary(f64::to_degrees),
        "abs" => unary(f64::abs),
        "round" => unary(f64::round),
        "floor" => unary(f64::floor),
        "ceil" => unary(f64::ceil),
        "min" => binary(f64::min),
        "max" => binary(f64::max),
        "pow" => binary(f64::powf),
        other => Err(CalcError::UnknownName(other.to_string())),
    }
}
