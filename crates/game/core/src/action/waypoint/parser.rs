//! Recursive-descent parser producing the waypoint expression AST.
//!
//! Grammar (lowest precedence first):
//!
//! ```text
//! expr        := disjunction [ "if" disjunction "else" expr ]
//! disjunction := conjunction { "or" conjunction }
//! conjunction := inversion { "and" inversion }
//! inversion   := "not" inversion | comparison
//! comparison  := sum { ("<" | "<=" | ">" | ">=" | "==" | "!=") sum }
//! sum         := term { ("+" | "-") term }
//! term        := factor { ("*" | "/" | "//" | "%") factor }
//! factor      := ("+" | "-") factor | power
//! power       := atom [ "**" factor ]
//! atom        := NUMBER | NAME | "range" "(" args ")"
//!              | "(" ")" | "(" expr ")" | "(" expr "," [ exprs ] ")"
//!              | "[" "]" | "[" exprs "]" | "[" expr clause { clause } "]"
//! clause      := "for" NAME "in" disjunction { "if" disjunction }
//! ```

use super::error::ExpressionError;
use super::lexer::{Spanned, Token, tokenize};

/// Names the evaluator binds itself; comprehension variables may not shadow them.
pub(crate) const RESERVED_NAMES: [&str; 6] = ["x", "y", "w", "h", "any", "range"];

/// Deepest expression tree the parser accepts.
pub const MAX_NESTING: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Plus,
    Minus,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LogicOp {
    And,
    Or,
}

/// One `for NAME in ITER if COND...` clause of a list comprehension.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Clause {
    pub var: String,
    pub iter: Expr,
    pub filters: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Chained comparison: `a < b <= c` means `a < b and b <= c`.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CompareOp, Expr)>,
    },
    Logic {
        op: LogicOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        then: Box<Expr>,
        cond: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Comprehension {
        element: Box<Expr>,
        clauses: Vec<Clause>,
    },
    Range(Vec<Expr>),
}

/// Parses a complete expression; trailing input is an error.
pub(crate) fn parse(src: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    parser.expect(Token::End)?;
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    /// Levels of the tree currently open; bounded by [`MAX_NESTING`].
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        // `tokenize` guarantees a trailing `End`, and `advance` never moves past it.
        &self.tokens[self.pos].token
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].offset
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), ExpressionError> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                token.describe(),
                self.peek().describe()
            )))
        }
    }

    fn error(&self, message: String) -> ExpressionError {
        ExpressionError::Syntax {
            expr: self.src.to_string(),
            offset: self.offset(),
            message,
        }
    }

    /// Opens one more level of the tree.
    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error(format!(
                "expression nests deeper than {} levels",
                MAX_NESTING
            )));
        }
        Ok(())
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ExpressionError>,
    ) -> Result<T, ExpressionError> {
        self.descend()?;
        let parsed = parse(self)?;
        self.depth -= 1;
        Ok(parsed)
    }

    fn expr(&mut self) -> Result<Expr, ExpressionError> {
        self.nested(Self::conditional)
    }

    fn conditional(&mut self) -> Result<Expr, ExpressionError> {
        let then = self.disjunction()?;
        if !self.eat(&Token::If) {
            return Ok(then);
        }
        let cond = self.disjunction()?;
        self.expect(Token::Else)?;
        let otherwise = self.expr()?;
        Ok(Expr::Conditional {
            then: Box::new(then),
            cond: Box::new(cond),
            otherwise: Box::new(otherwise),
        })
    }

    fn disjunction(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.conjunction()?;
        let depth = self.depth;
        while self.eat(&Token::Or) {
            self.descend()?;
            let rhs = self.conjunction()?;
            lhs = Expr::Logic {
                op: LogicOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn conjunction(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.inversion()?;
        let depth = self.depth;
        while self.eat(&Token::And) {
            self.descend()?;
            let rhs = self.inversion()?;
            lhs = Expr::Logic {
                op: LogicOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn inversion(&mut self) -> Result<Expr, ExpressionError> {
        if self.eat(&Token::Not) {
            let operand = self.nested(Self::inversion)?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ExpressionError> {
        let first = self.sum()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Token::Lt => CompareOp::Lt,
                Token::Le => CompareOp::Le,
                Token::Gt => CompareOp::Gt,
                Token::Ge => CompareOp::Ge,
                Token::EqEq => CompareOp::Eq,
                Token::NotEq => CompareOp::NotEq,
                _ => break,
            };
            self.advance();
            rest.push((op, self.sum()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn sum(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        let depth = self.depth;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.factor()?;
        let depth = self.depth;
        loop {
            let op = match self.peek() {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::SlashSlash => BinaryOp::FloorDiv,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ExpressionError> {
        let op = match self.peek() {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.advance();
        let operand = self.nested(Self::factor)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.atom()?;
        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }
        // Right-associative, and binds tighter than a unary minus on its left.
        let exponent = self.nested(Self::factor)?;
        Ok(Expr::Binary {
            op: BinaryOp::Pow,
            lhs: Box::new(base),
            rhs: Box::new(exponent),
        })
    }

    fn atom(&mut self) -> Result<Expr, ExpressionError> {
        let offset = self.offset();
        match self.advance() {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Name(name) if name == "range" => {
                self.expect(Token::LParen)?;
                let args = self.sequence(&Token::RParen)?;
                if args.is_empty() || args.len() > 3 {
                    return Err(self.error(format!(
                        "range takes 1 to 3 arguments, found {}",
                        args.len()
                    )));
                }
                Ok(Expr::Range(args))
            }
            Token::Name(name) => {
                if self.peek() == &Token::LParen {
                    return Err(self.error(format!("`{}` is not callable", name)));
                }
                Ok(Expr::Name(name))
            }
            Token::LParen => self.parenthesized(),
            Token::LBracket => self.bracketed(),
            other => Err(ExpressionError::Syntax {
                expr: self.src.to_string(),
                offset,
                message: format!("unexpected {}", other.describe()),
            }),
        }
    }

    /// After `(`: unit tuple, grouping, or tuple literal.
    fn parenthesized(&mut self) -> Result<Expr, ExpressionError> {
        if self.eat(&Token::RParen) {
            return Ok(Expr::Tuple(Vec::new()));
        }
        let first = self.expr()?;
        if self.eat(&Token::RParen) {
            return Ok(first);
        }
        self.expect(Token::Comma)?;
        let mut items = vec![first];
        items.extend(self.sequence(&Token::RParen)?);
        Ok(Expr::Tuple(items))
    }

    /// After `[`: list literal or list comprehension.
    fn bracketed(&mut self) -> Result<Expr, ExpressionError> {
        if self.eat(&Token::RBracket) {
            return Ok(Expr::List(Vec::new()));
        }
        let first = self.expr()?;
        if self.peek() == &Token::For {
            let mut clauses = Vec::new();
            while self.eat(&Token::For) {
                clauses.push(self.clause()?);
            }
            self.expect(Token::RBracket)?;
            return Ok(Expr::Comprehension {
                element: Box::new(first),
                clauses,
            });
        }
        let mut items = vec![first];
        if self.eat(&Token::Comma) {
            items.extend(self.sequence(&Token::RBracket)?);
        } else {
            self.expect(Token::RBracket)?;
        }
        Ok(Expr::List(items))
    }

    fn clause(&mut self) -> Result<Clause, ExpressionError> {
        let var = match self.advance() {
            Token::Name(name) => name,
            other => {
                return Err(self.error(format!(
                    "expected loop variable, found {}",
                    other.describe()
                )));
            }
        };
        if RESERVED_NAMES.contains(&var.as_str()) {
            return Err(self.error(format!("cannot rebind reserved name `{}`", var)));
        }
        self.expect(Token::In)?;
        let iter = self.disjunction()?;
        let mut filters = Vec::new();
        while self.eat(&Token::If) {
            filters.push(self.disjunction()?);
        }
        Ok(Clause { var, iter, filters })
    }

    /// Comma-separated expressions up to and including `close`; a trailing comma is allowed.
    fn sequence(&mut self, close: &Token) -> Result<Vec<Expr>, ExpressionError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.expr()?);
            if !self.eat(&Token::Comma) {
                self.expect(close.clone())?;
                return Ok(items);
            }
        }
    }
}
