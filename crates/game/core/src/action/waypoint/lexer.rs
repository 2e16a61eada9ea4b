//! Tokenizer for waypoint expressions.

use super::error::ExpressionError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Name(String),

    // Keywords
    And,
    Or,
    Not,
    If,
    Else,
    For,
    In,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,

    End,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(value) => format!("number {}", value),
            Token::Name(name) => format!("name `{}`", name),
            Token::End => "end of expression".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::In => "in",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Comma => ",",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::StarStar => "**",
            Token::Slash => "/",
            Token::SlashSlash => "//",
            Token::Percent => "%",
            Token::Lt => "<",
            Token::Le => "<=",
            Token::Gt => ">",
            Token::Ge => ">=",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Number(_) | Token::Name(_) | Token::End => "",
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Splits `src` into tokens. The returned list always ends with [`Token::End`].
pub(crate) fn tokenize(src: &str) -> Result<Vec<Spanned>, ExpressionError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit))
        {
            pos = scan_number(bytes, pos);
            let text = &src[start..pos];
            let value = text.parse::<f64>().map_err(|_| ExpressionError::Syntax {
                expr: src.to_string(),
                offset: start,
                message: format!("malformed number `{}`", text),
            })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                offset: start,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            let token = match &src[start..pos] {
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                "if" => Token::If,
                "else" => Token::Else,
                "for" => Token::For,
                "in" => Token::In,
                name => Token::Name(name.to_string()),
            };
            tokens.push(Spanned {
                token,
                offset: start,
            });
            continue;
        }

        let next = bytes.get(pos + 1).copied();
        let (token, len) = match (c, next) {
            (b'*', Some(b'*')) => (Token::StarStar, 2),
            (b'/', Some(b'/')) => (Token::SlashSlash, 2),
            (b'<', Some(b'=')) => (Token::Le, 2),
            (b'>', Some(b'=')) => (Token::Ge, 2),
            (b'=', Some(b'=')) => (Token::EqEq, 2),
            (b'!', Some(b'=')) => (Token::NotEq, 2),
            (b'(', _) => (Token::LParen, 1),
            (b')', _) => (Token::RParen, 1),
            (b'[', _) => (Token::LBracket, 1),
            (b']', _) => (Token::RBracket, 1),
            (b',', _) => (Token::Comma, 1),
            (b'+', _) => (Token::Plus, 1),
            (b'-', _) => (Token::Minus, 1),
            (b'*', _) => (Token::Star, 1),
            (b'/', _) => (Token::Slash, 1),
            (b'%', _) => (Token::Percent, 1),
            (b'<', _) => (Token::Lt, 1),
            (b'>', _) => (Token::Gt, 1),
            _ => {
                let ch = src[start..].chars().next().unwrap_or('?');
                return Err(ExpressionError::Syntax {
                    expr: src.to_string(),
                    offset: start,
                    message: format!("unexpected character `{}`", ch),
                });
            }
        };
        pos += len;
        tokens.push(Spanned {
            token,
            offset: start,
        });
    }

    tokens.push(Spanned {
        token: Token::End,
        offset: src.len(),
    });
    Ok(tokens)
}

/// Advances over `digits [. digits] [(e|E) [+|-] digits]`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    let digits = |bytes: &[u8], mut pos: usize| {
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        pos
    };

    pos = digits(bytes, pos);
    if bytes.get(pos) == Some(&b'.') {
        pos = digits(bytes, pos + 1);
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            pos = digits(bytes, exp);
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn tokenizes_coordinate() {
        assert_eq!(
            kinds("(x, y+1)"),
            vec![
                Token::LParen,
                Token::Name("x".into()),
                Token::Comma,
                Token::Name("y".into()),
                Token::Plus,
                Token::Number(1.0),
                Token::RParen,
                Token::End,
            ]
        );
    }

    #[test]
    fn prefers_two_character_operators() {
        assert_eq!(
            kinds("a**b//c<=d!=e"),
            vec![
                Token::Name("a".into()),
                Token::StarStar,
                Token::Name("b".into()),
                Token::SlashSlash,
                Token::Name("c".into()),
                Token::Le,
                Token::Name("d".into()),
                Token::NotEq,
                Token::Name("e".into()),
                Token::End,
            ]
        );
    }

    #[test]
    fn scans_decimal_and_exponent_numbers() {
        assert_eq!(
            kinds("1.5 .25 2e3 7E-1"),
            vec![
                Token::Number(1.5),
                Token::Number(0.25),
                Token::Number(2000.0),
                Token::Number(0.7),
                Token::End,
            ]
        );
    }

    #[test]
    fn recognizes_keywords() {
        assert_eq!(
            kinds("for i in range"),
            vec![
                Token::For,
                Token::Name("i".into()),
                Token::In,
                Token::Name("range".into()),
                Token::End,
            ]
        );
    }

    #[test]
    fn rejects_unknown_characters_with_offset() {
        let err = tokenize("(x, y) ; 1").unwrap_err();
        assert!(matches!(err, ExpressionError::Syntax { offset: 7, .. }));

        assert!(tokenize("x = 1").is_err());
        assert!(tokenize("__import__('os')").is_err());
    }
}
