//! Token definitions for the sectioned properties format
//!
//! The tokens are defined using the logos derive macro. Every character of
//! the input falls into exactly one token, so tokenization never fails.
use logos::Logos;

/// All possible tokens in a properties file
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("-")]
    Dash,
    #[token("=")]
    Equals,

    // Line breaks: LF, CRLF or a lone CR
    #[regex(r"\r\n|\n|\r")]
    Newline,

    // Section names and keys are ASCII letters only
    #[regex(r"[A-Za-z]+")]
    Word,

    // Everything else, only meaningful inside values
    #[regex(r"[^\[\]\-=\r\nA-Za-z]+")]
    Text,
}

impl Token {
    /// Short form used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Token::OpenBracket => "'['",
            Token::CloseBracket => "']'",
            Token::Dash => "'-'",
            Token::Equals => "'='",
            Token::Newline => "line break",
            Token::Word => "name",
            Token::Text => "text",
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_section_tags() {
        assert_eq!(
            lex("[Main]"),
            vec![Token::OpenBracket, Token::Word, Token::CloseBracket]
        );
        assert_eq!(
            lex("[-Main]"),
            vec![
                Token::OpenBracket,
                Token::Dash,
                Token::Word,
                Token::CloseBracket
            ]
        );
    }

    #[test]
    fn test_key_value_line() {
        assert_eq!(
            lex("host=db 1\n"),
            vec![
                Token::Word,
                Token::Equals,
                Token::Word,
                Token::Text,
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            lex("\r\n\n\r"),
            vec![Token::Newline, Token::Newline, Token::Newline]
        );
    }

    #[test]
    fn test_non_ascii_is_text() {
        assert_eq!(lex("значение"), vec![Token::Text]);
        assert_eq!(lex("a_b"), vec![Token::Word, Token::Text, Token::Word]);
    }
}
