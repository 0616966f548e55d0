//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Tokens do not own text: each one is a kind plus a byte span into the source
//! buffer. The [`Lexer`] keeps a token table keyed by file identity, and every
//! entry stores the source buffer next to its tokens so the spans stay valid for
//! as long as the entry exists.
//!
//! Comment and line-end tokens are kept in the stream; the parser skips them.

use super::ast::{SourceLocation, TokenId};
use crate::diagnostic;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::debug;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    NewLine,
    Comment,

    // Punctuation
    OpenBrace,    // {
    CloseBrace,   // }
    OpenParen,    // (
    CloseParen,   // )
    OpenBracket,  // [
    CloseBracket, // ]
    SemiColon,    // ;

    // Keywords
    KwInt,
    KwReturn,

    Identifier,

    // Literals, numeric ones ordered by radix
    BinaryLiteral,
    OctalLiteral,
    IntLiteral,
    HexLiteral,
    FloatLiteral,
    SingleQuoteLiteral,
    DoubleQuoteLiteral,
}

impl TokenKind {
    /// Name used in token listings and graph labels.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::NewLine => "NewLine",
            TokenKind::Comment => "Comment",
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::OpenBracket => "OpenBracket",
            TokenKind::CloseBracket => "CloseBracket",
            TokenKind::SemiColon => "SemiColon",
            TokenKind::KwInt => "KwInt",
            TokenKind::KwReturn => "KwReturn",
            TokenKind::Identifier => "Identifier",
            TokenKind::BinaryLiteral => "BinaryLiteral",
            TokenKind::OctalLiteral => "OctalLiteral",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::HexLiteral => "HexLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::SingleQuoteLiteral => "SingleQuoteLiteral",
            TokenKind::DoubleQuoteLiteral => "DoubleQuoteLiteral",
        }
    }

    /// Comments and line ends carry no grammar meaning.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::NewLine | TokenKind::Comment)
    }

    /// Literal kinds accepted where the grammar expects a constant.
    pub fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            TokenKind::BinaryLiteral
                | TokenKind::OctalLiteral
                | TokenKind::IntLiteral
                | TokenKind::HexLiteral
                | TokenKind::FloatLiteral
        )
    }

    /// Numeric base implied by an integer literal kind.
    pub fn radix(self) -> Option<u32> {
        match self {
            TokenKind::BinaryLiteral => Some(2),
            TokenKind::OctalLiteral => Some(8),
            TokenKind::IntLiteral => Some(10),
            TokenKind::HexLiteral => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NewLine => write!(f, "end of line"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::OpenBrace => write!(f, "'{{'"),
            TokenKind::CloseBrace => write!(f, "'}}'"),
            TokenKind::OpenParen => write!(f, "'('"),
            TokenKind::CloseParen => write!(f, "')'"),
            TokenKind::OpenBracket => write!(f, "'['"),
            TokenKind::CloseBracket => write!(f, "']'"),
            TokenKind::SemiColon => write!(f, "';'"),
            TokenKind::KwInt => write!(f, "'int'"),
            TokenKind::KwReturn => write!(f, "'return'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::BinaryLiteral => write!(f, "binary literal"),
            TokenKind::OctalLiteral => write!(f, "octal literal"),
            TokenKind::IntLiteral => write!(f, "int literal"),
            TokenKind::HexLiteral => write!(f, "hex literal"),
            TokenKind::FloatLiteral => write!(f, "float literal"),
            TokenKind::SingleQuoteLiteral => write!(f, "char literal"),
            TokenKind::DoubleQuoteLiteral => write!(f, "string literal"),
        }
    }
}

const DELIMITERS: &[(&str, TokenKind)] = &[
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    (";", TokenKind::SemiColon),
];

const KEYWORDS: &[(&str, TokenKind)] = &[("int", TokenKind::KwInt), ("return", TokenKind::KwReturn)];

fn lookup(table: &[(&str, TokenKind)], text: &[u8]) -> Option<TokenKind> {
    table
        .iter()
        .find(|(candidate, _)| candidate.as_bytes() == text)
        .map(|&(_, kind)| kind)
}

/// A token: kind plus a byte span into its file's source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, len: usize) -> Self {
        Token { kind, offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The source text this token covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.offset..self.end()]
    }
}

/// One token-table entry: a file's source buffer and its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
    tokens: Vec<Token>,
}

impl SourceFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    pub fn token_text(&self, id: TokenId) -> Option<&str> {
        self.token(id).map(|token| token.text(&self.text))
    }

    /// Tokens the parser sees: everything except comments and line ends.
    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| !token.kind.is_trivia())
    }

    pub fn location(&self, offset: usize) -> SourceLocation {
        diagnostic::location_at(&self.text, offset)
    }

    pub fn line_text(&self, offset: usize) -> &str {
        diagnostic::line_text(&self.text, offset)
    }
}

/// No lexer rule matched at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub location: SourceLocation,
    pub offset: usize,
    pub line_text: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error at {}", self.location)?;
        diagnostic::write_snippet(f, &self.line_text, self.location)
    }
}

impl std::error::Error for LexError {}

/// Tokenization of a file failed; the table entry still holds every token found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub file: String,
    pub errors: Vec<LexError>,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to tokenize {}", self.file)?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for TokenizeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Stop at the first error instead of skipping to the next line.
    pub break_on_error: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            break_on_error: true,
        }
    }
}

/// Lexer for C source code, holding the token table for every file it has seen
#[derive(Debug, Default)]
pub struct Lexer {
    config: LexerConfig,
    files: FxHashMap<String, SourceFile>,
}

impl Lexer {
    pub fn new(config: LexerConfig) -> Self {
        Lexer {
            config,
            files: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> LexerConfig {
        self.config
    }

    /// Tokenize `source` under the identity `file`, replacing any previous entry.
    pub fn tokenize(&mut self, source: &str, file: &str) -> Result<(), TokenizeError> {
        self.files.remove(file);

        let mut scanner = Scanner::new(source);
        let errors = scanner.run(self.config.break_on_error);
        let tokens = scanner.tokens;

        debug!(
            file,
            tokens = tokens.len(),
            errors = errors.len(),
            "tokenized"
        );

        self.files.insert(
            file.to_string(),
            SourceFile {
                name: file.to_string(),
                text: source.to_string(),
                tokens,
            },
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TokenizeError {
                file: file.to_string(),
                errors,
            })
        }
    }

    pub fn source(&self, file: &str) -> Option<&SourceFile> {
        self.files.get(file)
    }

    pub fn tokens(&self, file: &str) -> Option<&[Token]> {
        self.files.get(file).map(SourceFile::tokens)
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    /// Drop a file's table entry.
    pub fn forget(&mut self, file: &str) -> Option<SourceFile> {
        self.files.remove(file)
    }
}

/// Single pass over one source buffer.
///
/// `accepted` trails `position` and only moves when a token or a whitespace run
/// is accepted; a loop iteration that leaves it in place found nothing.
struct Scanner<'s> {
    source: &'s str,
    bytes: &'s [u8],
    position: usize,
    accepted: usize,
    tokens: Vec<Token>,
}

impl<'s> Scanner<'s> {
    fn new(source: &'s str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            position: 0,
            accepted: 0,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self, break_on_error: bool) -> Vec<LexError> {
        let mut errors = Vec::new();

        while !self.is_at_end() {
            let last_accepted = self.accepted;

            // Line ends must be checked before whitespace
            if let Some(token) = self.newline() {
                self.accept(token);
                continue;
            }

            self.whitespace();
            if self.is_at_end() {
                break;
            }

            let token = self
                .comment()
                .or_else(|| self.delimiter())
                .or_else(|| self.quoted_literal())
                .or_else(|| self.number_literal())
                .or_else(|| self.identifier_or_keyword());

            if let Some(token) = token {
                self.accept(token);
                continue;
            }

            if self.accepted > last_accepted {
                continue;
            }

            errors.push(self.error_here());
            if break_on_error {
                break;
            }
            self.skip_line();
        }

        errors
    }

    fn newline(&self) -> Option<Token> {
        let escaped = self.position > 0 && self.bytes[self.position - 1] == b'\\';
        (self.peek() == Some(b'\n') && !escaped).then(|| Token::new(TokenKind::NewLine, self.position, 1))
    }

    fn whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | 0x0b | 0x0c) => self.position += 1,
                // line continuation
                Some(b'\\') if self.peek_ahead(1) == Some(b'\n') => self.position += 2,
                // continuation whose backslash closed the previous token, as in `// note \`
                Some(b'\n') if self.position > 0 && self.bytes[self.position - 1] == b'\\' => {
                    self.position += 1
                }
                _ => break,
            }
        }
        self.accepted = self.accepted.max(self.position);
    }

    fn comment(&self) -> Option<Token> {
        let start = self.position;
        if self.peek() != Some(b'/') {
            return None;
        }

        match self.peek_ahead(1) {
            Some(b'/') => {
                let end = self.bytes[start..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(self.bytes.len(), |i| start + i);
                Some(Token::new(TokenKind::Comment, start, end - start))
            }
            Some(b'*') => {
                let body = start + 2;
                let close = self.bytes[body..].windows(2).position(|w| w == b"*/")?;
                let end = body + close + 2;
                Some(Token::new(TokenKind::Comment, start, end - start))
            }
            _ => None,
        }
    }

    fn delimiter(&self) -> Option<Token> {
        let text = self.bytes.get(self.position..self.position + 1)?;
        lookup(DELIMITERS, text).map(|kind| Token::new(kind, self.position, 1))
    }

    /// Single- or double-quoted literal closed on the same line.
    fn quoted_literal(&self) -> Option<Token> {
        let start = self.position;
        let quote = self.peek()?;
        let kind = match quote {
            b'\'' => TokenKind::SingleQuoteLiteral,
            b'"' => TokenKind::DoubleQuoteLiteral,
            _ => return None,
        };

        let mut i = start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\n' => return None,
                b'\\' if self.bytes.get(i + 1) == Some(&b'\n') => return None,
                b'\\' => i += 2,
                b if b == quote => return Some(Token::new(kind, start, i + 1 - start)),
                _ => i += 1,
            }
        }
        None
    }

    /// Numeric literal; any character outside the radix invalidates the whole run.
    fn number_literal(&self) -> Option<Token> {
        let rest = &self.bytes[self.position..];
        let run = rest
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'.')
            .count();
        let text = &rest[..run];

        let (kind, digits) = match text {
            [b'0', b'x' | b'X', digits @ ..] => (TokenKind::HexLiteral, digits),
            [b'0', next, ..] if (b'0'..b'8').contains(next) => (TokenKind::OctalLiteral, &text[1..]),
            [b'b', b'0' | b'1', ..] => (TokenKind::BinaryLiteral, &text[1..]),
            [first, ..] if first.is_ascii_digit() => (TokenKind::IntLiteral, text),
            _ => return None,
        };

        classify_digits(kind, digits).map(|kind| Token::new(kind, self.position, run))
    }

    fn identifier_or_keyword(&self) -> Option<Token> {
        let rest = &self.bytes[self.position..];
        if !rest.first()?.is_ascii_alphabetic() {
            return None;
        }

        // `return0` is an identifier: decide only once the whole run is scanned
        let run = rest.iter().take_while(|b| b.is_ascii_alphanumeric()).count();
        let kind = lookup(KEYWORDS, &rest[..run]).unwrap_or(TokenKind::Identifier);
        Some(Token::new(kind, self.position, run))
    }

    fn accept(&mut self, token: Token) {
        debug_assert!(token.end() > self.accepted, "token did not advance the lexer");
        self.tokens.push(token);
        self.position = token.end();
        self.accepted = self.position;
    }

    fn error_here(&self) -> LexError {
        LexError {
            location: diagnostic::location_at(self.source, self.position),
            offset: self.position,
            line_text: diagnostic::line_text(self.source, self.position).to_string(),
        }
    }

    /// Recovery: resume scanning at the next line feed.
    fn skip_line(&mut self) {
        self.position = self.bytes[self.position..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |i| self.position + i);
        self.accepted = self.position;
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.position + n).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }
}

/// Check every digit against the radix of `kind`, promoting to float on `.`.
fn classify_digits(mut kind: TokenKind, digits: &[u8]) -> Option<TokenKind> {
    if digits.is_empty() {
        return None;
    }

    for &c in digits {
        kind = match (kind, c) {
            (TokenKind::OctalLiteral | TokenKind::IntLiteral, b'.') => TokenKind::FloatLiteral,
            (TokenKind::BinaryLiteral, b'0' | b'1') => kind,
            (TokenKind::OctalLiteral, b'0'..=b'7') => kind,
            (TokenKind::IntLiteral | TokenKind::FloatLiteral, b'0'..=b'9') => kind,
            (TokenKind::HexLiteral, c) if c.is_ascii_hexdigit() => kind,
            _ => return None,
        };
    }

    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::default();
        lexer.tokenize(source, "test.c").unwrap();
        lexer
            .tokens("test.c")
            .unwrap()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single_literal(source: &str) -> Option<TokenKind> {
        let mut lexer = Lexer::default();
        lexer.tokenize(source, "lit.c").ok()?;
        match lexer.tokens("lit.c")? {
            [token] if token.len == source.len() => Some(token.kind),
            _ => None,
        }
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("int main() { return 0; }"),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::KwReturn,
                TokenKind::IntLiteral,
                TokenKind::SemiColon,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_token_spans() {
        let mut lexer = Lexer::default();
        lexer.tokenize("int main", "a.c").unwrap();
        let file = lexer.source("a.c").unwrap();

        assert_eq!(file.tokens()[1], Token::new(TokenKind::Identifier, 4, 4));
        assert_eq!(file.token_text(TokenId(1)), Some("main"));
    }

    #[test]
    fn test_literal_radix_classification() {
        assert_eq!(single_literal("42"), Some(TokenKind::IntLiteral));
        assert_eq!(single_literal("0"), Some(TokenKind::IntLiteral));
        assert_eq!(single_literal("052"), Some(TokenKind::OctalLiteral));
        assert_eq!(single_literal("0x2A"), Some(TokenKind::HexLiteral));
        assert_eq!(single_literal("0Xff"), Some(TokenKind::HexLiteral));
        assert_eq!(single_literal("b101010"), Some(TokenKind::BinaryLiteral));
        assert_eq!(single_literal("3.25"), Some(TokenKind::FloatLiteral));
        assert_eq!(single_literal("0.5"), Some(TokenKind::FloatLiteral));
        assert_eq!(single_literal("09"), Some(TokenKind::IntLiteral));
    }

    #[test]
    fn test_invalid_literals_are_not_truncated() {
        for source in ["0x", "0xZ1", "078", "12ab", "1.2.3"] {
            let mut lexer = Lexer::default();
            assert!(
                lexer.tokenize(source, "bad.c").is_err(),
                "{source} should not tokenize"
            );
            assert!(lexer.tokens("bad.c").unwrap().is_empty());
        }
    }

    #[test]
    fn test_binary_prefix_falls_back_to_identifier() {
        assert_eq!(kinds("b12"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("bar"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("b"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_keyword_needs_exact_match() {
        assert_eq!(kinds("return0"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("integer"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("in"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("return"), vec![TokenKind::KwReturn]);
    }

    #[test]
    fn test_comments_and_newlines() {
        assert_eq!(
            kinds("int x; // comment\n/* block\ncomment */ int"),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::SemiColon,
                TokenKind::Comment,
                TokenKind::NewLine,
                TokenKind::Comment,
                TokenKind::KwInt,
            ]
        );
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_eq!(kinds("// trailing"), vec![TokenKind::Comment]);
    }

    #[test]
    fn test_line_continuation_is_whitespace() {
        assert_eq!(kinds("int \\\nmain"), vec![TokenKind::KwInt, TokenKind::Identifier]);
    }

    #[test]
    fn test_comment_ending_in_backslash_continues_the_line() {
        assert_eq!(
            kinds("int main() // note \\\n{return 2;}"),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::Comment,
                TokenKind::OpenBrace,
                TokenKind::KwReturn,
                TokenKind::IntLiteral,
                TokenKind::SemiColon,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_quoted_literals() {
        let mut lexer = Lexer::default();
        lexer.tokenize(r#"'a' "hi \" there""#, "q.c").unwrap();
        let file = lexer.source("q.c").unwrap();
        let tokens = file.tokens();

        assert_eq!(tokens[0].kind, TokenKind::SingleQuoteLiteral);
        assert_eq!(tokens[0].text(file.text()), "'a'");
        assert_eq!(tokens[1].kind, TokenKind::DoubleQuoteLiteral);
        assert_eq!(tokens[1].text(file.text()), r#""hi \" there""#);
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        let mut lexer = Lexer::default();
        let err = lexer.tokenize("\"open\nint", "q.c").unwrap_err();
        assert_eq!(err.errors[0].location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_quote_does_not_continue_past_escaped_newline() {
        let mut lexer = Lexer::default();
        let err = lexer.tokenize("\"ab\\\ncd\"", "q.c").unwrap_err();
        assert_eq!(err.errors[0].location, SourceLocation::new(1, 1));
        assert!(lexer.tokens("q.c").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_block_comment_breaks() {
        let mut lexer = Lexer::default();
        let err = lexer.tokenize("int main /* never closed\nreturn", "c.c").unwrap_err();

        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].location, SourceLocation::new(1, 10));
        assert_eq!(err.errors[0].line_text, "int main /* never closed");
        let kinds: Vec<_> = lexer.tokens("c.c").unwrap().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::KwInt, TokenKind::Identifier]);
    }

    #[test]
    fn test_skip_mode_collects_every_error() {
        let mut lexer = Lexer::new(LexerConfig {
            break_on_error: false,
        });
        let err = lexer.tokenize("int @\nreturn # 2\n;", "s.c").unwrap_err();

        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[1].location, SourceLocation::new(2, 8));
        let kinds: Vec<_> = lexer.tokens("s.c").unwrap().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwInt,
                TokenKind::NewLine,
                TokenKind::KwReturn,
                TokenKind::NewLine,
                TokenKind::SemiColon,
            ]
        );
    }

    #[test]
    fn test_retokenize_replaces_entry() {
        let mut lexer = Lexer::default();
        lexer.tokenize("int main", "r.c").unwrap();
        lexer.tokenize("return", "r.c").unwrap();

        assert_eq!(lexer.tokens("r.c").unwrap().len(), 1);
        assert_eq!(lexer.source("r.c").unwrap().text(), "return");
    }

    #[test]
    fn test_error_display() {
        let mut lexer = Lexer::default();
        let err = lexer.tokenize("int $", "e.c").unwrap_err();
        assert_eq!(
            err.errors[0].to_string(),
            "Syntax error at line 1, column 5\nint $\n----^"
        );
    }
}
