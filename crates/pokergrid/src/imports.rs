//! Static import extraction for ES modules.
//!
//! The source is first split into a coarse token stream that skips comments
//! and string, template and regex literals, then `import`/`export`
//! declarations are matched structurally over the tokens. Text inside a
//! comment or a literal can therefore never produce a specifier.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Str(String),
    Punct(char),
    /// Number, template or regex literal; only its position matters.
    Literal,
}

enum Brace {
    Block,
    TemplateExpr,
}

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    braces: Vec<Brace>,
    tokens: Vec<Token<'a>>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            braces: Vec::new(),
            tokens: Vec::new(),
        }
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.pos < self.bytes.len() && pred(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while self.pos < self.bytes.len() {
            self.step();
        }
        self.tokens
    }

    fn step(&mut self) {
        let b = self.bytes[self.pos];
        match b {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c => self.pos += 1,
            b'/' if self.peek(1) == Some(b'/') => self.skip_while(|c| c != b'\n'),
            b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment(),
            b'/' if self.regex_allowed() => {
                self.skip_regex();
                self.tokens.push(Token::Literal);
            }
            b'\'' | b'"' => {
                let value = self.read_string(b);
                self.tokens.push(Token::Str(value));
            }
            b'`' => {
                self.pos += 1;
                self.scan_template();
            }
            b'{' => {
                self.braces.push(Brace::Block);
                self.punct('{');
            }
            b'}' => match self.braces.pop() {
                Some(Brace::TemplateExpr) => {
                    self.pos += 1;
                    self.scan_template();
                }
                _ => self.punct('}'),
            },
            b'0'..=b'9' => {
                self.skip_while(|c| is_ident_part(c) || c == b'.');
                self.tokens.push(Token::Literal);
            }
            _ if is_ident_start(b) => {
                let src = self.src;
                let start = self.pos;
                self.skip_while(is_ident_part);
                self.tokens.push(Token::Ident(&src[start..self.pos]));
            }
            _ => self.punct(b as char),
        }
    }

    fn punct(&mut self, c: char) {
        self.pos += 1;
        self.tokens.push(Token::Punct(c));
    }

    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(Token::Punct(c)) => !matches!(c, ')' | ']' | '}'),
            Some(Token::Ident(word)) => REGEX_PREFIX_KEYWORDS.contains(word),
            Some(_) => false,
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_regex(&mut self) {
        self.pos += 1;
        let mut in_class = false;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 1,
                b'\n' => return,
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => {
                    self.pos += 1;
                    self.skip_while(is_ident_part);
                    return;
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    /// Reads a quoted literal and decodes its escapes. An unterminated
    /// literal ends at the line break.
    fn read_string(&mut self, quote: u8) -> String {
        self.pos += 1;
        let mut out = String::new();
        let mut seg = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == quote {
                out.push_str(&self.src[seg..self.pos]);
                self.pos += 1;
                return out;
            }
            if b == b'\n' {
                break;
            }
            if b == b'\\' {
                out.push_str(&self.src[seg..self.pos]);
                self.pos += 1;
                if let Some(c) = self.src[self.pos..].chars().next() {
                    match c {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'v' => out.push('\u{b}'),
                        '0' => out.push('\0'),
                        '\n' | '\r' => {}
                        other => out.push(other),
                    }
                    self.pos += c.len_utf8();
                }
                seg = self.pos;
                continue;
            }
            self.pos += 1;
        }
        out.push_str(&self.src[seg..self.pos]);
        out
    }

    /// Scans template text up to the closing backtick or the next `${`.
    fn scan_template(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    self.tokens.push(Token::Literal);
                    return;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    self.braces.push(Brace::TemplateExpr);
                    self.tokens.push(Token::Punct('{'));
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }
}

/// Module specifiers of every static `import`/`export … from` declaration,
/// in source order. Dynamic `import()` and `import.meta` are skipped.
pub fn scan_imports(source: &str) -> Vec<String> {
    let tokens = Lexer::new(source).run();
    let mut out = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        let Token::Ident(word) = tok else {
            continue;
        };
        if i > 0 && tokens[i - 1] == Token::Punct('.') {
            continue;
        }
        let rest = &tokens[i + 1..];
        let spec = match *word {
            "import" => import_specifier(rest),
            "export" => export_specifier(rest),
            _ => None,
        };
        out.extend(spec);
    }
    out
}

fn import_specifier(rest: &[Token<'_>]) -> Option<String> {
    match rest.first()? {
        Token::Str(s) => Some(s.clone()),
        Token::Ident(_) | Token::Punct('{') | Token::Punct('*') => from_clause(rest),
        _ => None,
    }
}

fn export_specifier(rest: &[Token<'_>]) -> Option<String> {
    match rest.first()? {
        Token::Punct('{') | Token::Punct('*') => from_clause(rest),
        _ => None,
    }
}

/// Walks an import/export clause (`X, {a as b}`, `* as ns`) up to its
/// `from "s"`. Anything that cannot appear in a clause ends the search.
fn from_clause(rest: &[Token<'_>]) -> Option<String> {
    let mut depth = 0usize;
    for (j, tok) in rest.iter().enumerate() {
        match tok {
            Token::Ident("from") if depth == 0 => {
                if let Some(Token::Str(s)) = rest.get(j + 1) {
                    return Some(s.clone());
                }
            }
            Token::Ident(_) | Token::Punct(',') | Token::Punct('*') => {}
            Token::Punct('{') => depth += 1,
            Token::Punct('}') => depth = depth.checked_sub(1)?,
            Token::Str(_) if depth > 0 => {}
            _ => return None,
        }
    }
    None
}

/// `./` and `../` specifiers are repo-internal edges; everything else is a
/// package.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}
