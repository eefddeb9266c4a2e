use std::io::{self, BufRead};

pub const DEFAULT_DELIMITERS: &str = " \t";
pub const COMMENT: char = '#';

#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    Vertice,
    Texture,
    Normal,
    Group,
    Face,
    Identifier(String),
}

impl Keyword {
    pub fn from_token(token: &str) -> Self {
        return match token {
            "v" => Keyword::Vertice,
            "vt" => Keyword::Texture,
            "vn" => Keyword::Normal,
            "g" => Keyword::Group,
            "f" => Keyword::Face,
            _ => Keyword::Identifier(token.to_string()),
        };
    }
}

/// One meaningful line of input: its 1-based row and its tokens, comment removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub row: usize,
    pub tokens: Vec<String>,
}

impl Line {
    /// Classify the line by its leading token.
    pub fn keyword(&self) -> Option<Keyword> {
        return self.tokens.first().map(|token| Keyword::from_token(token));
    }

    /// Every token after the keyword.
    pub fn arguments(&self) -> &[String] {
        return self.tokens.get(1..).unwrap_or(&[]);
    }
}

/// Split `line` on any character of `delimiters`.
///
/// Runs of delimiters never produce empty tokens. A token starting with `#`
/// ends the line: it and everything after it are dropped.
pub fn tokenize<'a>(line: &'a str, delimiters: &str) -> Vec<&'a str> {
    let mut tokens = Vec::new();

    for token in line.split(|c: char| delimiters.contains(c)) {
        if token.is_empty() {
            continue;
        }

        if token.starts_with(COMMENT) {
            break;
        }

        tokens.push(token);
    }

    return tokens;
}

/// Reads an object stream line by line.
///
/// Carriage returns and surrounding whitespace are stripped, and blank or
/// comment-only lines are skipped, so every yielded [`Line`] has at least
/// one token.
pub struct Lexer<R> {
    reader: R,

    row: usize,

    buffer: Vec<u8>,
    delimiters: String,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        return Lexer::with_delimiters(reader, DEFAULT_DELIMITERS);
    }

    pub fn with_delimiters(reader: R, delimiters: &str) -> Self {
        return Lexer {
            reader,
            row: 0,
            buffer: Vec::new(),
            delimiters: delimiters.to_string(),
        };
    }

    /// Row of the last physical line read, 1-based. Zero before the first read.
    pub fn row(&self) -> usize {
        return self.row;
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();

        match self.reader.read_until(b'\n', &mut self.buffer)? {
            0 => {
                return Ok(None);
            }

            _ => {
                self.row += 1;
                return Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()));
            }
        }
    }

    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        while let Some(raw) = self.read_line()? {
            let text = raw.trim();

            if text.is_empty() || text.starts_with(COMMENT) {
                continue;
            }

            let tokens: Vec<String> = tokenize(text, &self.delimiters)
                .into_iter()
                .map(str::to_string)
                .collect();

            if tokens.is_empty() {
                continue;
            }

            return Ok(Some(Line {
                row: self.row,
                tokens,
            }));
        }

        return Ok(None);
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        return self.next_line().transpose();
    }
}
