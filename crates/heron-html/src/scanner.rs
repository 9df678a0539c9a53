//! Input scanner: the buffered code point source the tokenizer reads from.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "The input stream consists of the characters pushed into it as the input
//! byte stream is decoded or from the various APIs that directly manipulate
//! the input stream."
//!
//! The scanner accepts UTF-16 chunks, joins surrogate pairs that straddle a
//! chunk boundary, and normalizes newlines before anything reaches the
//! tokenizer. Nested frames model `document.write()`-style insertions: text
//! pushed while parsing is consumed before the rest of the stream.

use std::collections::VecDeque;

/// Result of looking at the next code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peek {
    /// A code point is available.
    Char(char),
    /// The stream is finished and every buffered code point was consumed.
    Eof,
    /// Nothing is buffered yet but more input may still arrive.
    NeedMore,
}

/// Result of [`Scanner::consume_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanUntil {
    /// The literal was found. Holds the text before it; the literal itself
    /// was consumed too.
    Found(String),
    /// The buffer ran dry first. Holds the text consumed so far; a partial
    /// match of the literal at the end is left in the buffer.
    NeedMore(String),
    /// End of stream was reached without finding the literal.
    Eof(String),
}

/// Buffered, newline-normalized input with a stack of insertion frames.
#[derive(Debug)]
pub struct Scanner {
    /// `frames[0]` is the network stream; later entries are nested insertions
    /// and are read first.
    frames: Vec<VecDeque<char>>,

    /// High surrogate at the very end of the last chunk, waiting for its pair.
    pending_high_surrogate: Option<u16>,

    /// "U+000D CARRIAGE RETURN (CR) characters and U+000A LINE FEED (LF)
    /// characters are treated specially." A CR was just turned into LF, so a
    /// following LF must be dropped, even if it arrives in the next chunk.
    last_was_cr: bool,

    /// Set once the caller signals the end of the stream.
    finished: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// An empty, unfinished scanner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![VecDeque::new()],
            pending_high_surrogate: None,
            last_was_cr: false,
            finished: false,
        }
    }

    /// Append a chunk of UTF-16 code units to the stream.
    ///
    /// Lone surrogates decode to U+FFFD. A trailing high surrogate is held
    /// back until the next chunk (or [`Scanner::finish`]) decides its fate.
    pub fn feed(&mut self, chunk: &[u16]) {
        let mut units: Vec<u16> = Vec::with_capacity(chunk.len() + 1);
        units.extend(self.pending_high_surrogate.take());
        units.extend_from_slice(chunk);

        if units.last().is_some_and(|unit| (0xD800..=0xDBFF).contains(unit)) {
            self.pending_high_surrogate = units.pop();
        }

        let decoded: Vec<char> = char::decode_utf16(units)
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        self.push_normalized(decoded);
    }

    /// Append a chunk that is already valid Unicode.
    pub fn feed_str(&mut self, chunk: &str) {
        if self.pending_high_surrogate.take().is_some() {
            self.push_normalized([char::REPLACEMENT_CHARACTER]);
        }
        self.push_normalized(chunk.chars());
    }

    fn push_normalized(&mut self, chars: impl IntoIterator<Item = char>) {
        let stream = &mut self.frames[0];
        for c in chars {
            match c {
                '\r' => {
                    stream.push_back('\n');
                    self.last_was_cr = true;
                }
                '\n' if self.last_was_cr => self.last_was_cr = false,
                c => {
                    self.last_was_cr = false;
                    stream.push_back(c);
                }
            }
        }
    }

    /// Mark the end of the stream. After this, running out of input is EOF.
    pub fn finish(&mut self) {
        if self.pending_high_surrogate.take().is_some() {
            self.push_normalized([char::REPLACEMENT_CHARACTER]);
        }
        self.finished = true;
    }

    /// Whether [`Scanner::finish`] was called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Push a nested frame that is read before everything already buffered.
    ///
    /// Newlines in `text` are normalized on their own; the frame pops
    /// automatically once drained.
    pub fn push_frame(&mut self, text: &str) {
        let mut frame = VecDeque::with_capacity(text.len());
        let mut last_was_cr = false;
        for c in text.chars() {
            match c {
                '\r' => {
                    frame.push_back('\n');
                    last_was_cr = true;
                }
                '\n' if last_was_cr => last_was_cr = false,
                c => {
                    last_was_cr = false;
                    frame.push_back(c);
                }
            }
        }
        self.frames.push(frame);
    }

    /// Number of nested frames that still hold unread input.
    #[must_use]
    pub fn nested_depth(&self) -> usize {
        self.frames[1..].iter().filter(|f| !f.is_empty()).count()
    }

    /// Whether any code point is buffered in any frame.
    #[must_use]
    pub fn has_buffered_input(&self) -> bool {
        self.frames.iter().any(|f| !f.is_empty())
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .nth(offset)
            .copied()
    }

    /// Look at the next code point without consuming it.
    #[must_use]
    pub fn peek(&self) -> Peek {
        match self.char_at(0) {
            Some(c) => Peek::Char(c),
            None if self.finished => Peek::Eof,
            None => Peek::NeedMore,
        }
    }

    /// Consume the next code point.
    pub fn consume(&mut self) -> Peek {
        let peeked = self.peek();
        if matches!(peeked, Peek::Char(_)) {
            self.advance(1);
        }
        peeked
    }

    /// Discard `count` buffered code points.
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            while self.frames.len() > 1 && self.frames.last().is_some_and(VecDeque::is_empty) {
                let _ = self.frames.pop();
            }
            let frame = self
                .frames
                .iter_mut()
                .rev()
                .find(|frame| !frame.is_empty());
            match frame {
                Some(frame) => {
                    let _ = frame.pop_front();
                }
                None => return,
            }
        }
        while self.frames.len() > 1 && self.frames.last().is_some_and(VecDeque::is_empty) {
            let _ = self.frames.pop();
        }
    }

    /// Compare the upcoming input with `literal` without consuming anything.
    ///
    /// Returns `None` when everything buffered matches but the input ends
    /// before the literal does and more may arrive.
    #[must_use]
    pub fn match_ahead(&self, literal: &str, ascii_case_insensitive: bool) -> Option<bool> {
        for (offset, expected) in literal.chars().enumerate() {
            match self.char_at(offset) {
                Some(c) if c == expected => {}
                Some(c) if ascii_case_insensitive && c.eq_ignore_ascii_case(&expected) => {}
                Some(_) => return Some(false),
                None if self.finished => return Some(false),
                None => return None,
            }
        }
        Some(true)
    }

    /// Consume a run of code points satisfying `accept`.
    pub fn consume_run(&mut self, mut accept: impl FnMut(char) -> bool, out: &mut String) {
        while let Some(c) = self.char_at(0) {
            if !accept(c) {
                break;
            }
            out.push(c);
            self.advance(1);
        }
    }

    /// Consume input up to and including `literal`.
    pub fn consume_until(&mut self, literal: &str) -> ScanUntil {
        let mut text = String::new();
        loop {
            match self.match_ahead(literal, false) {
                Some(true) => {
                    self.advance(literal.chars().count());
                    return ScanUntil::Found(text);
                }
                None => return ScanUntil::NeedMore(text),
                Some(false) => match self.consume() {
                    Peek::Char(c) => text.push(c),
                    Peek::Eof => return ScanUntil::Eof(text),
                    Peek::NeedMore => return ScanUntil::NeedMore(text),
                },
            }
        }
    }
}
