//! Word boxes to line tokens
//!
//! Both engines report words; the matcher wants whole lines, so words are
//! merged into one token per line with the union of their boxes.

use glossa_types::{OcrToken, Quad};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl LineBox {
    pub(crate) fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub(crate) fn union(&self, other: &LineBox) -> LineBox {
        LineBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub(crate) fn quad(&self) -> Quad {
        Quad::from_rect(self.left, self.top, self.right - self.left, self.bottom - self.top)
    }
}

/// One recognised word and the line it belongs to
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Word {
    /// (block, paragraph, line)
    pub line: (i32, i32, i32),
    pub bounds: LineBox,
    /// 0..=100
    pub conf: f32,
    pub text: String,
}

/// Merge consecutive words of the same line into tokens
///
/// Text is joined with single spaces, confidence is the mean over the line
/// scaled to 0..=1. Blank words are skipped.
pub(crate) fn group_words(words: &[Word]) -> Vec<OcrToken> {
    let mut tokens = Vec::new();
    let mut current: Option<((i32, i32, i32), LineBox, Vec<&str>, f32)> = None;

    for word in words {
        let text = word.text.trim();
        if text.is_empty() {
            continue;
        }

        match current.as_mut() {
            Some((line, bounds, texts, conf)) if *line == word.line => {
                *bounds = bounds.union(&word.bounds);
                texts.push(text);
                *conf += word.conf;
            }
            _ => {
                if let Some(done) = current.take() {
                    tokens.push(finish(done));
                }
                current = Some((word.line, word.bounds, vec![text], word.conf));
            }
        }
    }

    if let Some(done) = current {
        tokens.push(finish(done));
    }
    tokens
}

fn finish((_, bounds, texts, conf): ((i32, i32, i32), LineBox, Vec<&str>, f32)) -> OcrToken {
    let mean = conf / texts.len() as f32;
    OcrToken {
        quad: bounds.quad(),
        text: texts.join(" "),
        confidence: (mean / 100.0).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use glossa_types::Point;

    use super::*;

    fn word(line: i32, left: f32, text: &str, conf: f32) -> Word {
        Word {
            line: (1, 1, line),
            bounds: LineBox::new(left, line as f32 * 30.0, 50.0, 20.0),
            conf,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_words_merge_per_line() {
        let words = vec![
            word(1, 0.0, "Hello", 90.0),
            word(1, 60.0, "there.", 80.0),
            word(2, 0.0, "Next", 70.0),
        ];

        let tokens = group_words(&words);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Hello there.");
        assert!((tokens[0].confidence - 0.85).abs() < 1e-5);
        assert_eq!(tokens[0].quad.0[0], Point::new(0.0, 30.0));
        assert_eq!(tokens[0].quad.0[2], Point::new(110.0, 50.0));
        assert_eq!(tokens[1].text, "Next");
    }

    #[test]
    fn test_blank_words_are_skipped() {
        let words = vec![word(1, 0.0, " ", -1.0), word(1, 60.0, "Hi", 50.0)];
        let tokens = group_words(&words);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Hi");
        assert!((tokens[0].confidence - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_no_words() {
        assert!(group_words(&[]).is_empty());
    }
}
