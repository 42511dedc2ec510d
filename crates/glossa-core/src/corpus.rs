use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

/// Element holding one bilingual record, as a direct child of the root
const RECORD_TAG: &[u8] = b"content";

/// Marker separating the source and target halves of a record
const SEGMENT_MARKER: &str = "<br>";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid XML: {0}")]
    XmlError(String),
}

/// One source sentence and its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    pub source_sentence: String,
    pub target_sentence: String,
}

/// How many records survived the data-quality filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub accepted: usize,
    pub dropped: usize,
}

/// Index-aligned source/target sentences. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    source: Vec<String>,
    target: Vec<String>,
}

impl Corpus {
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let (source, target) = pairs
            .into_iter()
            .map(|(s, t)| (s.into(), t.into()))
            .unzip();
        Self { source, target }
    }

    /// Load a corpus file from disk
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        tracing::info!("Loading corpus from {}", path.display());
        let file = File::open(path)?;
        let (corpus, stats) = Self::parse(BufReader::new(file))?;
        tracing::info!(
            "Loaded {} sentence pairs ({} malformed records dropped)",
            stats.accepted,
            stats.dropped
        );
        Ok(corpus)
    }

    /// Parse `<content>` records under the document root
    pub fn parse<R: BufRead>(input: R) -> Result<(Self, LoadStats), CorpusError> {
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();

        let mut corpus = Corpus::default();
        let mut stats = LoadStats::default();

        let mut depth = 0usize;
        // Leading text of the record being read; `None` outside a record
        let mut record: Option<String> = None;
        // Text after a record's first child element is not part of the record
        let mut in_leading_text = false;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| CorpusError::XmlError(e.to_string()))?;

            match event {
                Event::Start(start) => {
                    depth += 1;
                    if depth == 2 && start.name().as_ref() == RECORD_TAG {
                        record = Some(String::new());
                        in_leading_text = true;
                    } else if depth > 2 {
                        in_leading_text = false;
                    }
                }
                Event::End(_) => {
                    if depth == 2
                        && let Some(text) = record.take()
                    {
                        corpus.accept(&text, &mut stats);
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Empty(empty) => {
                    if depth == 1 && empty.name().as_ref() == RECORD_TAG {
                        stats.dropped += 1;
                    } else if depth >= 2 {
                        in_leading_text = false;
                    }
                }
                Event::Text(text) => {
                    if in_leading_text && let Some(buffer) = record.as_mut() {
                        let decoded = text
                            .unescape()
                            .map_err(|e| CorpusError::XmlError(e.to_string()))?;
                        buffer.push_str(&decoded);
                    }
                }
                Event::CData(cdata) => {
                    if in_leading_text && let Some(buffer) = record.as_mut() {
                        buffer.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            buf.clear();
        }

        if stats.dropped > 0 {
            tracing::debug!("Dropped {} corpus records without exactly two segments", stats.dropped);
        }

        Ok((corpus, stats))
    }

    fn accept(&mut self, raw: &str, stats: &mut LoadStats) {
        match split_record(raw) {
            Some((source, target)) => {
                self.source.push(source);
                self.target.push(target);
                stats.accepted += 1;
            }
            None => stats.dropped += 1,
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn source_sentences(&self) -> &[String] {
        &self.source
    }

    pub fn target_sentences(&self) -> &[String] {
        &self.target
    }

    pub fn get(&self, index: usize) -> Option<CorpusEntry> {
        Some(CorpusEntry {
            source_sentence: self.source.get(index)?.clone(),
            target_sentence: self.target.get(index)?.clone(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = CorpusEntry> + '_ {
        self.source
            .iter()
            .zip(&self.target)
            .map(|(s, t)| CorpusEntry {
                source_sentence: s.clone(),
                target_sentence: t.clone(),
            })
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.source, self.target)
    }
}

/// Validate one record: HTML-decoded text must split into exactly two non-empty halves
pub fn split_record(raw: &str) -> Option<(String, String)> {
    let decoded = html_escape::decode_html_entities(raw);
    let mut parts = decoded.split(SEGMENT_MARKER);

    let source = parts.next()?.trim();
    let target = parts.next()?.trim();
    if parts.next().is_some() || source.is_empty() || target.is_empty() {
        return None;
    }

    Some((source.to_string(), target.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn parse(xml: &str) -> (Corpus, LoadStats) {
        Corpus::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_split_record() {
        assert_eq!(
            split_record(" Hello there. <br> 你好。 "),
            Some(("Hello there.".to_string(), "你好。".to_string()))
        );
        assert_eq!(split_record("no marker"), None);
        assert_eq!(split_record("a<br>b<br>c"), None);
        assert_eq!(split_record("a<br>   "), None);
        assert_eq!(split_record("<br>b"), None);
    }

    #[test]
    fn test_escaped_marker_is_decoded_before_split() {
        // The XML layer decodes &amp; first, the HTML pass turns &lt;br&gt; into the marker
        let (corpus, stats) = parse(
            "<contentList><content>Run &amp;lt;br&amp;gt; 跑</content></contentList>",
        );
        assert_eq!(stats, LoadStats { accepted: 1, dropped: 0 });
        assert_eq!(corpus.source_sentences(), ["Run"]);
        assert_eq!(corpus.target_sentences(), ["跑"]);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let (corpus, stats) = parse(
            r#"<contentList>
                <content>One.&lt;br&gt;一。</content>
                <content>missing marker</content>
                <content/>
                <content>Two.&lt;br&gt;二。&lt;br&gt;extra</content>
                <content><![CDATA[Three.<br>三。]]></content>
            </contentList>"#,
        );

        assert_eq!(stats, LoadStats { accepted: 2, dropped: 3 });
        assert_eq!(corpus.source_sentences(), ["One.", "Three."]);
        assert_eq!(corpus.target_sentences(), ["一。", "三。"]);
    }

    #[test]
    fn test_only_direct_children_of_root() {
        let (corpus, _) = parse(
            r#"<root>
                <group><content>Nested.&lt;br&gt;嵌套。</content></group>
                <content>Top.&lt;br&gt;顶。</content>
            </root>"#,
        );
        assert_eq!(corpus.source_sentences(), ["Top."]);
    }

    #[test]
    fn test_text_after_child_element_is_ignored() {
        let (corpus, stats) = parse(
            "<root><content>Lead.&lt;br&gt;<b>x</b>tail</content></root>",
        );
        // Leading text is "Lead.<br>" whose second half is empty
        assert!(corpus.is_empty());
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_alignment_is_preserved() {
        let xml = (0..50)
            .map(|i| {
                if i % 7 == 0 {
                    format!("<content>broken {i}</content>")
                } else {
                    format!("<content>source {i}&lt;br&gt;target {i}</content>")
                }
            })
            .collect::<String>();
        let (corpus, stats) = parse(&format!("<root>{xml}</root>"));

        assert_eq!(corpus.source_sentences().len(), corpus.target_sentences().len());
        assert_eq!(stats.accepted + stats.dropped, 50);
        for entry in corpus.entries() {
            let n = entry.source_sentence.trim_start_matches("source ");
            assert_eq!(entry.target_sentence, format!("target {n}"));
        }

        let (source, target) = corpus.into_parts();
        assert_eq!(source.len(), stats.accepted);
        assert_eq!(target.len(), stats.accepted);
        for (s, t) in source.iter().zip(&target) {
            assert_eq!(s.replace("source", "target"), *t);
        }
    }

    #[test]
    fn test_invalid_xml_is_an_error() {
        let result = Corpus::parse("<root><content>a&lt;br&gt;b</wrong></root>".as_bytes());
        assert!(matches!(result, Err(CorpusError::XmlError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "<contentList><content>Hello there.&lt;br&gt;你好。</content></contentList>"
        )
        .unwrap();

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(
            corpus.get(0),
            Some(CorpusEntry {
                source_sentence: "Hello there.".to_string(),
                target_sentence: "你好。".to_string(),
            })
        );
        assert_eq!(corpus.get(1), None);
    }

    #[test]
    fn test_missing_file() {
        let result = Corpus::load(Path::new("/definitely/not/here.xml"));
        assert!(matches!(result, Err(CorpusError::IoError(_))));
    }
}
