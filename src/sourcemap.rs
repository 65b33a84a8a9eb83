//! Source Map v3 generation for rewritten modules.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{
    Deserialize,
    Serialize,
};

use crate::rewrite::Rewrite;

/// Base64 digits used by the VLQ encoding of `mappings`.
const VLQ_DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Continuation bit of a VLQ digit.
const VLQ_CONTINUATION: u64 = 0b10_0000;

/// Source Map revision 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub sources_content: Vec<Option<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Builds a high-resolution map from `rewrite`'s output back to `original`.
    ///
    /// Every original character gets its own segment; inserted text is left
    /// unmapped. Columns count UTF-16 code units.
    #[must_use]
    pub fn for_rewrite(source: &str, original: &str, rewrite: &Rewrite<'_>) -> Self {
        let mut mappings = MappingsBuilder::default();
        let mut pending = rewrite.insertion_offsets().iter().copied().peekable();
        let mut generated_column = 0_u32;
        let mut original_line = 0_u32;
        let mut original_column = 0_u32;

        for (offset, ch) in original.char_indices() {
            while pending.next_if_eq(&offset).is_some() {
                for inserted in rewrite.inserted_text().chars() {
                    if inserted == '\n' {
                        mappings.next_line();
                        generated_column = 0;
                    } else {
                        generated_column += utf16_len(inserted);
                    }
                }
            }

            if ch == '\n' {
                mappings.next_line();
                generated_column = 0;
                original_line += 1;
                original_column = 0;
                continue;
            }

            mappings.add_segment(generated_column, original_line, original_column);
            generated_column += utf16_len(ch);
            original_column += utf16_len(ch);
        }

        Self {
            version: 3,
            file: None,
            sources: vec![source.to_string()],
            sources_content: vec![Some(original.to_string())],
            names: Vec::new(),
            mappings: mappings.finish(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encodes the map as a `data:` URL suitable for `sourceMappingURL`.
    pub fn to_url(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("data:application/json;charset=utf-8;base64,{}", STANDARD.encode(json)))
    }
}

/// Width of `ch` in UTF-16 code units.
fn utf16_len(ch: char) -> u32 {
    if u32::from(ch) > 0xFFFF { 2 } else { 1 }
}

/// Accumulates the `mappings` field.
///
/// Generated columns are relative to the previous segment of the same line;
/// source index, original line and original column are relative to the
/// previous segment of the whole map.
#[derive(Debug, Default)]
struct MappingsBuilder {
    /// Encoded output
    out: String,
    /// Whether the current generated line already has a segment
    line_started: bool,
    /// Generated column of the previous segment on this line
    previous_generated_column: u32,
    /// Original line of the previous segment
    previous_original_line: u32,
    /// Original column of the previous segment
    previous_original_column: u32,
}

impl MappingsBuilder {
    /// Starts a new generated line.
    fn next_line(&mut self) {
        self.out.push(';');
        self.line_started = false;
        self.previous_generated_column = 0;
    }

    /// Appends a four-field segment for the single source.
    fn add_segment(&mut self, generated_column: u32, original_line: u32, original_column: u32) {
        if self.line_started {
            self.out.push(',');
        }
        encode_vlq(&mut self.out, delta(generated_column, self.previous_generated_column));
        encode_vlq(&mut self.out, 0);
        encode_vlq(&mut self.out, delta(original_line, self.previous_original_line));
        encode_vlq(&mut self.out, delta(original_column, self.previous_original_column));

        self.line_started = true;
        self.previous_generated_column = generated_column;
        self.previous_original_line = original_line;
        self.previous_original_column = original_column;
    }

    /// Returns the encoded mappings.
    fn finish(self) -> String {
        self.out
    }
}

/// Signed difference `current - previous`.
fn delta(current: u32, previous: u32) -> i64 {
    i64::from(current) - i64::from(previous)
}

/// Appends `value` as a Base64 VLQ.
fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = (value.unsigned_abs() << 1) | u64::from(value < 0);
    loop {
        let mut digit = vlq & 0b1_1111;
        vlq >>= 5;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION;
        }
        let index = usize::try_from(digit).unwrap_or_default();
        if let Some(&encoded) = VLQ_DIGITS.get(index) {
            out.push(char::from(encoded));
        }
        if vlq == 0 {
            break;
        }
    }
}
