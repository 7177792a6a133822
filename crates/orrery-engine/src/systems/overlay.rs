/// Screen-space overlay state: labels, text blocks and toggles the host
/// applies to its DOM layer after each frame.

use std::collections::BTreeMap;
use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// One floating label, in viewport pixels.
///
/// Wire format (4 floats): `[x, y, opacity, index]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize)]
pub struct LabelInstance {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    /// Index of the label element on the host side.
    pub index: f32,
}

impl LabelInstance {
    pub const FLOATS: usize = 4;
}

/// A heading plus paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextBlock {
    pub title: String,
    pub lines: Vec<String>,
}

impl TextBlock {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Overlay document for one frame. Keyed by host element id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OverlayState {
    pub labels: Vec<LabelInstance>,
    pub text: BTreeMap<String, TextBlock>,
    pub toggles: BTreeMap<String, bool>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, slot: &str, block: TextBlock) {
        self.text.insert(slot.to_string(), block);
    }

    pub fn set_toggle(&mut self, slot: &str, on: bool) {
        self.toggles.insert(slot.to_string(), on);
    }

    pub fn text(&self, slot: &str) -> Option<&TextBlock> {
        self.text.get(slot)
    }

    pub fn toggle(&self, slot: &str) -> Option<bool> {
        self.toggles.get(slot).copied()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
