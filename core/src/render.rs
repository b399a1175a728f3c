//! Host-agnostic view output.
//!
//! Views describe what they show as a flat list of `Block`s. The CLI prints
//! them through `Display`; tests assert on them directly.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Navigation bar; `active` indexes into `labels`.
    Tabs { labels: Vec<String>, active: usize },
    Heading(String),
    Text(String),
    List(Vec<String>),
    Card(Card),
    /// A button. Disabled actions are shown but cannot be triggered.
    Action { label: String, enabled: bool },
    Error(String),
}

/// A titled panel: a slide or a question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<String>,
    pub footer: Vec<String>,
    /// `data:` URI of an embedded image.
    pub image: Option<String>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Tabs { labels, active } => {
                let tabs: Vec<String> = labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| if i == *active { format!("[{label}]") } else { label.clone() })
                    .collect();
                writeln!(f, "{}", tabs.join("  "))
            }
            Block::Heading(text) => writeln!(f, "\n{text}"),
            Block::Text(text) => writeln!(f, "{text}"),
            Block::List(items) => {
                for item in items {
                    writeln!(f, "  - {item}")?;
                }
                Ok(())
            }
            Block::Card(card) => write!(f, "{card}"),
            Block::Action { label, enabled } => {
                if *enabled {
                    writeln!(f, "<{label}>")
                } else {
                    writeln!(f, "<{label}> (disabled)")
                }
            }
            Block::Error(message) => writeln!(f, "error: {message}"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n+ {}", self.title)?;
        if let Some(subtitle) = &self.subtitle {
            writeln!(f, "  {subtitle}")?;
        }
        for item in &self.items {
            writeln!(f, "    * {item}")?;
        }
        for line in &self.footer {
            writeln!(f, "  {line}")?;
        }
        if let Some(image) = &self.image {
            // Terminals can't show the PNG; report its size instead.
            writeln!(f, "  [image: {} bytes base64]", image.len().saturating_sub("data:image/png;base64,".len()))?;
        }
        Ok(())
    }
}

/// Render a block list to plain text.
pub fn to_text(blocks: &[Block]) -> String {
    blocks.iter().map(ToString::to_string).collect()
}
