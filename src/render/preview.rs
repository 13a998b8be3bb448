//! Plain-text preview of a classified outline.

use serde::Serialize;

use crate::classify::{ClassifiedEntry, Role};

/// Spaces per depth level.
pub const INDENT_WIDTH: usize = 4;

/// One outline entry as shown in a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub index: usize,
    pub depth: usize,
    pub label: String,
    pub role: Role,
    pub included: bool,
}

impl PreviewLine {
    /// Leading whitespace for this line's depth.
    pub fn indent(&self) -> String {
        " ".repeat(self.depth * INDENT_WIDTH)
    }

    /// Role marker placed before the label.
    pub fn marker(&self) -> &'static str {
        match self.role {
            Role::Heading => "# ",
            Role::Todo => "[ ] ",
            Role::Checklist => "- ",
            Role::Unclassified => "",
        }
    }
}

impl From<&ClassifiedEntry<'_>> for PreviewLine {
    fn from(classified: &ClassifiedEntry<'_>) -> Self {
        Self {
            index: classified.entry.index,
            depth: classified.entry.depth,
            label: classified.entry.label.clone(),
            role: classified.role,
            included: classified.included,
        }
    }
}

/// Collect preview lines in traversal order.
pub fn preview_lines<'a, I>(entries: I) -> Vec<PreviewLine>
where
    I: IntoIterator<Item = ClassifiedEntry<'a>>,
{
    entries.into_iter().map(|c| PreviewLine::from(&c)).collect()
}

/// Render preview lines as indented text, one entry per line.
///
/// Excluded entries are wrapped in parentheses.
pub fn to_preview_text(lines: &[PreviewLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&line.indent());
        output.push_str(line.marker());
        if line.included {
            output.push_str(&line.label);
        } else {
            output.push('(');
            output.push_str(&line.label);
            output.push(')');
        }
        output.push('\n');
    }
    output
}
