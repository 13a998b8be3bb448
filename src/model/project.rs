//! Project document types produced by the document builder.

use serde::{Deserialize, Serialize};

/// A project: the single top-level document produced by one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title
    pub title: String,

    /// Headings and to-dos in outline order
    pub items: Vec<Item>,
}

impl Project {
    /// Create an empty project.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Append an item and return its position.
    pub fn push(&mut self, item: Item) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Check if the project has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the to-dos in the project.
    pub fn todos(&self) -> impl Iterator<Item = &Todo> {
        self.items.iter().filter_map(|item| match item {
            Item::Todo(todo) => Some(todo),
            Item::Heading(_) => None,
        })
    }

    /// Iterate over the headings in the project.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.items.iter().filter_map(|item| match item {
            Item::Heading(heading) => Some(heading),
            Item::Todo(_) => None,
        })
    }

    /// Number of items including checklist items.
    pub fn total_items(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Item::Heading(_) => 1,
                Item::Todo(todo) => 1 + todo.checklist_len(),
            })
            .sum()
    }
}

/// A project item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Heading(Heading),
    Todo(Todo),
}

impl Item {
    /// Title of the item.
    pub fn title(&self) -> &str {
        match self {
            Item::Heading(h) => &h.title,
            Item::Todo(t) => &t.title,
        }
    }
}

/// A heading inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub title: String,
}

impl Heading {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A to-do, optionally carrying checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub title: String,

    /// Checklist items; `None` until the first one is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checklist: None,
        }
    }

    /// Append a checklist item, creating the list on first use.
    pub fn add_checklist_item(&mut self, item: ChecklistItem) {
        self.checklist.get_or_insert_with(Vec::new).push(item);
    }

    /// Number of checklist items.
    pub fn checklist_len(&self) -> usize {
        self.checklist.as_ref().map_or(0, Vec::len)
    }
}

/// A checklist entry under a to-do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
}

impl ChecklistItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}
