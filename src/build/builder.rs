//! Folding of classified entries into a [`Project`].

use serde::Serialize;
use thiserror::Error;

use crate::classify::{ClassifiedEntry, Classifier, DepthBand, Role};
use crate::model::{ChecklistItem, Heading, Item, Project, Todo};
use crate::outline::Flattened;

use super::HeadingStack;

/// A classified entry that could not be placed in the project.
///
/// Inconsistencies are recovered from by dropping the entry; they never
/// abort a build.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// A heading more than one level below its nearest open heading.
    #[error("heading {label:?} (entry {index}) at depth {depth} skips a level below {parent:?}")]
    HeadingDepthJump {
        label: String,
        index: usize,
        depth: usize,
        parent: Option<usize>,
    },

    /// A checklist item with no to-do since the last heading.
    #[error("checklist item {label:?} (entry {index}) has no to-do to attach to")]
    OrphanChecklist { label: String, index: usize },

    /// A checklist item not exactly one level below the current to-do.
    #[error("checklist item {label:?} (entry {index}) at depth {depth} is not directly below the to-do at depth {todo_depth}")]
    ChecklistDepthMismatch {
        label: String,
        index: usize,
        depth: usize,
        todo_depth: usize,
    },
}

/// Counters collected during a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub headings: usize,
    pub todos: usize,
    pub checklist_items: usize,

    /// Entries rejected by the inclusion filter
    pub excluded: usize,

    /// Included entries outside every band
    pub unclassified: usize,

    /// Entries dropped because of an inconsistency
    pub dropped: usize,
}

/// Output of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// The project, or `None` when no depth band was configured
    pub project: Option<Project>,

    pub diagnostics: Vec<Inconsistency>,

    pub stats: BuildStats,
}

impl BuildReport {
    /// Report for a build that never ran.
    pub fn unconfigured() -> Self {
        Self {
            project: None,
            diagnostics: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// The to-do accepting checklist items. It joins the project once closed.
#[derive(Debug)]
struct OpenTodo {
    todo: Todo,
    depth: usize,
}

/// Streaming builder: feed classified entries in traversal order, then
/// call [`DocumentBuilder::finish`].
#[derive(Debug)]
pub struct DocumentBuilder {
    project: Project,
    headings: HeadingStack,
    heading_origin: usize,
    open_todo: Option<OpenTodo>,
    diagnostics: Vec<Inconsistency>,
    stats: BuildStats,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, band: &DepthBand) -> Self {
        Self::with_heading_stack(title, band, HeadingStack::new())
    }

    /// Builder using a custom heading stack (e.g. another separator).
    pub fn with_heading_stack(
        title: impl Into<String>,
        band: &DepthBand,
        headings: HeadingStack,
    ) -> Self {
        Self {
            project: Project::new(title),
            headings,
            heading_origin: band.heading_origin(),
            open_todo: None,
            diagnostics: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    /// Process one classified entry.
    pub fn push(&mut self, classified: &ClassifiedEntry<'_>) {
        let entry = classified.entry;

        // Ancestry is tracked for every entry, excluded or not.
        let heading_title = if classified.role == Role::Heading {
            let entered = self
                .headings
                .enter(entry.depth, self.heading_origin, &entry.label);
            if entered.jumped {
                self.report(Inconsistency::HeadingDepthJump {
                    label: entry.label.clone(),
                    index: entry.index,
                    depth: entry.depth,
                    parent: entered.parent,
                });
            }
            Some(entered.title)
        } else {
            self.headings.retire(entry.depth);
            None
        };

        if !classified.included {
            // Checklist items of an excluded to-do must not fall through
            // to an earlier one.
            if matches!(classified.role, Role::Heading | Role::Todo) {
                self.close_todo();
            }
            self.stats.excluded += 1;
            return;
        }

        match classified.role {
            Role::Heading => {
                let title = heading_title.unwrap_or_else(|| entry.label.clone());
                self.close_todo();
                self.project.push(Item::Heading(Heading::new(title)));
                self.stats.headings += 1;
            }
            Role::Todo => {
                self.close_todo();
                self.open_todo = Some(OpenTodo {
                    todo: Todo::new(entry.label.clone()),
                    depth: entry.depth,
                });
                self.stats.todos += 1;
            }
            Role::Checklist => self.attach_checklist(classified),
            Role::Unclassified => self.stats.unclassified += 1,
        }
    }

    fn attach_checklist(&mut self, classified: &ClassifiedEntry<'_>) {
        let entry = classified.entry;
        let Some(open) = self.open_todo.as_mut() else {
            self.drop_entry(Inconsistency::OrphanChecklist {
                label: entry.label.clone(),
                index: entry.index,
            });
            return;
        };

        if entry.depth != open.depth + 1 {
            let todo_depth = open.depth;
            self.drop_entry(Inconsistency::ChecklistDepthMismatch {
                label: entry.label.clone(),
                index: entry.index,
                depth: entry.depth,
                todo_depth,
            });
            return;
        }

        open.todo.add_checklist_item(ChecklistItem::new(entry.label.clone()));
        self.stats.checklist_items += 1;
    }

    /// Move the open to-do into the project; later checklist items are
    /// orphans until the next to-do.
    fn close_todo(&mut self) {
        if let Some(open) = self.open_todo.take() {
            self.project.push(Item::Todo(open.todo));
        }
    }

    fn drop_entry(&mut self, inconsistency: Inconsistency) {
        self.stats.dropped += 1;
        self.report(inconsistency);
    }

    fn report(&mut self, inconsistency: Inconsistency) {
        log::warn!("{}", inconsistency);
        self.diagnostics.push(inconsistency);
    }

    pub fn finish(mut self) -> BuildReport {
        self.close_todo();
        log::debug!(
            "Built project {:?}: {} headings, {} to-dos, {} checklist items, {} diagnostics",
            self.project.title,
            self.stats.headings,
            self.stats.todos,
            self.stats.checklist_items,
            self.diagnostics.len()
        );
        BuildReport {
            project: Some(self.project),
            diagnostics: self.diagnostics,
            stats: self.stats,
        }
    }
}

/// Classify and build a project in one pass.
///
/// Returns an unconfigured report when the classifier has no band.
pub fn build_project(flat: &Flattened, classifier: &Classifier, title: &str) -> BuildReport {
    let Some(band) = classifier.band() else {
        return BuildReport::unconfigured();
    };

    let mut builder = DocumentBuilder::new(title, band);
    for classified in classifier.classify(flat) {
        builder.push(&classified);
    }
    builder.finish()
}
