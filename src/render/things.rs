//! Things 3 JSON import payloads and `things:///add-json` URLs.
//!
//! A payload is a JSON array holding one project:
//!
//! ```text
//! [{"type":"project","attributes":{"title":"Book","items":[
//!     {"type":"heading","attributes":{"title":"Part I"}},
//!     {"type":"to-do","attributes":{"title":"Chapter 1","checklist-items":[
//!         {"type":"checklist-item","attributes":{"title":"1.1"}}]}}]}}]
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Item, Project};

use super::options::{BatchPolicy, ExportOptions, JsonFormat};

/// Base URL of the Things JSON import command.
pub const ADD_JSON_URL: &str = "things:///add-json";

// RFC 3986 unreserved characters pass through.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Serialize)]
#[serde(tag = "type", content = "attributes", rename_all = "kebab-case")]
enum ThingsObject<'a> {
    Project(ProjectAttributes<'a>),
    Heading(TitleAttributes<'a>),
    #[serde(rename = "to-do")]
    Todo(TodoAttributes<'a>),
    ChecklistItem(TitleAttributes<'a>),
}

#[derive(Serialize)]
struct ProjectAttributes<'a> {
    title: String,
    items: Vec<ThingsObject<'a>>,
}

#[derive(Serialize)]
struct TitleAttributes<'a> {
    title: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TodoAttributes<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    checklist_items: Option<Vec<ThingsObject<'a>>>,
}

impl<'a> From<&'a Item> for ThingsObject<'a> {
    fn from(item: &'a Item) -> Self {
        match item {
            Item::Heading(heading) => ThingsObject::Heading(TitleAttributes {
                title: &heading.title,
            }),
            Item::Todo(todo) => ThingsObject::Todo(TodoAttributes {
                title: &todo.title,
                checklist_items: todo.checklist.as_ref().map(|items| {
                    items
                        .iter()
                        .map(|c| ThingsObject::ChecklistItem(TitleAttributes { title: &c.title }))
                        .collect()
                }),
            }),
        }
    }
}

fn encode(value: &impl Serialize, format: JsonFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        JsonFormat::Pretty => serde_json::to_vec_pretty(value)?,
        JsonFormat::Compact => serde_json::to_vec(value)?,
    };
    Ok(bytes)
}

fn project_payload(title: String, items: &[Item], format: JsonFormat) -> Result<Vec<u8>> {
    let project = ThingsObject::Project(ProjectAttributes {
        title,
        items: items.iter().map(ThingsObject::from).collect(),
    });
    encode(&[project], format)
}

/// Serialize a project into one or more import payloads.
///
/// With [`BatchPolicy::ItemCount`] the project is split into consecutive
/// batches titled `"<title> (i/n)"`; a project that fits in one batch
/// keeps its title.
pub fn to_payloads(project: &Project, options: &ExportOptions) -> Result<Vec<Vec<u8>>> {
    let size = match options.batch.validate()? {
        BatchPolicy::Single => project.items.len().max(1),
        BatchPolicy::ItemCount(n) => n,
    };

    if project.items.len() <= size {
        let payload = project_payload(project.title.clone(), &project.items, options.format)?;
        return Ok(vec![payload]);
    }

    let batches: Vec<&[Item]> = project.items.chunks(size).collect();
    let total = batches.len();
    log::debug!(
        "Splitting project {:?} into {} batches of up to {} items",
        project.title,
        total,
        size
    );

    batches
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            let title = format!("{} ({}/{})", project.title, i + 1, total);
            project_payload(title, items, options.format)
        })
        .collect()
}

/// Serialize a whole project into a single JSON string.
pub fn to_json(project: &Project, format: JsonFormat) -> Result<String> {
    let payload = project_payload(project.title.clone(), &project.items, format)?;
    String::from_utf8(payload).map_err(|e| Error::Serialize(e.to_string()))
}

/// Build a `things:///add-json` URL carrying `payload`.
pub fn things_url(payload: &[u8], options: &ExportOptions) -> Result<String> {
    let json = std::str::from_utf8(payload).map_err(|e| Error::Serialize(e.to_string()))?;

    let mut url = format!(
        "{}?data={}",
        ADD_JSON_URL,
        utf8_percent_encode(json, QUERY_VALUE)
    );
    if let Some(token) = &options.auth_token {
        url.push_str("&auth-token=");
        url.extend(utf8_percent_encode(token, QUERY_VALUE));
    }
    if options.reveal {
        url.push_str("&reveal=true");
    }
    Ok(url)
}

/// Import URLs for every payload of a project.
pub fn things_urls(project: &Project, options: &ExportOptions) -> Result<Vec<String>> {
    to_payloads(project, options)?
        .iter()
        .map(|payload| things_url(payload, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChecklistItem, Heading, Todo};

    fn sample() -> Project {
        let mut project = Project::new("Book");
        project.push(Item::Heading(Heading::new("Part I")));
        let mut todo = Todo::new("Chapter 1");
        todo.add_checklist_item(ChecklistItem::new("1.1"));
        project.push(Item::Todo(todo));
        project.push(Item::Todo(Todo::new("Chapter 2")));
        project
    }

    #[test]
    fn test_wire_format() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["type"], "project");
        assert_eq!(value[0]["attributes"]["title"], "Book");
        let items = &value[0]["attributes"]["items"];
        assert_eq!(items[0]["type"], "heading");
        assert_eq!(items[1]["type"], "to-do");
        assert_eq!(
            items[1]["attributes"]["checklist-items"][0],
            serde_json::json!({"type": "checklist-item", "attributes": {"title": "1.1"}})
        );
        assert!(items[2]["attributes"].get("checklist-items").is_none());
    }

    #[test]
    fn test_batches() {
        let options = ExportOptions::new().with_batch_size(2).compact();
        let payloads = to_payloads(&sample(), &options).unwrap();
        assert_eq!(payloads.len(), 2);

        let second: serde_json::Value = serde_json::from_slice(&payloads[1]).unwrap();
        assert_eq!(second[0]["attributes"]["title"], "Book (2/2)");
        assert_eq!(second[0]["attributes"]["items"][0]["attributes"]["title"], "Chapter 2");
    }

    #[test]
    fn test_batch_that_fits_keeps_title() {
        let options = ExportOptions::new().with_batch_size(10);
        let payloads = to_payloads(&sample(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payloads[0]).unwrap();
        assert_eq!(value[0]["attributes"]["title"], "Book");
    }

    #[test]
    fn test_empty_project() {
        let payloads = to_payloads(&Project::new("Empty"), &ExportOptions::new()).unwrap();
        assert_eq!(payloads.len(), 1);
    }

    #[test]
    fn test_things_url() {
        let options = ExportOptions::new()
            .with_auth_token("t k")
            .with_reveal(true);
        let url = things_url(br#"[{"a":"b c"}]"#, &options).unwrap();
        assert_eq!(
            url,
            "things:///add-json?data=%5B%7B%22a%22%3A%22b%20c%22%7D%5D&auth-token=t%20k&reveal=true"
        );
    }
}
