//! HAL representations.
//!
//! An [`EntityModel`] is a resource's own fields with a `_links` object next
//! to them:
//!
//! ```json
//! { "title": "Learn Rust", "_links": { "self": { "href": "/api/v1/todos/65f1…" } } }
//! ```
//!
//! A [`CollectionModel`] nests its items under `_embedded.<relation>` and
//! carries its own `_links`. An empty collection has no `_embedded` at all.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// A single resource plus its links.
#[derive(Clone, Debug, Serialize)]
pub struct EntityModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> EntityModel<T> {
    pub fn new(content: T, self_link: Link) -> Self {
        Self { content, links: Links { self_link } }
    }
}

/// A list of items embedded under `relation`, plus the collection's links.
#[derive(Clone, Debug)]
pub struct CollectionModel<T> {
    relation: &'static str,
    items: Vec<T>,
    links: Links,
}

impl<T> CollectionModel<T> {
    pub fn new(relation: &'static str, items: Vec<T>, self_link: Link) -> Self {
        Self { relation, items, links: Links { self_link } }
    }
}

impl<T: Serialize> Serialize for CollectionModel<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.items.is_empty() {
            map.serialize_entry("_embedded", &Embedded { relation: self.relation, items: &self.items })?;
        }
        map.serialize_entry("_links", &self.links)?;
        map.end()
    }
}

struct Embedded<'a, T> {
    relation: &'static str,
    items: &'a [T],
}

impl<T: Serialize> Serialize for Embedded<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.relation, self.items)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        title: &'static str,
    }

    #[test]
    fn entity_flattens_content_next_to_links() {
        let model = EntityModel::new(Item { title: "a" }, Link::new("/items/1"));

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "title": "a", "_links": { "self": { "href": "/items/1" } } })
        );
    }

    #[test]
    fn collection_embeds_items_under_relation() {
        let items = vec![
            EntityModel::new(Item { title: "a" }, Link::new("/items/1")),
            EntityModel::new(Item { title: "b" }, Link::new("/items/2")),
        ];
        let model = CollectionModel::new("itemList", items, Link::new("/items"));

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "_embedded": {
                    "itemList": [
                        { "title": "a", "_links": { "self": { "href": "/items/1" } } },
                        { "title": "b", "_links": { "self": { "href": "/items/2" } } }
                    ]
                },
                "_links": { "self": { "href": "/items" } }
            })
        );
    }

    #[test]
    fn empty_collection_has_only_links() {
        let model: CollectionModel<Item> = CollectionModel::new("itemList", Vec::new(), Link::new("/items"));

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "_links": { "self": { "href": "/items" } } })
        );
    }
}
