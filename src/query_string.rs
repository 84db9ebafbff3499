use std::collections::HashMap;

use crate::router::LIST_PATH;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.items.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Free text search, `q=`.
    pub fn get_search(&self) -> &str {
        self.get_non_empty("q").unwrap_or_default()
    }

    pub fn get_tag(&self) -> Option<&str> {
        self.get_non_empty("tag")
    }
}

/// Link to the list page with the given filters, empty ones left out.
pub fn list_link(search: &str, tag: Option<&str>) -> String {
    let mut params = vec![];
    if !search.is_empty() {
        params.push(("q", search));
    }
    if let Some(tag) = tag.filter(|t| !t.is_empty()) {
        params.push(("tag", tag));
    }

    if params.is_empty() {
        return LIST_PATH.to_string();
    }
    match serde_urlencoded::to_string(&params) {
        Ok(qs) => format!("{}?{}", LIST_PATH, qs),
        Err(_) => LIST_PATH.to_string(),
    }
}
