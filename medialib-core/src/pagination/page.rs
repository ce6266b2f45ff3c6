use serde::Serialize;

/// One page of a listing plus the tokens to move away from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
    pub prev_token: Option<String>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_token: self.next_token,
            prev_token: self.prev_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_token_names() {
        let page = Page {
            items: vec![1, 2],
            next_token: Some("abc".to_string()),
            prev_token: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [1, 2], "nextToken": "abc", "prevToken": null})
        );
    }

    #[test]
    fn map_keeps_tokens() {
        let page = Page {
            items: vec![1, 2],
            next_token: Some("n".to_string()),
            prev_token: Some("p".to_string()),
        }
        .map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.next_token.as_deref(), Some("n"));
        assert_eq!(page.prev_token.as_deref(), Some("p"));
    }
}
