use serde::Deserialize;

use flowdeck_core::{DomainError, DomainResult};
use flowdeck_templates::{Cursor, PageRequest, TemplateQuery};

/// `GET /v1/flow-templates` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTemplatesQuery {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
    pub search: Option<String>,
    /// Comma-separated; a template must carry all of them.
    pub tags: Option<String>,
}

impl ListTemplatesQuery {
    pub fn into_query(self) -> DomainResult<TemplateQuery> {
        let page = page_request(self.limit, self.cursor.as_deref())?;
        let tags = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(TemplateQuery {
            search: self.search,
            tags,
            page,
        })
    }
}

/// Plain paging query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

impl PageQuery {
    pub fn page_request(&self) -> DomainResult<PageRequest> {
        page_request(self.limit, self.cursor.as_deref())
    }
}

fn page_request(limit: Option<usize>, cursor: Option<&str>) -> Result<PageRequest, DomainError> {
    let cursor = cursor
        .filter(|c| !c.is_empty())
        .map(str::parse::<Cursor>)
        .transpose()?;
    Ok(PageRequest::new(limit, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_and_trimmed() {
        let q = ListTemplatesQuery {
            tags: Some("slack, daily,,".to_string()),
            ..ListTemplatesQuery::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(q.tags, vec!["slack".to_string(), "daily".to_string()]);
    }

    #[test]
    fn bad_cursor_is_a_validation_error() {
        let err = PageQuery {
            limit: None,
            cursor: Some("garbage".to_string()),
        }
        .page_request()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_cursor_means_first_page() {
        let page = PageQuery {
            limit: Some(5),
            cursor: Some(String::new()),
        }
        .page_request()
        .unwrap();
        assert_eq!(page, PageRequest::new(Some(5), None));
    }
}
