use crate::pagination::limit::NO_LIMIT;
use serde::{Deserialize, Serialize};

/// Response envelope for one page of items. `next_page_token` is `None` on
/// the last page; `applied_limit` is the normalized limit the pager used,
/// [`NO_LIMIT`] when pagination ran unlimited; `total` is the overall row
/// count when the caller chose to compute one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T, C> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    pub applied_limit: i64,
    pub next_page_token: Option<C>,
}

impl<T, C> PageResult<T, C> {
    pub fn new(
        items: Vec<T>,
        total: Option<i64>,
        applied_limit: i64,
        next_page_token: Option<C>,
    ) -> Self {
        PageResult {
            items,
            total,
            applied_limit,
            next_page_token,
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.next_page_token.is_none()
    }

    pub fn unlimited(items: Vec<T>, total: Option<i64>) -> Self {
        PageResult {
            items,
            total,
            applied_limit: NO_LIMIT,
            next_page_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_fields() {
        let page = PageResult::<i64, String>::new(vec![1, 2], Some(9), 2, Some("tok".into()));

        assert_eq!(
            serde_json::to_string(&page).unwrap(),
            r#"{"items":[1,2],"total":9,"appliedLimit":2,"nextPageToken":"tok"}"#
        );
    }

    #[test]
    fn omits_an_uncounted_total() {
        let page = PageResult::<i64, String>::new(vec![1], None, 1, None);

        let encoded = serde_json::to_string(&page).unwrap();
        assert_eq!(
            encoded,
            r#"{"items":[1],"appliedLimit":1,"nextPageToken":null}"#
        );

        let decoded: PageResult<i64, String> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.total, None);
    }

    #[test]
    fn last_page_has_no_token() {
        let page = PageResult::<i64, String>::unlimited(vec![1], Some(1));

        assert!(page.is_last_page());
        assert_eq!(page.applied_limit, NO_LIMIT);
    }
}
