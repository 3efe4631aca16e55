//! Pagination over list endpoints
//!
//! A [`Paginator`] walks one endpoint page by page. The cursor lives in a
//! [`PaginationStyle`] value, so the style is chosen explicitly instead of
//! being inferred from whichever query key happens to be present.
//!
//! The API signals the end of a collection with a short page: as soon as a
//! page holds fewer records than the page size, no further request is made.
//! An empty body also ends the sequence, without an error.
//!
//! A paginator is single-pass. Once it has returned `None` or an error it
//! stays exhausted; build a new one to read the collection again.

use crate::adapters::lucca::ApiClient;
use crate::core::extract::{extract_owned, type_name, JsonPath};
use crate::domain::{ExportError, ExtractionError, Result};
use futures::stream::Stream;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Page size used when a legacy parameter map omits it
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Cursor and page size of a paginated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// `paging=<offset>,<limit>`, offset advances by `limit`
    OffsetLimit { offset: u64, limit: u32 },
    /// `page=<page>&limit=<limit>`, page advances by one
    PageLimit { page: u64, limit: u32 },
    /// One unconditional request
    Single,
}

impl PaginationStyle {
    /// Offset pagination starting at zero
    pub fn offset(limit: u32) -> Self {
        PaginationStyle::OffsetLimit { offset: 0, limit }
    }

    /// Page-number pagination starting at page one
    pub fn pages(limit: u32) -> Self {
        PaginationStyle::PageLimit { page: 1, limit }
    }

    /// Infers the style from a legacy parameter map
    ///
    /// A `page` key selects page-number style (with `limit`, default
    /// [`DEFAULT_PAGE_SIZE`]); a `paging` key holding `"offset,limit"` selects
    /// offset style; neither selects [`PaginationStyle::Single`]. The
    /// pagination keys are removed from the returned base parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed numbers.
    pub fn from_params(params: &[(String, String)]) -> Result<(Self, Vec<(String, String)>)> {
        let lookup = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let style = if let Some(page) = lookup("page") {
            let limit = match lookup("limit") {
                Some(limit) => parse_number(limit, "limit")?,
                None => DEFAULT_PAGE_SIZE,
            };
            PaginationStyle::PageLimit {
                page: parse_number(page, "page")?,
                limit,
            }
        } else if let Some(paging) = lookup("paging") {
            let (offset, limit) = paging.split_once(',').ok_or_else(|| {
                ExportError::Configuration(format!(
                    "paging must be formatted as 'offset,limit', got '{paging}'"
                ))
            })?;
            PaginationStyle::OffsetLimit {
                offset: parse_number(offset, "paging offset")?,
                limit: parse_number(limit, "paging limit")?,
            }
        } else {
            PaginationStyle::Single
        };

        let pagination_keys: &[&str] = match style {
            PaginationStyle::PageLimit { .. } => &["page", "limit"],
            PaginationStyle::OffsetLimit { .. } => &["paging"],
            PaginationStyle::Single => &[],
        };
        let base = params
            .iter()
            .filter(|(key, _)| !pagination_keys.contains(&key.as_str()))
            .cloned()
            .collect();

        Ok((style, base))
    }

    /// Page size; zero for [`PaginationStyle::Single`]
    pub fn limit(&self) -> u32 {
        match self {
            PaginationStyle::OffsetLimit { limit, .. } | PaginationStyle::PageLimit { limit, .. } => {
                *limit
            }
            PaginationStyle::Single => 0,
        }
    }

    /// Query parameters carrying the cursor
    pub fn query_params(&self) -> Vec<(String, String)> {
        match self {
            PaginationStyle::OffsetLimit { offset, limit } => {
                vec![("paging".to_string(), format!("{offset},{limit}"))]
            }
            PaginationStyle::PageLimit { page, limit } => vec![
                ("page".to_string(), page.to_string()),
                ("limit".to_string(), limit.to_string()),
            ],
            PaginationStyle::Single => Vec::new(),
        }
    }

    /// Whether a page of `len` records ends the collection
    pub fn is_last_page(&self, len: usize) -> bool {
        let limit = self.limit();
        limit == 0 || len < limit as usize
    }

    /// Cursor for the following page
    pub fn advance(self) -> Self {
        match self {
            PaginationStyle::OffsetLimit { offset, limit } => PaginationStyle::OffsetLimit {
                offset: offset + u64::from(limit),
                limit,
            },
            PaginationStyle::PageLimit { page, limit } => PaginationStyle::PageLimit {
                page: page + 1,
                limit,
            },
            PaginationStyle::Single => PaginationStyle::Single,
        }
    }
}

impl fmt::Display for PaginationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationStyle::OffsetLimit { offset, limit } => {
                write!(f, "offset {offset}, limit {limit}")
            }
            PaginationStyle::PageLimit { page, limit } => write!(f, "page {page}, limit {limit}"),
            PaginationStyle::Single => f.write_str("single request"),
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ExportError::Configuration(format!("{what} must be a non-negative integer, got '{value}'"))
    })
}

/// Records returned by one request
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based position in the sequence
    pub index: usize,
    /// Cursor the page was requested with
    pub cursor: PaginationStyle,
    /// Extracted records
    pub records: Vec<Value>,
}

impl Page {
    /// Whether this is the first page of the run
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether a decoded body counts as "no data"
pub fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Single-pass page sequence over one endpoint
pub struct Paginator {
    client: Arc<dyn ApiClient>,
    endpoint: String,
    base_params: Vec<(String, String)>,
    path: JsonPath,
    cursor: PaginationStyle,
    next_index: usize,
    exhausted: bool,
}

impl Paginator {
    /// Creates a paginator; no request is made until the first page is pulled
    pub fn new(
        client: Arc<dyn ApiClient>,
        endpoint: impl Into<String>,
        base_params: Vec<(String, String)>,
        path: JsonPath,
        style: PaginationStyle,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            base_params,
            path,
            cursor: style,
            next_index: 0,
            exhausted: false,
        }
    }

    /// Endpoint being paginated
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether the sequence has ended
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page
    ///
    /// Returns `Ok(None)` once the collection is exhausted, including when
    /// the API answers with an empty body.
    ///
    /// # Errors
    ///
    /// HTTP failures and bodies without a record array at the extraction path.
    /// The paginator is exhausted afterwards.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.exhausted {
            return Ok(None);
        }

        match self.fetch().await {
            Ok(page) => Ok(page),
            Err(e) => {
                self.exhausted = true;
                tracing::error!(endpoint = %self.endpoint, error = %e, "Pagination aborted");
                Err(e)
            }
        }
    }

    async fn fetch(&mut self) -> Result<Option<Page>> {
        let mut params = self.base_params.clone();
        params.extend(self.cursor.query_params());

        tracing::debug!(endpoint = %self.endpoint, cursor = %self.cursor, "Fetching page");

        let body = self
            .client
            .get(&self.endpoint, &params)
            .await
            .map_err(|source| ExportError::Http {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if is_empty_body(&body) {
            tracing::warn!(endpoint = %self.endpoint, cursor = %self.cursor, "Empty response, stopping");
            self.exhausted = true;
            return Ok(None);
        }

        let records = match extract_owned(body, &self.path) {
            Ok(Value::Array(records)) => records,
            Ok(other) => {
                return Err(self.extraction_error(ExtractionError::NotAnArray {
                    path: self.path.to_string(),
                    found: type_name(&other),
                }))
            }
            Err(source) => return Err(self.extraction_error(source)),
        };

        let page = Page {
            index: self.next_index,
            cursor: self.cursor,
            records,
        };
        self.next_index += 1;

        tracing::info!(
            endpoint = %self.endpoint,
            cursor = %page.cursor,
            records = page.len(),
            "Fetched page"
        );

        if self.cursor.is_last_page(page.len()) {
            tracing::info!(
                endpoint = %self.endpoint,
                pages = self.next_index,
                "All records fetched"
            );
            self.exhausted = true;
        } else {
            self.cursor = self.cursor.advance();
        }

        Ok(Some(page))
    }

    fn extraction_error(&self, source: ExtractionError) -> ExportError {
        ExportError::Extraction {
            endpoint: self.endpoint.clone(),
            source,
        }
    }

    /// Turns the paginator into a `Stream` of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + Send {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            Ok(page.map(|page| (page, paginator)))
        })
    }
}
