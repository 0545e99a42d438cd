//! Cursor pagination over a customer's orders.
//!
//! A [`PageRequest`] carries the raw arguments received from either API
//! surface. [`PageRequest::plan`] validates them into a [`PagePlan`], which
//! describes the single query the store must run:
//!
//! ```text
//! WHERE customer_id = $customer
//!   [AND total_price >= $min_price]
//!   [AND id > $after]
//! ORDER BY total_price <ASC|DESC>, id ASC
//! LIMIT first + 1
//! ```
//!
//! The extra row only signals that another page exists; [`PagePlan::assemble`]
//! drops it and builds the edges.
//!
//! The `after` cursor always bounds the *identifier*, never the sort key.
//! Sorting by price while advancing through identifier space means a
//! descending-price walk can skip or repeat rows compared to a "next page in
//! sort order" reading. That coupling is intentional and preserved.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{CustomerId, OrderId};
use super::order::{Order, ValidationError};

/// Sort direction on `total_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Resolve a client-supplied sort order.
    ///
    /// Only the exact strings `ASC` and `DESC` are recognised. Anything else,
    /// including lowercase spellings, falls back to ascending.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("DESC") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// SQL keyword for this direction. Never derived from client text.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Opaque page cursor. Encodes the identifier of the boundary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(OrderId);

impl Cursor {
    #[must_use]
    pub const fn new(order_id: OrderId) -> Self {
        Self(order_id)
    }

    #[must_use]
    pub const fn order_id(self) -> OrderId {
        self.0
    }

    /// Decode a cursor received from a client.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCursor` if the value is not an order
    /// identifier.
    pub fn decode(raw: &str) -> Result<Self, ValidationError> {
        raw.parse::<OrderId>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidCursor(raw.to_owned()))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw pagination arguments as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub customer_id: CustomerId,
    pub first: i32,
    pub after: Option<String>,
    pub min_price: Option<Decimal>,
    pub sort_order: Option<String>,
}

impl PageRequest {
    /// Create a request for the first `first` orders of a customer.
    #[must_use]
    pub const fn new(customer_id: CustomerId, first: i32) -> Self {
        Self {
            customer_id,
            first,
            after: None,
            min_price: None,
            sort_order: None,
        }
    }

    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn min_price(mut self, min_price: Decimal) -> Self {
        self.min_price = Some(min_price);
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Validate the request into an executable plan.
    ///
    /// An empty `after` string is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageSize` when `first` is not positive and
    /// `InvalidCursor` when `after` does not decode.
    pub fn plan(&self) -> Result<PagePlan, ValidationError> {
        let first = usize::try_from(self.first)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ValidationError::InvalidPageSize(self.first))?;

        let after = match self.after.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(Cursor::decode(raw)?.order_id()),
        };

        Ok(PagePlan {
            customer_id: self.customer_id,
            min_price: self.min_price,
            after,
            sort: SortOrder::resolve(self.sort_order.as_deref()),
            first,
        })
    }
}

/// A validated page query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub customer_id: CustomerId,
    /// Inclusive lower bound on `total_price`.
    pub min_price: Option<Decimal>,
    /// Strict lower bound on `id`.
    pub after: Option<OrderId>,
    pub sort: SortOrder,
    /// Page size requested by the client.
    pub first: usize,
}

impl PagePlan {
    /// Rows to fetch: one more than the page size.
    #[must_use]
    pub fn fetch_limit(&self) -> i64 {
        i64::try_from(self.first).map_or(i64::MAX, |n| n.saturating_add(1))
    }

    /// Whether an order satisfies the plan's predicates.
    #[must_use]
    pub fn admits(&self, order: &Order) -> bool {
        order.customer_id == self.customer_id
            && self.min_price.is_none_or(|min| order.total_price >= min)
            && self.after.is_none_or(|after| order.id > after)
    }

    /// Ordering of rows within a page: price in the plan's direction, ties
    /// broken by ascending identifier.
    #[must_use]
    pub fn compare(&self, a: &Order, b: &Order) -> Ordering {
        let by_price = a.total_price.cmp(&b.total_price);
        let by_price = match self.sort {
            SortOrder::Asc => by_price,
            SortOrder::Desc => by_price.reverse(),
        };
        by_price.then_with(|| a.id.cmp(&b.id))
    }

    /// Turn the rows returned for this plan into a page.
    #[must_use]
    pub fn assemble(&self, rows: Vec<Order>) -> Page<Order> {
        Page::from_rows(rows, self.first)
    }
}

/// One element of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

/// Boundary information for a page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// A window of results plus its boundary information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl Page<Order> {
    /// Build a page from up to `first + 1` rows in sort order.
    #[must_use]
    pub fn from_rows(mut rows: Vec<Order>, first: usize) -> Self {
        let has_next_page = rows.len() > first;
        rows.truncate(first);

        let edges: Vec<Edge<Order>> = rows
            .into_iter()
            .map(|order| Edge {
                cursor: Cursor::new(order.id).to_string(),
                node: order,
            })
            .collect();

        let end_cursor = edges.last().map(|edge| edge.cursor.clone());

        Self {
            edges,
            page_info: PageInfo {
                end_cursor,
                has_next_page,
            },
        }
    }
}

impl<T> Page<T> {
    /// Iterate over the nodes in page order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Replace every node, keeping cursors and page info.
    #[must_use]
    pub fn map_nodes<U>(self, mut f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    cursor: edge.cursor,
                    node: f(edge.node),
                })
                .collect(),
            page_info: self.page_info,
        }
    }
}
