//! Orders and the validated inputs that create or change them.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CustomerId, OrderId, ProductId};

/// Client-correctable input errors.
///
/// These map to 400 on REST and to a GraphQL error carrying the same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: customer_id, product_id, quantity")]
    MissingFields,
    #[error("quantity must be a positive integer (got {0})")]
    InvalidQuantity(i32),
    #[error("total_price must not be negative (got {0})")]
    NegativePrice(Decimal),
    #[error("{0} is not a representable price")]
    InvalidPrice(String),
    #[error("first must be a positive integer (got {0})")]
    InvalidPageSize(i32),
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),
}

/// An order as stored in `orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "openapi", schema(value_type = f64))]
    pub total_price: Decimal,
}

/// Convert a client-supplied floating point price.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPrice` for NaN, infinities and values
/// outside the decimal range.
pub fn price_from_f64(value: f64) -> Result<Decimal, ValidationError> {
    Decimal::from_f64(value).ok_or_else(|| ValidationError::InvalidPrice(value.to_string()))
}

/// Render a price for surfaces that only carry floating point numbers.
#[must_use]
pub fn price_to_f64(price: Decimal) -> f64 {
    price.to_f64().unwrap_or_default()
}

/// A validated order ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_price: Decimal,
}

impl NewOrder {
    /// Validate raw create input.
    ///
    /// `customer_id`, `product_id` and `quantity` are required. An omitted
    /// `total_price` is stored as zero.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if a required field is absent,
    /// `InvalidQuantity` for a non-positive quantity and `NegativePrice` for a
    /// total below zero.
    pub fn try_new(
        customer_id: Option<CustomerId>,
        product_id: Option<ProductId>,
        quantity: Option<i32>,
        total_price: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        let (Some(customer_id), Some(product_id), Some(quantity)) =
            (customer_id, product_id, quantity)
        else {
            return Err(ValidationError::MissingFields);
        };

        if quantity <= 0 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }

        let total_price = total_price.unwrap_or(Decimal::ZERO);
        if total_price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(total_price));
        }

        Ok(Self {
            customer_id,
            product_id,
            quantity,
            total_price,
        })
    }

    /// Build the stored order once the store has assigned an id.
    #[must_use]
    pub const fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_price: self.total_price,
        }
    }
}

/// A partial update to an existing order. `None` leaves a column untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub quantity: Option<i32>,
    pub total_price: Option<Decimal>,
}

impl OrderChanges {
    /// Validate an update.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` or `NegativePrice` when a supplied value is
    /// out of range.
    pub fn try_new(
        quantity: Option<i32>,
        total_price: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        if let Some(quantity) = quantity
            && quantity <= 0
        {
            return Err(ValidationError::InvalidQuantity(quantity));
        }
        if let Some(price) = total_price
            && price < Decimal::ZERO
        {
            return Err(ValidationError::NegativePrice(price));
        }
        Ok(Self {
            quantity,
            total_price,
        })
    }

    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.total_price.is_none()
    }
}
