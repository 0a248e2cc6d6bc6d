//! Order endpoints: create, fetch, cancel, complete.

use std::str::FromStr;
use std::sync::Arc;

use application::{OrderRepository, OrderService, ServiceError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{Money, Order, OrderItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: OrderRepository> {
    pub order_service: OrderService<R>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl OrderItemRequest {
    /// Checks the payload and builds the value object.
    ///
    /// The domain trusts its inputs, so this is where malformed items stop.
    fn into_item(self, index: usize) -> Result<OrderItem, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "items[{index}].name must not be empty"
            )));
        }

        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "items[{index}].quantity must be a positive integer, got {}",
                    self.quantity
                ))
            })?;

        let negative_price = || {
            ApiError::BadRequest(format!(
                "items[{index}].price must be a non-negative number, got {}",
                self.price
            ))
        };
        if !self.price.is_finite() {
            return Err(negative_price());
        }

        // Shortest round-trip formatting keeps 1.2 as 1.2 rather than its binary expansion.
        let price = Decimal::from_str(&self.price.to_string())
            .map(Money::new)
            .map_err(|e| {
                ApiError::BadRequest(format!("items[{index}].price is out of range: {e}"))
            })?;
        if price.is_negative() {
            return Err(negative_price());
        }

        Ok(OrderItem::new(self.name, quantity, price))
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub items: Vec<OrderItemResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: String,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Totals are rounded here, at the presentation edge, and nowhere else.
fn display_total(order: &Order) -> Result<Decimal, ApiError> {
    let total = order.total().map_err(ServiceError::from)?;
    Ok(total.rounded(2).amount())
}

impl TryFrom<&Order> for OrderResponse {
    type Error = ApiError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: order.id().to_string(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemResponse {
                    name: item.name().to_string(),
                    quantity: item.quantity(),
                    price: item.price().amount(),
                })
                .collect(),
            total: display_total(order)?,
            status: order.status().to_string(),
        })
    }
}

// -- Handlers --

/// POST /orders — create a new order from the given items.
#[tracing::instrument(skip(state, payload))]
pub async fn create<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let items = req
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_item(index))
        .collect::<Result<Vec<_>, _>>()?;

    let order = state
        .order_service
        .create_order(items, OrderId::generate())
        .await?;

    let response = OrderCreatedResponse {
        order_id: order.id().to_string(),
        total: display_total(&order)?,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/:order_id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .order_service
        .get_order(&OrderId::new(order_id.as_str()))
        .await?
        .ok_or_else(|| ApiError::order_not_found(&order_id))?;

    Ok(Json(OrderResponse::try_from(&order)?))
}

/// DELETE /orders/:order_id — cancel an order.
#[tracing::instrument(skip(state))]
pub async fn cancel<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(order_id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let found = state
        .order_service
        .cancel_order(&OrderId::new(order_id.as_str()))
        .await?;

    if !found {
        return Err(ApiError::order_not_found(&order_id));
    }
    Ok(Json(OkResponse { ok: true }))
}

/// POST /orders/:order_id/complete — mark an open order as completed.
#[tracing::instrument(skip(state))]
pub async fn complete<R: OrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(order_id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let found = state
        .order_service
        .complete_order(&OrderId::new(order_id.as_str()))
        .await?;

    if !found {
        return Err(ApiError::order_not_found(&order_id));
    }
    Ok(Json(OkResponse { ok: true }))
}
