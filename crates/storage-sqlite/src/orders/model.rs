//! Database model for orders.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use perpdesk_core::errors::Result;
use perpdesk_core::orders::{Order, OrderStatus, OrderType};
use perpdesk_core::partition::{AccountType, Exchange};
use perpdesk_core::positions::PositionSide;

use crate::utils::{format_datetime, parse_datetime, parse_decimal, parse_decimal_opt};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderDB {
    pub order_id: String,
    pub user_id: String,
    pub exchange: String,
    pub account_type: String,
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub price: Option<String>,
    pub qty: String,
    pub filled_qty: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderDB {
    fn from(order: Order) -> Self {
        OrderDB {
            order_id: order.order_id,
            user_id: order.user_id,
            exchange: order.exchange.as_str().to_string(),
            account_type: order.account_type.as_str().to_string(),
            symbol: order.symbol,
            side: order.side.as_str().to_string(),
            order_type: order.order_type.as_str().to_string(),
            price: order.price.map(|d| d.to_string()),
            qty: order.qty.to_string(),
            filled_qty: order.filled_qty.to_string(),
            status: order.status.as_str().to_string(),
            created_at: format_datetime(&order.created_at),
            updated_at: format_datetime(&order.updated_at),
        }
    }
}

impl OrderDB {
    pub fn into_domain(self) -> Result<Order> {
        Ok(Order {
            exchange: Exchange::parse(&self.exchange)?,
            account_type: AccountType::parse(&self.account_type)?,
            side: PositionSide::parse(&self.side)?,
            order_type: OrderType::parse(&self.order_type)?,
            status: OrderStatus::parse(&self.status)?,
            order_id: self.order_id,
            user_id: self.user_id,
            symbol: self.symbol,
            price: parse_decimal_opt(self.price.as_deref(), "order.price"),
            qty: parse_decimal(&self.qty, "order.qty"),
            filled_qty: parse_decimal(&self.filled_qty, "order.filled_qty"),
            created_at: parse_datetime(&self.created_at, "order.created_at"),
            updated_at: parse_datetime(&self.updated_at, "order.updated_at"),
        })
    }
}
