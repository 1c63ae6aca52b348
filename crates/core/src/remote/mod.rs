//! Remote trading API boundary.
//!
//! The REST/WebSocket transport itself is out of scope; this module defines
//! the interface the cache consumes, the loosely-typed payload shapes it
//! receives, and the normalization step that resolves every field alias into
//! one canonical entity before anything reaches the store.

mod remote_dto;
mod remote_mapper;
mod remote_traits;

pub use remote_dto::{
    BalanceDto, OrderDto, PartialTpStepDto, PositionDto, ScreenerCoinDto, SignalDto,
    StrategySettingDto, TradeDto,
};
pub use remote_mapper::{
    map_balance, map_order, map_position, map_screener_coin, map_signal, map_strategy_setting,
    map_trade,
};
pub use remote_traits::TradingApiTrait;
