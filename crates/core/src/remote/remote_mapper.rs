//! Normalization of wire payloads into canonical domain entities.
//!
//! Every entity passes through exactly one of these functions before it can
//! reach the store. Derived fields that older payloads omit (pnl percent,
//! position value) are computed here so the cache never stores a gap.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::balances::BalanceSnapshot;
use crate::errors::Result;
use crate::orders::{Order, OrderStatus, OrderType};
use crate::partition::Partition;
use crate::positions::{Position, PositionSide};
use crate::remote::remote_dto::*;
use crate::screener::{ScreenerCoin, TrendLabel};
use crate::signals::{Signal, SignalStatus};
use crate::strategies::{PartialTpStep, StrategySetting};
use crate::trades::{ExitReason, Trade};

pub fn map_balance(
    partition: &Partition,
    dto: BalanceDto,
    fetched_at: DateTime<Utc>,
) -> BalanceSnapshot {
    BalanceSnapshot {
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        equity: dto.equity,
        available: dto.available,
        wallet_balance: dto.wallet_balance,
        unrealized_pnl: dto.unrealized_pnl,
        margin_used: dto.margin_used,
        today_pnl: dto.today_pnl,
        week_pnl: dto.week_pnl,
        updated_at: fetched_at,
    }
}

pub fn map_position(
    partition: &Partition,
    dto: PositionDto,
    fetched_at: DateTime<Utc>,
) -> Result<Position> {
    let side = PositionSide::parse(&dto.side)?;
    let position_value = dto
        .position_value
        .unwrap_or_else(|| dto.size * dto.mark_price);
    let unrealized_pnl_pct = dto.pnl_pct.unwrap_or_else(|| {
        pnl_percent(dto.unrealized_pnl, dto.entry_price, dto.size, dto.leverage)
    });

    Ok(Position {
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: dto.symbol,
        side,
        size: dto.size,
        entry_price: dto.entry_price,
        mark_price: dto.mark_price,
        leverage: dto.leverage,
        unrealized_pnl: dto.unrealized_pnl,
        unrealized_pnl_pct,
        liquidation_price: dto.liquidation_price,
        take_profit_price: dto.take_profit,
        stop_loss_price: dto.stop_loss,
        strategy: dto.strategy,
        position_value,
        margin: dto.margin,
        opened_at: dto.opened_at.unwrap_or(fetched_at),
        updated_at: dto.updated_at.unwrap_or(fetched_at),
    })
}

pub fn map_order(partition: &Partition, dto: OrderDto) -> Result<Order> {
    Ok(Order {
        order_id: dto.order_id,
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: dto.symbol,
        side: PositionSide::parse(&dto.side)?,
        order_type: OrderType::parse(&dto.order_type)?,
        price: dto.price,
        qty: dto.qty,
        filled_qty: dto.filled_qty,
        status: OrderStatus::parse(&dto.status)?,
        created_at: dto.created_at,
        updated_at: dto.updated_at.unwrap_or(dto.created_at),
    })
}

pub fn map_trade(partition: &Partition, dto: TradeDto) -> Result<Trade> {
    let id = dto
        .id
        .unwrap_or_else(|| Trade::synthesize_id(&partition.user_id, &dto.symbol, dto.closed_at));
    let pnl_pct = dto
        .pnl_pct
        .unwrap_or_else(|| pnl_percent(dto.pnl, dto.entry_price, dto.size, Decimal::ONE));

    Ok(Trade {
        id,
        user_id: partition.user_id.clone(),
        exchange: partition.exchange,
        account_type: partition.account_type,
        symbol: dto.symbol,
        side: PositionSide::parse(&dto.side)?,
        entry_price: dto.entry_price,
        exit_price: dto.exit_price,
        size: dto.size,
        pnl: dto.pnl,
        pnl_pct,
        strategy: dto.strategy,
        exit_reason: ExitReason::parse(&dto.exit_reason)?,
        closed_at: dto.closed_at,
    })
}

pub fn map_strategy_setting(
    user_id: &str,
    exchange: crate::partition::Exchange,
    dto: StrategySettingDto,
    fetched_at: DateTime<Utc>,
) -> Result<StrategySetting> {
    Ok(StrategySetting {
        user_id: user_id.to_string(),
        strategy: dto.strategy,
        side: PositionSide::parse(&dto.side)?,
        exchange,
        enabled: dto.enabled,
        percent: dto.percent,
        take_profit_pct: dto.take_profit_pct,
        stop_loss_pct: dto.stop_loss_pct,
        leverage: dto.leverage,
        use_atr: dto.use_atr,
        atr_period: dto.atr_period,
        atr_multiplier: dto.atr_multiplier,
        dca_trigger_pct: dto.dca_trigger_pct,
        break_even_trigger_pct: dto.break_even_trigger_pct,
        partial_tp_ladder: dto
            .partial_tp_ladder
            .into_iter()
            .map(|step| PartialTpStep {
                trigger_pct: step.trigger_pct,
                close_pct: step.close_pct,
            })
            .collect(),
        coin_group: dto.coin_group,
        max_positions: dto.max_positions,
        updated_at: fetched_at,
    })
}

pub fn map_screener_coin(dto: ScreenerCoinDto, fetched_at: DateTime<Utc>) -> Result<ScreenerCoin> {
    let trend = match dto.trend.as_deref() {
        Some(label) => TrendLabel::parse(label)?,
        None => TrendLabel::Sideways,
    };
    Ok(ScreenerCoin {
        symbol: dto.symbol,
        price: dto.price,
        change_24h_pct: dto.change_24h_pct,
        volume_24h: dto.volume_24h,
        high_24h: dto.high_24h,
        low_24h: dto.low_24h,
        open_interest: dto.open_interest,
        funding_rate: dto.funding_rate,
        rsi: dto.rsi,
        trend,
        updated_at: fetched_at,
    })
}

pub fn map_signal(dto: SignalDto) -> Result<Signal> {
    Ok(Signal {
        id: dto.id,
        strategy: dto.strategy,
        symbol: dto.symbol,
        direction: PositionSide::parse(&dto.direction)?,
        entry_price: dto.entry_price,
        take_profit: dto.take_profit,
        stop_loss: dto.stop_loss,
        confidence: dto.confidence,
        status: SignalStatus::parse(&dto.status)?,
        created_at: dto.created_at,
    })
}

/// Pnl percent relative to committed margin: `pnl / (entry * size / lev)`.
/// Falls back to zero when the denominator is degenerate.
fn pnl_percent(pnl: Decimal, entry_price: Decimal, size: Decimal, leverage: Decimal) -> Decimal {
    let notional = entry_price * size;
    if notional.is_zero() || leverage.is_zero() {
        return Decimal::ZERO;
    }
    let margin = notional / leverage;
    if margin.is_zero() {
        return Decimal::ZERO;
    }
    (pnl / margin) * Decimal::ONE_HUNDRED
}
