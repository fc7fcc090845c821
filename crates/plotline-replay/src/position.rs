//! Paper-trading position simulator.
//!
//! Positions are marked against replayed bars: unrealized P&L follows the
//! latest price, and stop-loss/take-profit levels are checked against each
//! bar's low/high. The stop is checked before the target, since within one
//! bar the adverse move is assumed to happen first.

use std::collections::HashMap;

use plotline_core::Candle;

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    Long,
    Short,
}

/// Why a position was closed by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
}

/// A single open paper-trading position.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub side: PositionSide,
    pub size: f64,
    pub entry_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub current_price: Option<f64>,
    pub unrealized_pnl: f64,
    /// Entry timestamp in replay time (seconds since epoch).
    pub entry_time: Option<f64>,
}

impl Position {
    pub fn new(symbol: impl Into<String>, side: PositionSide, size: f64, entry_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            size,
            entry_price,
            stop_loss: None,
            take_profit: None,
            current_price: None,
            unrealized_pnl: 0.0,
            entry_time: None,
        }
    }

    /// Re-mark the position at the given price.
    pub fn update_pnl(&mut self, current_price: f64) {
        self.current_price = Some(current_price);
        self.unrealized_pnl = match self.side {
            PositionSide::Long => (current_price - self.entry_price) * self.size,
            PositionSide::Short => (self.entry_price - current_price) * self.size,
        };
    }

    /// Check whether this bar would have taken the position out.
    pub fn exit_signal(&self, bar: &Candle) -> Option<ExitReason> {
        match self.side {
            PositionSide::Long => {
                if let Some(stop) = self.stop_loss {
                    if bar.low <= stop {
                        return Some(ExitReason::StopLoss);
                    }
                }
                if let Some(target) = self.take_profit {
                    if bar.high >= target {
                        return Some(ExitReason::TakeProfit);
                    }
                }
            }
            PositionSide::Short => {
                if let Some(stop) = self.stop_loss {
                    if bar.high >= stop {
                        return Some(ExitReason::StopLoss);
                    }
                }
                if let Some(target) = self.take_profit {
                    if bar.low <= target {
                        return Some(ExitReason::TakeProfit);
                    }
                }
            }
        }
        None
    }
}

/// Open positions keyed by symbol (at most one per symbol).
#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    positions: HashMap<String, Position>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a position, replacing any existing one for the symbol.
    pub fn open(&mut self, position: Position) -> &Position {
        log::info!(
            "opening {:?} {} x{} @ {}",
            position.side,
            position.symbol,
            position.size,
            position.entry_price
        );
        let symbol = position.symbol.clone();
        self.positions.insert(symbol.clone(), position);
        &self.positions[&symbol]
    }

    /// Close and return the position for a symbol, if any.
    pub fn close(&mut self, symbol: &str) -> Option<Position> {
        let position = self.positions.remove(symbol);
        if let Some(p) = &position {
            log::info!("closed {} with pnl {:.2}", p.symbol, p.unrealized_pnl);
        }
        position
    }

    /// Update the stop-loss on an open position. Returns false if absent.
    pub fn set_stop_loss(&mut self, symbol: &str, price: f64) -> bool {
        match self.positions.get_mut(symbol) {
            Some(position) => {
                position.stop_loss = Some(price);
                true
            }
            None => false,
        }
    }

    /// Update the take-profit on an open position. Returns false if absent.
    pub fn set_take_profit(&mut self, symbol: &str, price: f64) -> bool {
        match self.positions.get_mut(symbol) {
            Some(position) => {
                position.take_profit = Some(price);
                true
            }
            None => false,
        }
    }

    /// Re-mark a symbol's position at the latest price.
    pub fn mark_price(&mut self, symbol: &str, price: f64) {
        if let Some(position) = self.positions.get_mut(symbol) {
            position.update_pnl(price);
        }
    }

    /// Apply a replayed bar: marks P&L at the close and closes the
    /// position when its stop or target was hit inside the bar.
    pub fn apply_bar(&mut self, symbol: &str, bar: &Candle) -> Option<(Position, ExitReason)> {
        let position = self.positions.get_mut(symbol)?;
        position.update_pnl(bar.close);

        let reason = position.exit_signal(bar)?;
        let mut closed = self.positions.remove(symbol)?;
        let exit_price = match reason {
            ExitReason::StopLoss => closed.stop_loss,
            ExitReason::TakeProfit => closed.take_profit,
        };
        if let Some(price) = exit_price {
            closed.update_pnl(price);
        }
        log::info!(
            "{} exited via {:?} with pnl {:.2}",
            closed.symbol,
            reason,
            closed.unrealized_pnl
        );
        Some((closed, reason))
    }

    pub fn get(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    pub fn has_position(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(low: f64, high: f64, close: f64) -> Candle {
        Candle::new(1000.0, close, high, low, close, 100.0)
    }

    #[test]
    fn test_long_pnl() {
        let mut position = Position::new("GOLD", PositionSide::Long, 2.0, 2000.0);
        position.update_pnl(2010.0);
        assert_eq!(position.unrealized_pnl, 20.0);

        position.update_pnl(1990.0);
        assert_eq!(position.unrealized_pnl, -20.0);
    }

    #[test]
    fn test_short_pnl() {
        let mut position = Position::new("GOLD", PositionSide::Short, 2.0, 2000.0);
        position.update_pnl(1990.0);
        assert_eq!(position.unrealized_pnl, 20.0);

        position.update_pnl(2010.0);
        assert_eq!(position.unrealized_pnl, -20.0);
    }

    #[test]
    fn test_long_stop_loss_triggers_on_low() {
        let mut position = Position::new("GOLD", PositionSide::Long, 1.0, 2000.0);
        position.stop_loss = Some(1980.0);

        assert_eq!(position.exit_signal(&bar(1985.0, 2005.0, 2001.0)), None);
        assert_eq!(
            position.exit_signal(&bar(1979.0, 2005.0, 2001.0)),
            Some(ExitReason::StopLoss)
        );
    }

    #[test]
    fn test_long_take_profit_triggers_on_high() {
        let mut position = Position::new("GOLD", PositionSide::Long, 1.0, 2000.0);
        position.take_profit = Some(2020.0);

        assert_eq!(
            position.exit_signal(&bar(1995.0, 2021.0, 2010.0)),
            Some(ExitReason::TakeProfit)
        );
    }

    #[test]
    fn test_short_exits_mirrored() {
        let mut position = Position::new("GOLD", PositionSide::Short, 1.0, 2000.0);
        position.stop_loss = Some(2020.0);
        position.take_profit = Some(1980.0);

        assert_eq!(
            position.exit_signal(&bar(1990.0, 2021.0, 2010.0)),
            Some(ExitReason::StopLoss)
        );
        assert_eq!(
            position.exit_signal(&bar(1979.0, 2010.0, 1990.0)),
            Some(ExitReason::TakeProfit)
        );
    }

    #[test]
    fn test_stop_checked_before_target() {
        let mut position = Position::new("GOLD", PositionSide::Long, 1.0, 2000.0);
        position.stop_loss = Some(1980.0);
        position.take_profit = Some(2020.0);

        // A bar wide enough to hit both resolves to the stop.
        assert_eq!(
            position.exit_signal(&bar(1975.0, 2025.0, 2000.0)),
            Some(ExitReason::StopLoss)
        );
    }

    #[test]
    fn test_book_open_replaces() {
        let mut book = PositionBook::new();
        book.open(Position::new("GOLD", PositionSide::Long, 1.0, 2000.0));
        book.open(Position::new("GOLD", PositionSide::Short, 3.0, 2010.0));

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("GOLD").unwrap().side, PositionSide::Short);
    }

    #[test]
    fn test_book_apply_bar_closes_at_stop() {
        let mut book = PositionBook::new();
        book.open(Position::new("GOLD", PositionSide::Long, 2.0, 2000.0));
        book.set_stop_loss("GOLD", 1980.0);

        let (closed, reason) = book.apply_bar("GOLD", &bar(1975.0, 2005.0, 1990.0)).unwrap();
        assert_eq!(reason, ExitReason::StopLoss);
        // Exit is booked at the stop price, not the close.
        assert_eq!(closed.unrealized_pnl, -40.0);
        assert!(book.is_empty());
    }

    #[test]
    fn test_book_apply_bar_marks_price() {
        let mut book = PositionBook::new();
        book.open(Position::new("GOLD", PositionSide::Long, 1.0, 2000.0));

        assert!(book.apply_bar("GOLD", &bar(1995.0, 2010.0, 2008.0)).is_none());
        assert_eq!(book.get("GOLD").unwrap().unrealized_pnl, 8.0);
    }

    #[test]
    fn test_set_levels_absent_symbol() {
        let mut book = PositionBook::new();
        assert!(!book.set_stop_loss("GOLD", 1980.0));
        assert!(!book.set_take_profit("GOLD", 2020.0));
    }
}
