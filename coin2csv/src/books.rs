//! Per-product depth aggregation for the summary mode

use crate::feed::DepthRecord;
use common::{DepthUpdate, Qty, Side, Symbol};
use depth::DepthBook;
use rustc_hash::FxHashMap;
use std::io::{self, Write};

/// Interns product strings into dense [`Symbol`] ids.
#[derive(Default)]
pub struct SymbolTable {
    ids: FxHashMap<String, Symbol>,
    names: Vec<String>,
}

impl SymbolTable {
    /// Id for `product`, allocating the next one on first sight.
    pub fn intern(&mut self, product: &str) -> Symbol {
        if let Some(&symbol) = self.ids.get(product) {
            return symbol;
        }
        let symbol = Symbol::new(self.names.len() as u32);
        self.ids.insert(product.to_string(), symbol);
        self.names.push(product.to_string());
        symbol
    }

    /// Product string for an interned id.
    #[must_use]
    pub fn name(&self, symbol: Symbol) -> &str {
        &self.names[symbol.0 as usize]
    }
}

/// Every book seen in one capture session.
#[derive(Default)]
pub struct Books {
    symbols: SymbolTable,
    books: FxHashMap<Symbol, DepthBook>,
}

impl Books {
    /// Route one record into its product's book; returns the new level total.
    pub fn apply(&mut self, record: &DepthRecord<'_>) -> Qty {
        let symbol = self.symbols.intern(record.product);
        let book = self
            .books
            .entry(symbol)
            .or_insert_with(|| DepthBook::new(symbol));
        book.apply(&DepthUpdate::new(
            record.ts,
            symbol,
            record.side,
            record.price,
            record.qty,
        ))
    }

    /// Number of products tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True when no record has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Write the final aggregate: every level of every book side, products in
    /// first-seen order, prices ascending within a side.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut symbols: Vec<Symbol> = self.books.keys().copied().collect();
        symbols.sort_unstable();
        for symbol in symbols {
            let book = &self.books[&symbol];
            for side in [Side::Bid, Side::Ask] {
                for (price, total) in book.side(side) {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        self.symbols.name(symbol),
                        side,
                        price,
                        total
                    )?;
                }
            }
        }
        Ok(())
    }
}
