use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub glyph: &'static str,
    pub name: &'static str,
}

const fn symbol(id: u8, glyph: &'static str, name: &'static str) -> Symbol {
    Symbol {
        id: SymbolId(id),
        glyph,
        name,
    }
}

/// Fixed catalog every deck draws its symbols from.
pub const CATALOG: &[Symbol] = &[
    symbol(0, "🍎", "apple"),
    symbol(1, "🍋", "lemon"),
    symbol(2, "🍇", "grapes"),
    symbol(3, "🍉", "watermelon"),
    symbol(4, "🍒", "cherries"),
    symbol(5, "🍓", "strawberry"),
    symbol(6, "🥝", "kiwi"),
    symbol(7, "🍍", "pineapple"),
    symbol(8, "🥥", "coconut"),
    symbol(9, "🍑", "peach"),
    symbol(10, "🍐", "pear"),
    symbol(11, "🍌", "banana"),
    symbol(12, "🫐", "blueberries"),
    symbol(13, "🥭", "mango"),
    symbol(14, "🍊", "tangerine"),
    symbol(15, "🥑", "avocado"),
];

/// Looks a symbol up by id in the default catalog.
pub fn lookup_symbol(id: SymbolId) -> Option<&'static Symbol> {
    CATALOG.iter().find(|symbol| symbol.id == id)
}
