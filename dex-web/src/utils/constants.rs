// App branding
pub const APP_NAME: &str = "DexDeck";
pub const APP_TAGLINE: &str = "Swap, send and trade at your price";

// DOM
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";

// Quotes are requested once typing pauses for this long
pub const QUOTE_DEBOUNCE_MS: u32 = 400;

// Display precision for balances
pub const BALANCE_PLACES: usize = 4;
