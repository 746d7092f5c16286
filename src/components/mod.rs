pub mod app_display;
pub mod tip_cards;
pub mod tip_form;
pub mod title_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_display::{AppDisplay, AppDisplayProps, ERROR_ICON};
pub use tip_cards::{TipCards, TipCardsProps};
pub use tip_form::{TipFormProps, TipFormView};
pub use title_header::{TitleHeader, TitleHeaderProps};
