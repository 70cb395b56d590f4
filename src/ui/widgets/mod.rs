pub mod popup;
pub mod searchbar;
pub mod statusbar;
pub mod table;
