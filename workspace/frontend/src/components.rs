pub mod form;
pub mod layout;
pub mod stat_card;
