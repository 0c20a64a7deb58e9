pub mod played_notice;
pub mod result_modal;
pub mod spin_button;
pub mod wheel;
