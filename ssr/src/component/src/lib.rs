pub mod buttons;
pub mod form;
pub mod spinner;
pub mod video_selector;
