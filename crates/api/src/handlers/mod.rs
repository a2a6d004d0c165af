pub mod radio;
pub mod reaction;
pub mod statistics;
pub mod track;
