//! Small numeric helpers shared by the layout and rendering code.

pub mod safe_cast;
