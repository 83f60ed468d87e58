/// Pure data and rules: coordinates, tiles, the frame and sequence
/// tables, and character state. Nothing in here touches a level or
/// performs I/O.

pub mod character;
pub mod coords;
pub mod frames;
pub mod seq;
pub mod seqdata;
pub mod tile;
