pub mod color_space;
mod gaussian;
pub mod morphology;
pub mod skin_segmenter;
