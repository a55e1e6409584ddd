pub mod connected_components;
pub mod contour_tracer;
pub mod largest_region_extractor;
