pub(crate) mod extents;
pub(crate) mod graph;
