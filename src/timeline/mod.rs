pub(crate) mod assemble;
pub(crate) mod audio;
pub(crate) mod clip;
pub(crate) mod title;
pub(crate) mod video;

#[cfg(test)]
#[path = "../../tests/unit/timeline/support.rs"]
pub(crate) mod test_support;
