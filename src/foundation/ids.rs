//! Dense arena indices handed out by [`crate::ProjectGraph`].
//!
//! Each index is only meaningful for the graph that produced it.

macro_rules! arena_idx {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            pub(crate) fn from_usize(i: usize) -> Option<Self> {
                u32::try_from(i).ok().map(Self)
            }

            /// Position in the owning arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_idx!(
    /// Index of a [`crate::MediaItem`].
    MediaIdx
);
arena_idx!(
    /// Index of a [`crate::ColorExtent`].
    ColorIdx
);
arena_idx!(
    /// Index of a [`crate::VideoExtent`].
    VideoIdx
);
arena_idx!(
    /// Index of an [`crate::AudioExtent`].
    AudioIdx
);
arena_idx!(
    /// Index of a [`crate::TitleExtent`].
    TitleIdx
);
